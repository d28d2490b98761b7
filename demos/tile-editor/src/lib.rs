use wasm_bindgen::prelude::*;
use glow_engine::*;

mod game;
pub use game::TileEditor;

glow_web::export_game!(TileEditor, "tile-editor");
