pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext, MAX_EVENTS_LIMIT, MAX_GRID_CELLS};
pub use api::types::{GameEvent, EventKind};
pub use components::tilemap::{TileGrid, TileKind};
pub use components::player::{Player, PlayerConfig, PlayerIntent};
pub use crate::core::physics::{collides, step_player};
pub use systems::lighting::{
    compute_lighting, contribution, ray_blocked,
    IntensityMap, LightSource, LightSources, LightState,
};
pub use systems::render::build_render_buffer;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use input::queue::{keys, InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use error::ConfigError;
