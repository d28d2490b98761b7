pub mod runner;

pub use runner::GameRunner;

use wasm_bindgen::JsValue;

/// Turn an engine error into a thrown JS `Error`.
pub fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use glow_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// glow_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `glow_engine::Game` and has `new()`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        fn install_runner(runner: $crate::GameRunner<$game_type>) {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        fn install_logging() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
        }

        /// Start with the game's default configuration.
        #[wasm_bindgen]
        pub fn game_init() -> Result<(), JsValue> {
            install_logging();
            let runner = $crate::GameRunner::new(<$game_type>::new())
                .map_err($crate::to_js_error)?;
            install_runner(runner);
            Ok(())
        }

        /// Start with a JSON configuration; missing fields use defaults.
        #[wasm_bindgen]
        pub fn game_init_with_config(json: &str) -> Result<(), JsValue> {
            install_logging();
            let config = GameConfig::from_json(json).map_err($crate::to_js_error)?;
            let runner = $crate::GameRunner::with_config(<$game_type>::new(), config)
                .map_err($crate::to_js_error)?;
            install_runner(runner);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_additive_start() -> u32 {
            with_runner(|r| r.additive_start())
        }

        #[wasm_bindgen]
        pub fn get_light_map_ptr() -> *const f32 {
            with_runner(|r| r.light_map_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_map_len() -> u32 {
            with_runner(|r| r.light_map_len())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_grid_width() -> u32 {
            with_runner(|r| r.grid_width())
        }

        #[wasm_bindgen]
        pub fn get_grid_height() -> u32 {
            with_runner(|r| r.grid_height())
        }

        #[wasm_bindgen]
        pub fn get_tile_size() -> f32 {
            with_runner(|r| r.tile_size())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
