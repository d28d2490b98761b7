use glow_engine::bridge::protocol::{
    HEADER_ADDITIVE_START, HEADER_EVENT_COUNT, HEADER_FLOATS, HEADER_FRAME_COUNTER,
    HEADER_INSTANCE_COUNT, HEADER_LIGHT_SOURCE_COUNT, HEADER_PLAYER_GROUNDED,
    HEADER_PLAYER_SPAWNED,
};
use glow_engine::{
    build_render_buffer, ConfigError, EngineContext, Game, GameConfig, InputEvent, InputQueue,
    ProtocolLayout, RenderBuffer, RenderContext,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly. The host calls `tick` once per animation frame;
/// stopping the loop is just not calling it again.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    /// Build a runner using the game's own configuration.
    pub fn new(game: G) -> Result<Self, ConfigError> {
        let config = game.config();
        Self::with_config(game, config)
    }

    /// Build a runner with an explicit configuration, e.g. parsed from host JSON.
    pub fn with_config(game: G, config: GameConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected config: {}", err);
            return Err(err);
        }

        let layout = ProtocolLayout::from_config(&config);
        let header = layout.header(&config);
        let render_buffer = RenderBuffer::with_capacity(layout.max_instances);

        Ok(Self {
            game,
            ctx: EngineContext::new(config),
            input: InputQueue::new(),
            render_buffer,
            layout,
            header,
            frame: 0,
            initialized: false,
        })
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        log::info!(
            "runner: {}x{} grid, {}px tiles, light radius {}",
            self.ctx.config.grid_width,
            self.ctx.config.grid_height,
            self.ctx.config.tile_size,
            self.ctx.config.light_radius,
        );
        self.rebuild_frame();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: game update, player physics, lighting, render buffer.
    ///
    /// `_dt` is accepted for the host's convenience; the simulation advances
    /// exactly one tick per call.
    pub fn tick(&mut self, _dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        self.ctx.step_physics();
        self.frame = self.frame.wrapping_add(1);
        self.rebuild_frame();
    }

    /// Lighting, render buffer and header for the current state.
    fn rebuild_frame(&mut self) {
        self.ctx.update_lighting();

        build_render_buffer(
            &self.ctx.grid,
            self.ctx.player.as_ref(),
            self.ctx.light_map(),
            self.ctx.config.tile_size,
            &mut self.render_buffer,
        );

        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        self.write_header();
    }

    fn write_header(&mut self) {
        let header = &mut self.header;
        header[HEADER_FRAME_COUNTER] = self.frame as f32;
        header[HEADER_INSTANCE_COUNT] = self.render_buffer.instance_count() as f32;
        header[HEADER_ADDITIVE_START] = self.render_buffer.additive_start as f32;
        header[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        header[HEADER_LIGHT_SOURCE_COUNT] = self.ctx.lighting.sources().len() as f32;
        header[HEADER_PLAYER_SPAWNED] = if self.ctx.player.is_some() { 1.0 } else { 0.0 };
        header[HEADER_PLAYER_GROUNDED] = match &self.ctx.player {
            Some(player) if player.grounded => 1.0,
            _ => 0.0,
        };
    }

    // ---- Read-only views ----

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    // ---- Pointer accessors for host reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn additive_start(&self) -> u32 {
        self.render_buffer.additive_start
    }

    pub fn light_map_ptr(&self) -> *const f32 {
        self.ctx.light_map().as_ptr()
    }

    pub fn light_map_len(&self) -> u32 {
        self.ctx.light_map().len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn grid_width(&self) -> u32 {
        self.ctx.config.grid_width
    }

    pub fn grid_height(&self) -> u32 {
        self.ctx.config.grid_height
    }

    pub fn tile_size(&self) -> f32 {
        self.ctx.config.tile_size
    }

    pub fn world_width(&self) -> f32 {
        self.ctx.config.world_width()
    }

    pub fn world_height(&self) -> f32 {
        self.ctx.config.world_height()
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
