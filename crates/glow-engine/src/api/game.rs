use serde::{Deserialize, Serialize};

use crate::api::types::GameEvent;
use crate::components::player::{Player, PlayerConfig};
use crate::components::tilemap::{TileGrid, TileKind};
use crate::core::physics::step_player;
use crate::error::ConfigError;
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;
use crate::systems::lighting::{IntensityMap, LightState};

/// Largest grid the engine accepts, in cells. Keeps every buffer size
/// (`max_instances()` included) representable on 32-bit targets.
pub const MAX_GRID_CELLS: usize = 1 << 22;

/// Largest per-frame event capacity the engine accepts.
pub const MAX_EVENTS_LIMIT: usize = 4096;

/// Startup configuration. Fixed for the lifetime of the engine.
///
/// Missing JSON fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid width in cells.
    pub grid_width: u32,
    /// Grid height in cells.
    pub grid_height: u32,
    /// Edge length of one cell in pixels.
    pub tile_size: f32,
    /// Light reach in cells. Must be non-zero.
    pub light_radius: u32,
    /// Level of a source's own cell, in (0, 1].
    pub max_light_level: f32,
    pub player: PlayerConfig,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 100,
            grid_height: 50,
            tile_size: 32.0,
            light_radius: 10,
            max_light_level: 0.8,
            player: PlayerConfig::default(),
            max_events: 32,
        }
    }
}

impl GameConfig {
    /// Parse from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        let cells = (self.grid_width as u64).checked_mul(self.grid_height as u64);
        if !cells.is_some_and(|n| n <= MAX_GRID_CELLS as u64) {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_CELLS,
            });
        }
        if self.max_events > MAX_EVENTS_LIMIT {
            return Err(ConfigError::TooManyEvents {
                got: self.max_events,
                max: MAX_EVENTS_LIMIT,
            });
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        if self.light_radius == 0 {
            return Err(ConfigError::ZeroLightRadius);
        }
        if !(self.max_light_level > 0.0 && self.max_light_level <= 1.0) {
            return Err(ConfigError::MaxLightLevel(self.max_light_level));
        }

        let p = &self.player;
        let tuning = [
            ("spawn.x", p.spawn[0]),
            ("spawn.y", p.spawn[1]),
            ("speed", p.speed),
            ("jump_force", p.jump_force),
            ("gravity", p.gravity),
        ];
        if let Some(&(field, value)) = tuning.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::PlayerTuning { field, value });
        }
        if !(p.width > 0.0 && p.height > 0.0 && p.width.is_finite() && p.height.is_finite()) {
            return Err(ConfigError::PlayerSize {
                width: p.width,
                height: p.height,
            });
        }
        if !(0.0..=1.0).contains(&p.friction) {
            return Err(ConfigError::Friction(p.friction));
        }
        Ok(())
    }

    /// Grid width in pixels.
    pub fn world_width(&self) -> f32 {
        self.grid_width as f32 * self.tile_size
    }

    /// Grid height in pixels.
    pub fn world_height(&self) -> f32 {
        self.grid_height as f32 * self.tile_size
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Worst case render instances: one per tile, one overlay per tile, the player.
    pub fn max_instances(&self) -> usize {
        self.cell_count() * 2 + 1
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: seed the grid, pick modes.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One frame: consume input, mutate the grid, steer the player.
    /// Physics and lighting run after this returns.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// The whole simulation state, passed explicitly to `Game::init` and `Game::update`.
pub struct EngineContext {
    pub config: GameConfig,
    pub grid: TileGrid,
    pub player: Option<Player>,
    pub lighting: LightState,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    /// Build an empty world for `config`. Call `GameConfig::validate` first.
    pub fn new(config: GameConfig) -> Self {
        let (w, h) = (config.grid_width, config.grid_height);
        Self {
            grid: TileGrid::new(w, h),
            player: None,
            lighting: LightState::new(w, h),
            events: Vec::with_capacity(config.max_events),
            config,
        }
    }

    /// Queue an event for the host. Events past `max_events` are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.config.max_events {
            log::warn!("event buffer full, dropping {:?}", event);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Write a tile at a cell. Returns whether the cell changed.
    pub fn place_tile(&mut self, x: i32, y: i32, kind: TileKind) -> bool {
        if self.grid.get(x, y).is_some_and(|current| current != kind) {
            self.grid.set(x, y, kind);
            log::debug!("tile ({}, {}) = {:?}", x, y, kind);
            true
        } else {
            false
        }
    }

    /// Cell under a pixel position, if it is on the grid.
    pub fn cell_at(&self, px: f32, py: f32) -> Option<(i32, i32)> {
        self.grid.world_to_tile(px, py, self.config.tile_size)
    }

    /// Spawn the player at the configured position. No-op once spawned.
    pub fn spawn_player(&mut self) -> Option<&Player> {
        if self.player.is_some() {
            return None;
        }
        let player = Player::spawn(&self.config.player);
        log::info!("player spawned at ({}, {})", player.pos.x, player.pos.y);
        self.player = Some(player);
        self.player.as_ref()
    }

    /// Advance the player one tick. Called by the runner after `Game::update()`.
    pub fn step_physics(&mut self) {
        if let Some(player) = self.player.as_mut() {
            step_player(player, &self.grid, self.config.tile_size, &self.config.player);
        }
    }

    /// Rescan light sources and recompute the intensity map.
    /// Called by the runner after `step_physics()`.
    pub fn update_lighting(&mut self) {
        self.lighting.recompute(
            &self.grid,
            self.config.light_radius,
            self.config.max_light_level,
        );
    }

    pub fn light_map(&self) -> &IntensityMap {
        self.lighting.map()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}
