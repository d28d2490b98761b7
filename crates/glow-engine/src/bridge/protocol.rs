/// Host buffer layout.
/// Must stay in sync with the host-side `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 8 floats]
/// [Light map: grid_width × grid_height floats, row-major]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices. Index 0 is reserved.
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_ADDITIVE_START: usize = 4;
pub const HEADER_GRID_WIDTH: usize = 5;
pub const HEADER_GRID_HEIGHT: usize = 6;
pub const HEADER_TILE_SIZE: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_PROTOCOL_VERSION: usize = 10;
pub const HEADER_LIGHT_SOURCE_COUNT: usize = 11;
pub const HEADER_PLAYER_SPAWNED: usize = 12;
pub const HEADER_PLAYER_GROUNDED: usize = 13;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance: x, y, w, h, r, g, b, a.
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    /// Cells in the light map.
    pub light_cells: usize,
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub light_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where light map data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, light_cells: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let light_data_floats = light_cells;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let light_data_offset = instance_data_offset + instance_data_floats;
        let event_data_offset = light_data_offset + light_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            light_cells,
            max_events,
            instance_data_floats,
            light_data_floats,
            event_data_floats,
            instance_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances(), config.cell_count(), config.max_events)
    }

    /// Header with the static fields filled in; per-frame counts start at zero.
    pub fn header(&self, config: &GameConfig) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_GRID_WIDTH] = config.grid_width as f32;
        header[HEADER_GRID_HEIGHT] = config.grid_height as f32;
        header[HEADER_TILE_SIZE] = config.tile_size;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header
    }
}
