use crate::components::player::Player;
use crate::components::tilemap::TileGrid;
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::systems::lighting::IntensityMap;

/// Overlay tint for lit cells (255, 255, 200).
pub const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 200.0 / 255.0];

/// Player fill color.
pub const PLAYER_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// Build the frame's render buffer.
///
/// Pass order: every tile as an opaque rect, then the player, then one
/// additive overlay per lit cell whose alpha is the cell's intensity.
pub fn build_render_buffer(
    grid: &TileGrid,
    player: Option<&Player>,
    light: &IntensityMap,
    tile_size: f32,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    for (x, y, kind) in grid.iter() {
        buffer.push(RenderInstance::rect(
            x as f32 * tile_size,
            y as f32 * tile_size,
            tile_size,
            tile_size,
            kind.color(),
            1.0,
        ));
    }

    if let Some(player) = player {
        buffer.push(RenderInstance::rect(
            player.pos.x,
            player.pos.y,
            player.size.x,
            player.size.y,
            PLAYER_COLOR,
            1.0,
        ));
    }

    buffer.begin_additive();
    for (x, y, level) in light.lit_cells() {
        buffer.push(RenderInstance::rect(
            x as f32 * tile_size,
            y as f32 * tile_size,
            tile_size,
            tile_size,
            LIGHT_COLOR,
            level,
        ));
    }
}
