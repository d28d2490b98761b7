//! Axis-aligned player kinematics against the tile grid.
//!
//! Explicit Euler, one step per tick, no sub-stepping. X and Y are resolved
//! separately so the player can slide along walls and floors.

use glam::Vec2;

use crate::components::player::{Player, PlayerConfig};
use crate::components::tilemap::TileGrid;

/// Whether a box with top-left `pos` and `size` overlaps any solid cell.
///
/// Covers cells `floor(left / T) ..= floor(right / T)` on each axis, so a box
/// whose edge sits exactly on a tile boundary also touches the next cell.
/// Cells outside the grid never collide.
pub fn collides(grid: &TileGrid, tile_size: f32, pos: Vec2, size: Vec2) -> bool {
    let min = (pos / tile_size).floor();
    let max = ((pos + size) / tile_size).floor();
    if !min.is_finite() || !max.is_finite() {
        return false;
    }

    let (left, top) = (min.x as i32, min.y as i32);
    let (right, bottom) = (max.x as i32, max.y as i32);
    // Clip the scan to the grid; outside cells are never solid.
    let x_range = left.max(0)..=right.min(grid.width() as i32 - 1);
    (top.max(0)..=bottom.min(grid.height() as i32 - 1))
        .any(|y| x_range.clone().any(|x| grid.is_solid_at(x, y)))
}

/// Advance the player by one tick.
pub fn step_player(player: &mut Player, grid: &TileGrid, tile_size: f32, config: &PlayerConfig) {
    if player.intent.left {
        player.vel.x -= config.speed;
    }
    if player.intent.right {
        player.vel.x += config.speed;
    }
    player.vel.x *= config.friction;

    if player.intent.jump && player.grounded {
        player.vel.y = config.jump_force;
        player.grounded = false;
    }
    player.vel.y += config.gravity;

    let next_x = player.pos.x + player.vel.x;
    if collides(grid, tile_size, Vec2::new(next_x, player.pos.y), player.size) {
        player.vel.x = 0.0;
    } else {
        player.pos.x = next_x;
    }

    let next_y = player.pos.y + player.vel.y;
    if collides(grid, tile_size, Vec2::new(player.pos.x, next_y), player.size) {
        if player.vel.y > 0.0 {
            player.grounded = true;
        }
        player.vel.y = 0.0;
    } else {
        player.pos.y = next_y;
        player.grounded = false;
    }
}
