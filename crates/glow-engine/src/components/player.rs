use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Player tuning. All rates are per tick, distances in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Top-left corner at spawn.
    pub spawn: [f32; 2],
    pub width: f32,
    pub height: f32,
    /// Horizontal acceleration while a direction is held.
    pub speed: f32,
    /// Vertical velocity applied on jump (negative = up).
    pub jump_force: f32,
    pub gravity: f32,
    /// Horizontal velocity multiplier applied every tick.
    pub friction: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: [100.0, 100.0],
            width: 32.0,
            height: 48.0,
            speed: 1.0,
            jump_force: -12.0,
            gravity: 0.5,
            friction: 0.85,
        }
    }
}

/// Movement keys currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
}

/// The single platformer character. Y grows downward.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner in pixels.
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub intent: PlayerIntent,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            grounded: false,
            intent: PlayerIntent::default(),
        }
    }

    /// Spawn at the configured position with the configured size.
    pub fn spawn(config: &PlayerConfig) -> Self {
        Self::new(
            Vec2::from_array(config.spawn),
            Vec2::new(config.width, config.height),
        )
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_uses_config() {
        let config = PlayerConfig::default();
        let player = Player::spawn(&config);
        assert_eq!(player.pos, Vec2::new(100.0, 100.0));
        assert_eq!(player.size, Vec2::new(32.0, 48.0));
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(!player.grounded);
        assert_eq!(player.intent, PlayerIntent::default());
    }
}
