use thiserror::Error;

/// Reasons a `GameConfig` is refused at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    EmptyGrid { width: u32, height: u32 },
    #[error("grid of {width}x{height} cells exceeds the limit of {max} cells")]
    GridTooLarge { width: u32, height: u32, max: usize },
    #[error("tile size must be finite and positive (got {0})")]
    TileSize(f32),
    #[error("light radius must be at least one cell")]
    ZeroLightRadius,
    #[error("max light level must be in (0, 1] (got {0})")]
    MaxLightLevel(f32),
    #[error("player {field} must be finite (got {value})")]
    PlayerTuning { field: &'static str, value: f32 },
    #[error("player size must be positive (got {width}x{height})")]
    PlayerSize { width: f32, height: f32 },
    #[error("player friction must be in [0, 1] (got {0})")]
    Friction(f32),
    #[error("max events must be at most {max} (got {got})")]
    TooManyEvents { got: usize, max: usize },
    #[error("invalid configuration json: {0}")]
    Parse(#[from] serde_json::Error),
}
