//! Grid lighting: radius-bounded, ray-occluded, max-merged.
//!
//! Every frame the light index is rebuilt from the grid and the intensity map
//! is recomputed from scratch. Nothing is cached between frames.
//!
//! Overlapping sources do not stack: each cell keeps the brightest single
//! contribution. Keep it that way; the renderer composites the map
//! additively on top of the tiles and relies on values never exceeding
//! the configured maximum.

use crate::components::tilemap::{TileGrid, TileKind};

/// Grid coordinate of a cell currently holding a `Light` tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightSource {
    pub x: i32,
    pub y: i32,
}

/// Light sources derived from the grid, in row-major scan order.
#[derive(Debug, Clone, Default)]
pub struct LightSources {
    sources: Vec<LightSource>,
}

impl LightSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full rescan of the grid. Keeps the allocation between frames.
    pub fn rebuild(&mut self, grid: &TileGrid) {
        self.sources.clear();
        self.sources.extend(
            grid.iter()
                .filter(|&(_, _, kind)| kind == TileKind::Light)
                .map(|(x, y, _)| LightSource { x, y }),
        );
    }

    /// Build a fresh index from the grid.
    pub fn from_grid(grid: &TileGrid) -> Self {
        let mut sources = Self::new();
        sources.rebuild(grid);
        sources
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightSource> {
        self.sources.iter()
    }

    pub fn as_slice(&self) -> &[LightSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Per-cell light level, row-major, same dimensions as the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityMap {
    width: u32,
    height: u32,
    levels: Vec<f32>,
}

impl IntensityMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            levels: vec![0.0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Level at (x, y). Out of bounds reads as unlit.
    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.index(x, y).map_or(0.0, |i| self.levels[i])
    }

    /// Keep the brighter of the current level and `level`.
    #[inline]
    pub fn merge_max(&mut self, x: i32, y: i32, level: f32) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.levels[i];
            *cell = cell.max(level);
        }
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.levels.fill(0.0);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.levels
    }

    /// Pointer to the level data for host-side reads.
    pub fn as_ptr(&self) -> *const f32 {
        self.levels.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Row-major iterator over cells with a non-zero level.
    pub fn lit_cells(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        let width = self.width as usize;
        self.levels
            .iter()
            .enumerate()
            .filter(|(_, &level)| level > 0.0)
            .map(move |(i, &level)| ((i % width) as i32, (i / width) as i32, level))
    }

    /// Brightest level anywhere on the map.
    pub fn max_level_present(&self) -> f32 {
        self.levels.iter().copied().fold(0.0, f32::max)
    }
}

/// Whether the straight line from `source` to (x, y) passes through a solid cell.
///
/// Samples the `steps - 1` points strictly between the endpoints, where
/// `steps` is the Chebyshev distance, flooring each sample to its cell.
/// Neither endpoint is tested, and samples outside the grid never block.
pub fn ray_blocked(grid: &TileGrid, source: LightSource, x: i32, y: i32) -> bool {
    let dx = x - source.x;
    let dy = y - source.y;
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return false;
    }

    let step_x = dx as f64 / steps as f64;
    let step_y = dy as f64 / steps as f64;
    (1..steps).any(|i| {
        let cx = (source.x as f64 + step_x * i as f64).floor() as i32;
        let cy = (source.y as f64 + step_y * i as f64).floor() as i32;
        grid.is_solid_at(cx, cy)
    })
}

/// Contribution of `source` to cell (x, y), or 0.0 when out of range or occluded.
pub fn contribution(
    grid: &TileGrid,
    source: LightSource,
    x: i32,
    y: i32,
    radius: u32,
    max_level: f32,
) -> f32 {
    let dx = (x - source.x) as f64;
    let dy = (y - source.y) as f64;
    let distance = (dx * dx + dy * dy).sqrt();
    let radius = radius as f64;

    if distance > radius || ray_blocked(grid, source, x, y) {
        return 0.0;
    }
    ((1.0 - distance / radius) * max_level as f64) as f32
}

/// Recompute `map` from scratch for every source.
///
/// Each source only visits the square `[s - radius, s + radius)` on both axes,
/// clipped to the grid. `radius` must be non-zero; `GameConfig::validate`
/// rejects zero before the engine ever gets here.
pub fn compute_lighting(
    grid: &TileGrid,
    sources: &LightSources,
    radius: u32,
    max_level: f32,
    map: &mut IntensityMap,
) {
    debug_assert!(radius > 0, "light radius must be non-zero");
    debug_assert_eq!(map.width(), grid.width());
    debug_assert_eq!(map.height(), grid.height());

    map.clear();
    let r = radius as i32;
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    for &source in sources.iter() {
        let y_range = (source.y - r).max(0)..(source.y + r).min(height);
        for y in y_range {
            for x in (source.x - r).max(0)..(source.x + r).min(width) {
                let level = contribution(grid, source, x, y, radius, max_level);
                if level > 0.0 {
                    map.merge_max(x, y, level);
                }
            }
        }
    }
}

/// Light index and intensity map owned together, recomputed once per frame.
#[derive(Debug, Clone)]
pub struct LightState {
    sources: LightSources,
    map: IntensityMap,
}

impl LightState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            sources: LightSources::new(),
            map: IntensityMap::new(width, height),
        }
    }

    /// Rescan the grid for sources, then rebuild the intensity map.
    pub fn recompute(&mut self, grid: &TileGrid, radius: u32, max_level: f32) {
        let previous = self.sources.len();
        self.sources.rebuild(grid);
        if self.sources.len() != previous {
            log::debug!("light sources: {} -> {}", previous, self.sources.len());
        }
        compute_lighting(grid, &self.sources, radius, max_level, &mut self.map);
    }

    pub fn sources(&self) -> &LightSources {
        &self.sources
    }

    pub fn map(&self) -> &IntensityMap {
        &self.map
    }
}
