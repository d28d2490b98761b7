//! Tile grid: the single source of truth for collision and light occlusion.
//!
//! Cells are stored in row-major order: index = y * width + x.
//! Dimensions are fixed at construction; the grid is never resized.

/// Content of a single grid cell.
///
/// The `u8` discriminants are the wire codes the host sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Empty = 0,
    Dirt = 1,
    Stone = 2,
    Grass = 3,
    Light = 4,
}

impl TileKind {
    pub const ALL: [TileKind; 5] = [
        TileKind::Empty,
        TileKind::Dirt,
        TileKind::Stone,
        TileKind::Grass,
        TileKind::Light,
    ];

    /// Decode a wire code. Unknown codes return `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Wire code for this tile.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the tile blocks movement and light.
    ///
    /// Collision and occlusion both go through this one predicate.
    /// A light fixture is passable and casts no shadow of itself.
    pub fn is_solid(self) -> bool {
        !matches!(self, TileKind::Empty | TileKind::Light)
    }

    /// Base fill color as linear RGB in [0, 1].
    pub fn color(self) -> [f32; 3] {
        match self {
            TileKind::Empty => hex_rgb(0x11, 0x11, 0x11),
            TileKind::Dirt => hex_rgb(0x55, 0x55, 0x55),
            TileKind::Stone => hex_rgb(0x77, 0x77, 0x77),
            TileKind::Grass => hex_rgb(0x33, 0x66, 0x33),
            TileKind::Light => hex_rgb(0xFF, 0xFF, 0x00),
        }
    }
}

fn hex_rgb(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// Fixed-size grid of tiles.
///
/// Coordinates are signed so callers can probe neighbours and ray samples
/// without pre-clamping; anything outside `[0, width) x [0, height)` reads as
/// "no tile" and is never indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Create an all-empty grid.
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![TileKind::Empty; count],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether (x, y) lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Tile at (x, y), or `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<TileKind> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Overwrite the tile at (x, y). Returns false (and does nothing) when out of bounds.
    pub fn set(&mut self, x: i32, y: i32, kind: TileKind) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Solid test used by both collision and occlusion. Out of bounds is never solid.
    #[inline]
    pub fn is_solid_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(TileKind::is_solid)
    }

    /// Fill a rectangular region, clipped to the grid.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, kind: TileKind) {
        for ty in y..y.saturating_add(h as i32) {
            for tx in x..x.saturating_add(w as i32) {
                self.set(tx, ty, kind);
            }
        }
    }

    /// Number of cells holding `kind`.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }

    /// Row-major iterator over `(x, y, kind)`.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, TileKind)> + '_ {
        let width = self.width as usize;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &kind)| ((i % width) as i32, (i / width) as i32, kind))
    }

    /// Total cell count.
    pub fn capacity(&self) -> usize {
        self.tiles.len()
    }

    /// Convert a pixel position to the containing cell (floor division).
    pub fn world_to_tile(&self, px: f32, py: f32, tile_size: f32) -> Option<(i32, i32)> {
        let tx = (px / tile_size).floor();
        let ty = (py / tile_size).floor();
        if !tx.is_finite() || !ty.is_finite() {
            return None;
        }
        let (tx, ty) = (tx as i32, ty as i32);
        self.in_bounds(tx, ty).then_some((tx, ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = TileGrid::new(10, 8);
        assert_eq!(grid.capacity(), 80);
        assert_eq!(grid.count(TileKind::Empty), 80);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 8);
    }

    #[test]
    fn set_and_get_tile() {
        let mut grid = TileGrid::new(5, 5);
        assert!(grid.set(2, 3, TileKind::Stone));
        assert_eq!(grid.get(2, 3), Some(TileKind::Stone));
        assert_eq!(grid.get(3, 2), Some(TileKind::Empty));
    }

    #[test]
    fn out_of_bounds_reads_none_and_writes_are_ignored() {
        let mut grid = TileGrid::new(5, 5);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 5), None);
        assert_eq!(grid.get(5, 0), None);
        assert!(!grid.set(-1, -1, TileKind::Dirt));
        assert!(!grid.set(7, 1, TileKind::Dirt));
        assert_eq!(grid.count(TileKind::Dirt), 0);
    }

    #[test]
    fn solidity_excludes_empty_and_light() {
        assert!(!TileKind::Empty.is_solid());
        assert!(!TileKind::Light.is_solid());
        assert!(TileKind::Dirt.is_solid());
        assert!(TileKind::Stone.is_solid());
        assert!(TileKind::Grass.is_solid());
    }

    #[test]
    fn is_solid_at_is_false_outside_grid() {
        let mut grid = TileGrid::new(3, 3);
        grid.fill_rect(0, 0, 3, 3, TileKind::Stone);
        assert!(grid.is_solid_at(1, 1));
        assert!(!grid.is_solid_at(-1, 1));
        assert!(!grid.is_solid_at(1, 3));
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut grid = TileGrid::new(10, 10);
        grid.fill_rect(8, 8, 5, 5, TileKind::Dirt);
        assert_eq!(grid.count(TileKind::Dirt), 4);
        grid.fill_rect(-2, -2, 3, 3, TileKind::Grass);
        assert_eq!(grid.count(TileKind::Grass), 1);
    }

    #[test]
    fn codes_round_trip_and_reject_unknown() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(TileKind::from_code(5), None);
    }

    #[test]
    fn iter_is_row_major() {
        let mut grid = TileGrid::new(3, 2);
        grid.set(2, 0, TileKind::Light);
        grid.set(0, 1, TileKind::Light);
        let lights: Vec<_> = grid
            .iter()
            .filter(|&(_, _, k)| k == TileKind::Light)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(lights, vec![(2, 0), (0, 1)]);
    }

    #[test]
    fn world_to_tile_floors_and_rejects_outside() {
        let grid = TileGrid::new(10, 10);
        assert_eq!(grid.world_to_tile(0.0, 0.0, 32.0), Some((0, 0)));
        assert_eq!(grid.world_to_tile(63.9, 32.0, 32.0), Some((1, 1)));
        assert_eq!(grid.world_to_tile(-0.5, 10.0, 32.0), None);
        assert_eq!(grid.world_to_tile(320.0, 10.0, 32.0), None);
    }
}
