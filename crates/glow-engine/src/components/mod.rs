pub mod tilemap;
pub mod player;
