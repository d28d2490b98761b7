pub mod lighting;
pub mod render;
