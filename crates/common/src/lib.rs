//! Shared types for the volition engine: packed pixels, integer vectors,
//! and the small amount of math the kernel and rasterizer agree on.

pub mod math;
pub mod types;

pub use types::{ColorArgb, Vec2i};
