//! Low-resolution software rasterizer
//!
//! Draws the scene into a fixed-size RGBA framebuffer:
//! - Orthographic projection only
//! - Optional vertex snapping to whole pixels
//! - Per-pixel cel shading through ramp tables
//! - Z-buffer or painter's algorithm

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Default offscreen resolution
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
