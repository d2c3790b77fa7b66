//! Pixel Diorama: pixel-perfect orthographic viewer
//!
//! Renders a small 3D scene at a fixed low resolution and scales it up
//! without shimmering:
//! - Camera pivot moves in whole offscreen pixels only
//! - Sub-pixel pan is shown by shifting the upscaled quad instead
//! - Discrete zoom levels with smoothed transitions
//! - 45 degree yaw steps from horizontal drags
//! - Cel shading through ramp lookup tables

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod camera;
pub mod capture;
pub mod compositor;
pub mod config;
pub mod input;
pub mod rasterizer;
pub mod scene;
pub mod shading;
pub mod viewer;
