//! Pixel grid quantization

use super::Frustum;
use crate::rasterizer::Vec3;

/// World-space size of one offscreen pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    /// World units per pixel on the lateral and vertical axes
    pub units_per_pixel: f32,
    /// World units per pixel along the ground-plane forward axis
    pub tilt_adjusted_units_per_pixel: f32,
}

/// Compute pixel sizes for `frustum` rendered `offscreen_height` pixels tall.
///
/// The forward axis is stretched by `tan(90° - tilt)` so a one-pixel depth
/// step on the tilted ground plane still lands on exactly one texel.
pub fn compute_pixel_scale(frustum: &Frustum, offscreen_height: usize) -> PixelScale {
    let units_per_pixel = (frustum.top() - frustum.bottom()) / offscreen_height as f32;
    let tilt_degrees = frustum.tilt.to_degrees();
    let tilt_adjusted = units_per_pixel * (90.0 - tilt_degrees).to_radians().tan();

    PixelScale {
        units_per_pixel,
        tilt_adjusted_units_per_pixel: tilt_adjusted,
    }
}

/// Round `value` to the nearest multiple of `pixel_size`
pub fn snap(value: f32, pixel_size: f32) -> f32 {
    (value / pixel_size).round() * pixel_size
}

/// `snap` applied per component
pub fn snap_vec3(v: Vec3, pixel_size: f32) -> Vec3 {
    v.map(|c| snap(c, pixel_size))
}
