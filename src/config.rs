//! Viewer configuration
//!
//! Uses RON (Rusty Object Notation) so the tuning constants can be edited
//! by hand. Every field has a built-in default; a config file only needs
//! to list what it overrides.

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::camera::{Lens, ZoomState};
use crate::rasterizer::{Color, RasterSettings, Vec3, HEIGHT, WIDTH};
use crate::shading::DirectionalLight;

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tuning constants for one viewer instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Offscreen surface resolution (pixels)
    pub surface_width: usize,
    pub surface_height: usize,
    /// Vertical frustum extent at zoom level 1 (world units)
    pub base_frustum_size: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    /// Allowed zoom levels, strictly ascending
    pub zoom_levels: Vec<f32>,
    pub zoom_start_index: usize,
    /// Fraction of the remaining distance covered per tick
    pub zoom_smoothing: f32,
    /// Pixel units added to the pan accumulator per tick while a direction is held
    pub pan_speed: f32,
    /// Horizontal drag distance (device pixels) per rotation step
    pub rotation_threshold_px: f32,
    pub rotation_step_degrees: f32,
    /// Fixed downward camera tilt (degrees below horizontal)
    pub tilt_degrees: f32,
    /// Direction the light travels
    pub light_direction: Vec3,
    pub light_color: Vec3,
    pub clear_color: [u8; 3],
    /// Floor projected vertices to whole offscreen pixels
    pub vertex_snap: bool,
    /// Depth test per pixel; false sorts faces far-to-near instead
    pub use_zbuffer: bool,
    pub backface_cull: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            surface_width: WIDTH,
            surface_height: HEIGHT,
            base_frustum_size: 10.0,
            aspect_ratio: WIDTH as f32 / HEIGHT as f32,
            near: 0.1,
            far: 100.0,
            zoom_levels: vec![0.5, 1.0, 2.0, 4.0],
            zoom_start_index: 1,
            zoom_smoothing: 0.1,
            pan_speed: 1.0,
            rotation_threshold_px: 40.0,
            rotation_step_degrees: 45.0,
            tilt_degrees: 30.0,
            light_direction: Vec3::new(-0.4, -1.0, -0.6),
            light_color: Vec3::ONE,
            clear_color: [24, 22, 36],
            vertex_snap: true,
            use_zbuffer: true,
            backface_cull: true,
        }
    }
}

impl ViewerConfig {
    /// Load and validate a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse and validate a config from a RON string
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed RON (used to write out a starter config)
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let finite3 = |v: Vec3| v.x.is_finite() && v.y.is_finite() && v.z.is_finite();

        if self.surface_width == 0 || self.surface_height == 0 {
            return invalid(format!(
                "surface resolution {}x{} has a zero dimension",
                self.surface_width, self.surface_height
            ));
        }
        if !positive(self.base_frustum_size) {
            return invalid(format!("base_frustum_size must be positive, got {}", self.base_frustum_size));
        }
        if !positive(self.aspect_ratio) {
            return invalid(format!("aspect_ratio must be positive, got {}", self.aspect_ratio));
        }
        // Pixel sizes come from the surface height alone, so world pixels
        // are only square when the frustum matches the surface shape
        let surface_aspect = self.surface_width as f32 / self.surface_height as f32;
        if (self.aspect_ratio - surface_aspect).abs() > surface_aspect * 1e-3 {
            return invalid(format!(
                "aspect_ratio {} does not match the {}x{} surface ({})",
                self.aspect_ratio, self.surface_width, self.surface_height, surface_aspect
            ));
        }
        if !(self.near.is_finite() && self.far.is_finite() && self.near >= 0.0 && self.near < self.far) {
            return invalid(format!("near ({}) must be >= 0 and below far ({})", self.near, self.far));
        }
        if self.zoom_levels.is_empty() {
            return invalid("zoom_levels is empty".to_string());
        }
        if let Some(bad) = self.zoom_levels.iter().find(|&&l| !positive(l)) {
            return invalid(format!("zoom level {} is not positive", bad));
        }
        if self.zoom_levels.windows(2).any(|w| w[0] >= w[1]) {
            return invalid(format!("zoom_levels {:?} are not strictly ascending", self.zoom_levels));
        }
        if self.zoom_start_index >= self.zoom_levels.len() {
            return invalid(format!(
                "zoom_start_index {} out of range for {} levels",
                self.zoom_start_index,
                self.zoom_levels.len()
            ));
        }
        if !(self.zoom_smoothing > 0.0 && self.zoom_smoothing <= 1.0) {
            return invalid(format!("zoom_smoothing must be in (0, 1], got {}", self.zoom_smoothing));
        }
        if !positive(self.pan_speed) {
            return invalid(format!("pan_speed must be positive, got {}", self.pan_speed));
        }
        if !positive(self.rotation_threshold_px) {
            return invalid(format!(
                "rotation_threshold_px must be positive, got {}",
                self.rotation_threshold_px
            ));
        }
        if !(self.rotation_step_degrees > 0.0 && self.rotation_step_degrees <= 360.0) {
            return invalid(format!(
                "rotation_step_degrees must be in (0, 360], got {}",
                self.rotation_step_degrees
            ));
        }
        if !(self.tilt_degrees > 0.0 && self.tilt_degrees < 90.0) {
            return invalid(format!("tilt_degrees must be in (0, 90), got {}", self.tilt_degrees));
        }
        if !finite3(self.light_direction) || self.light_direction.len() == 0.0 {
            return invalid(format!("light_direction {:?} is not a usable direction", self.light_direction));
        }
        if !finite3(self.light_color) {
            return invalid(format!("light_color {:?} is not finite", self.light_color));
        }
        Ok(())
    }

    pub fn lens(&self) -> Lens {
        Lens {
            base_size: self.base_frustum_size,
            aspect: self.aspect_ratio,
            near: self.near,
            far: self.far,
            tilt_degrees: self.tilt_degrees,
        }
    }

    pub fn zoom_state(&self) -> ZoomState {
        ZoomState::new(self.zoom_levels.clone(), self.zoom_start_index, self.zoom_smoothing)
    }

    pub fn light(&self) -> DirectionalLight {
        DirectionalLight::new(self.light_direction, self.light_color)
    }

    pub fn raster_settings(&self) -> RasterSettings {
        RasterSettings {
            vertex_snap: self.vertex_snap,
            use_zbuffer: self.use_zbuffer,
            backface_cull: self.backface_cull,
        }
    }

    pub fn clear_color(&self) -> Color {
        let [r, g, b] = self.clear_color;
        Color::new(r, g, b)
    }
}
