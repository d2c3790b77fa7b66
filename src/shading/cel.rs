//! Cel lighting: diffuse and specular terms quantized through ramps

use std::sync::Arc;

use super::RampTable;
use crate::rasterizer::Vec3;

/// The single directional light of a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels (from the light toward the scene), normalized
    pub direction: Vec3,
    /// Linear RGB
    pub color: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
            color,
        }
    }
}

/// Optional banded highlight of a material
#[derive(Debug, Clone)]
pub struct SpecularBand {
    pub ramp: Arc<RampTable>,
    pub color: Vec3,
    pub glossiness: f32,
}

/// Surface description consumed by the cel evaluator
#[derive(Debug, Clone)]
pub struct CelMaterial {
    pub tint: Vec3,
    pub diffuse_ramp: Arc<RampTable>,
    /// `None` disables the specular term
    pub specular: Option<SpecularBand>,
}

impl CelMaterial {
    pub fn new(tint: Vec3, diffuse_ramp: Arc<RampTable>) -> Self {
        Self {
            tint,
            diffuse_ramp,
            specular: None,
        }
    }

    pub fn with_specular(mut self, ramp: Arc<RampTable>, color: Vec3, glossiness: f32) -> Self {
        self.specular = Some(SpecularBand {
            ramp,
            color,
            glossiness,
        });
        self
    }

    /// Evaluate the lit color of a surface point.
    ///
    /// `tint * diffuse * light.color`, plus `specular.color * specular` when
    /// the material has a specular band. Not clamped.
    pub fn shade(
        &self,
        light: &DirectionalLight,
        normal: Vec3,
        surface_position: Vec3,
        camera_position: Vec3,
    ) -> Vec3 {
        let normal = normal.normalize();
        let brightness = diffuse_term(&self.diffuse_ramp, normal, light.direction);
        let mut color = self.tint.modulate(light.color) * brightness;

        if let Some(spec) = &self.specular {
            let view_dir = (camera_position - surface_position).normalize();
            let factor = specular_term(&spec.ramp, normal, light.direction, view_dir, spec.glossiness);
            color += spec.color * factor;
        }

        color
    }
}

/// `ramp(max(n · -L, 0))`
pub fn diffuse_term(ramp: &RampTable, normal: Vec3, light_direction: Vec3) -> f32 {
    ramp.sample(normal.dot(-light_direction).max(0.0))
}

/// `ramp(max(n · h, 0) ^ glossiness)` with `h = normalize(-L + V)`
pub fn specular_term(
    ramp: &RampTable,
    normal: Vec3,
    light_direction: Vec3,
    view_direction: Vec3,
    glossiness: f32,
) -> f32 {
    let half = (-light_direction + view_direction).normalize();
    ramp.sample(normal.dot(half).max(0.0).powf(glossiness))
}
