//! Scene content handed to the offscreen pass
//!
//! Flat triangle soup with one material per face and a single directional
//! light. `Scene::diorama` builds the demo shown by the viewer binary.

use std::sync::Arc;

use crate::rasterizer::{Color, Face, Vec3, Vertex};
use crate::shading::{CelMaterial, DirectionalLight, RampError, RampTable};

pub struct Scene {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub materials: Vec<CelMaterial>,
    pub light: DirectionalLight,
    pub clear_color: Color,
}

impl Scene {
    pub fn new(light: DirectionalLight, clear_color: Color) -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            materials: Vec::new(),
            light,
            clear_color,
        }
    }

    /// Register a material, returning its index for `Face::material`
    pub fn add_material(&mut self, material: CelMaterial) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add an axis-aligned box with per-face normals
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, material: usize) {
        let h = half_extents;
        let corner = |sx: f32, sy: f32, sz: f32| center + Vec3::new(sx * h.x, sy * h.y, sz * h.z);

        // Counter-clockwise seen from outside
        let sides = [
            // Front (+Z)
            (Vec3::new(0.0, 0.0, 1.0), [(-1.0, -1.0, 1.0), (1.0, -1.0, 1.0), (1.0, 1.0, 1.0), (-1.0, 1.0, 1.0)]),
            // Back (-Z)
            (Vec3::new(0.0, 0.0, -1.0), [(1.0, -1.0, -1.0), (-1.0, -1.0, -1.0), (-1.0, 1.0, -1.0), (1.0, 1.0, -1.0)]),
            // Top (+Y)
            (Vec3::new(0.0, 1.0, 0.0), [(-1.0, 1.0, 1.0), (1.0, 1.0, 1.0), (1.0, 1.0, -1.0), (-1.0, 1.0, -1.0)]),
            // Bottom (-Y)
            (Vec3::new(0.0, -1.0, 0.0), [(-1.0, -1.0, -1.0), (1.0, -1.0, -1.0), (1.0, -1.0, 1.0), (-1.0, -1.0, 1.0)]),
            // Right (+X)
            (Vec3::new(1.0, 0.0, 0.0), [(1.0, -1.0, 1.0), (1.0, -1.0, -1.0), (1.0, 1.0, -1.0), (1.0, 1.0, 1.0)]),
            // Left (-X)
            (Vec3::new(-1.0, 0.0, 0.0), [(-1.0, -1.0, -1.0), (-1.0, -1.0, 1.0), (-1.0, 1.0, 1.0), (-1.0, 1.0, -1.0)]),
        ];

        for (normal, quad) in sides {
            let base = self.vertices.len();
            for (sx, sy, sz) in quad {
                self.vertices.push(Vertex::new(corner(sx, sy, sz), normal));
            }
            // Two triangles per face
            self.faces.push(Face::new(base, base + 1, base + 2, material));
            self.faces.push(Face::new(base, base + 2, base + 3, material));
        }
    }

    /// Demo scene: a ground slab with a few banded blocks, one of them shiny
    pub fn diorama(light: DirectionalLight, clear_color: Color) -> Result<Self, RampError> {
        let mut scene = Scene::new(light, clear_color);

        let three_band = Arc::new(RampTable::build(&[70, 170], &[90, 170, 255])?);
        let two_band = Arc::new(RampTable::build(&[128], &[80, 255])?);
        let highlight = Arc::new(RampTable::build(&[230], &[0, 255])?);

        let ground = scene.add_material(CelMaterial::new(
            Vec3::new(0.36, 0.55, 0.30),
            two_band.clone(),
        ));
        let stone = scene.add_material(CelMaterial::new(
            Vec3::new(0.62, 0.60, 0.66),
            three_band.clone(),
        ));
        let roof = scene.add_material(CelMaterial::new(
            Vec3::new(0.75, 0.28, 0.22),
            three_band,
        ));
        let crystal = scene.add_material(
            CelMaterial::new(Vec3::new(0.25, 0.45, 0.85), two_band)
                .with_specular(highlight, Vec3::new(0.6, 0.6, 0.6), 24.0),
        );

        scene.add_box(Vec3::new(0.0, -0.25, 0.0), Vec3::new(6.0, 0.25, 6.0), ground);
        scene.add_box(Vec3::new(-2.0, 1.0, -1.5), Vec3::new(1.25, 1.0, 1.0), stone);
        scene.add_box(Vec3::new(-2.0, 2.25, -1.5), Vec3::new(1.5, 0.25, 1.25), roof);
        scene.add_box(Vec3::new(2.5, 0.75, 1.5), Vec3::new(0.5, 0.75, 0.5), crystal);
        scene.add_box(Vec3::new(1.0, 0.25, -3.5), Vec3::new(0.75, 0.25, 0.75), stone);

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> DirectionalLight {
        DirectionalLight::new(Vec3::new(-0.4, -1.0, -0.3), Vec3::ONE)
    }

    #[test]
    fn test_box_has_twelve_triangles() {
        let mut scene = Scene::new(light(), Color::BLACK);
        let m = scene.add_material(CelMaterial::new(Vec3::ONE, Arc::new(RampTable::constant(255))));
        scene.add_box(Vec3::ZERO, Vec3::ONE, m);
        assert_eq!(scene.vertices.len(), 24);
        assert_eq!(scene.faces.len(), 12);
        assert!(scene.faces.iter().all(|f| f.material == m));
    }

    #[test]
    fn test_box_winding_matches_normals() {
        let mut scene = Scene::new(light(), Color::BLACK);
        scene.add_box(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 2.0), 0);
        for face in &scene.faces {
            let a = scene.vertices[face.v0].pos;
            let b = scene.vertices[face.v1].pos;
            let c = scene.vertices[face.v2].pos;
            let geometric = (b - a).cross(c - a).normalize();
            assert!(geometric.dot(scene.vertices[face.v0].normal) > 0.99);
        }
    }

    #[test]
    fn test_diorama_builds() {
        let scene = Scene::diorama(light(), Color::new(20, 20, 30)).unwrap();
        assert_eq!(scene.materials.len(), 4);
        assert!(scene.materials.iter().filter(|m| m.specular.is_some()).count() == 1);
        assert!(scene.faces.iter().all(|f| f.material < scene.materials.len()));
    }
}
