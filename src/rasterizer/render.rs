//! Core rendering functions
//! Orthographic triangle rasterization with per-pixel cel shading

use super::math::{barycentric, project_orthographic, to_camera_space, Vec3};
use super::types::{Color, RasterSettings};
use crate::camera::CameraView;
use crate::scene::Scene;

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>,  // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.zbuffer.fill(f32::MAX);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f32, color: Color) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if z < self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                let pixel_idx = idx * 4;
                self.pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bytes());
                return true;
            }
        }
        false
    }

    /// Read back a pixel (black outside the buffer)
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color {
                r: self.pixels[idx],
                g: self.pixels[idx + 1],
                b: self.pixels[idx + 2],
                a: self.pixels[idx + 3],
            }
        } else {
            Color::BLACK
        }
    }
}

/// Projected surface (triangle ready for rasterization)
struct Surface {
    v1: Vec3, // Screen-space vertex 1 (z = view depth)
    v2: Vec3,
    v3: Vec3,
    wp1: Vec3, // World position 1
    wp2: Vec3,
    wp3: Vec3,
    wn1: Vec3, // World normal 1
    wn2: Vec3,
    wn3: Vec3,
    material: usize,
}

/// Rasterize a single triangle, cel shading every covered pixel
fn rasterize_triangle(
    fb: &mut Framebuffer,
    surface: &Surface,
    scene: &Scene,
    camera: &CameraView,
    settings: &RasterSettings,
) {
    let Some(material) = scene.materials.get(surface.material) else {
        return;
    };

    // Bounding box
    let min_x = surface.v1.x.min(surface.v2.x).min(surface.v3.x).max(0.0) as usize;
    let max_x = (surface.v1.x.max(surface.v2.x).max(surface.v3.x) + 1.0).min(fb.width as f32) as usize;
    let min_y = surface.v1.y.min(surface.v2.y).min(surface.v3.y).max(0.0) as usize;
    let max_y = (surface.v1.y.max(surface.v2.y).max(surface.v3.y) + 1.0).min(fb.height as f32) as usize;

    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = Vec3::new(x as f32, y as f32, 0.0);
            let bc = barycentric(p, surface.v1, surface.v2, surface.v3);

            // Check if inside triangle
            const ERR: f32 = -0.0001;
            if bc.x < ERR || bc.y < ERR || bc.z < ERR {
                continue;
            }

            let z = bc.x * surface.v1.z + bc.y * surface.v2.z + bc.z * surface.v3.z;

            if settings.use_zbuffer && z >= fb.zbuffer[y * fb.width + x] {
                continue;
            }

            let normal = surface.wn1 * bc.x + surface.wn2 * bc.y + surface.wn3 * bc.z;
            let position = surface.wp1 * bc.x + surface.wp2 * bc.y + surface.wp3 * bc.z;
            let lit = material.shade(&scene.light, normal, position, camera.position);
            let color = Color::from_linear(lit);

            if settings.use_zbuffer {
                fb.set_pixel_with_depth(x, y, z, color);
            } else {
                fb.set_pixel(x, y, color);
            }
        }
    }
}

/// Render every face of `scene` through an orthographic camera into `fb`
pub fn render_scene(fb: &mut Framebuffer, scene: &Scene, camera: &CameraView, settings: &RasterSettings) {
    fb.clear(scene.clear_color);

    // Transform and project all vertices
    let projected: Vec<Vec3> = scene
        .vertices
        .iter()
        .map(|v| {
            let cam_pos = to_camera_space(v.pos - camera.position, camera.right, camera.up, camera.forward);
            project_orthographic(
                cam_pos,
                camera.half_width,
                camera.half_height,
                settings.vertex_snap,
                fb.width,
                fb.height,
            )
        })
        .collect();

    let mut surfaces: Vec<Surface> = Vec::with_capacity(scene.faces.len());

    for face in &scene.faces {
        let (Some(v1), Some(v2), Some(v3)) = (
            projected.get(face.v0),
            projected.get(face.v1),
            projected.get(face.v2),
        ) else {
            continue;
        };

        // Depth clipping against the near/far planes
        let in_range = |z: f32| z >= camera.near && z <= camera.far;
        if !(in_range(v1.z) && in_range(v2.z) && in_range(v3.z)) {
            continue;
        }

        let a = &scene.vertices[face.v0];
        let b = &scene.vertices[face.v1];
        let c = &scene.vertices[face.v2];

        // Orthographic: every face looking along the view direction is a back face
        if settings.backface_cull {
            let facing = (a.normal + b.normal + c.normal).normalize();
            if facing.dot(camera.forward) > 0.0 {
                continue;
            }
        }

        surfaces.push(Surface {
            v1: *v1,
            v2: *v2,
            v3: *v3,
            wp1: a.pos,
            wp2: b.pos,
            wp3: c.pos,
            wn1: a.normal,
            wn2: b.normal,
            wn3: c.normal,
            material: face.material,
        });
    }

    // Sort far-to-near if not using Z-buffer (painter's algorithm)
    if !settings.use_zbuffer {
        surfaces.sort_by(|a, b| {
            let a_max_z = a.v1.z.max(a.v2.z).max(a.v3.z);
            let b_max_z = b.v1.z.max(b.v2.z).max(b.v3.z);
            b_max_z.total_cmp(&a_max_z)
        });
    }

    for surface in &surfaces {
        rasterize_triangle(fb, surface, scene, camera, settings);
    }
}
