//! Two-pass compositor
//!
//! Pass 1 renders the scene into a fixed-resolution offscreen surface.
//! Pass 2 draws that surface onto the window as a single quad, sampled with
//! nearest filtering and shifted by the sub-pixel pan residual. The surface
//! resolution never follows the window size, which keeps pixel edges crisp
//! at any display scale.

mod backend;

pub use backend::*;

use macroquad::prelude::FilterMode;

use crate::camera::{CameraView, PixelScale};
use crate::rasterizer::{Framebuffer, Vec2};
use crate::scene::Scene;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositorError {
    /// Surface dimensions the backend cannot allocate
    InvalidSize { width: usize, height: usize },
}

impl std::fmt::Display for CompositorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompositorError::InvalidSize { width, height } => {
                write!(f, "cannot create a {}x{} offscreen surface", width, height)
            }
        }
    }
}

impl std::error::Error for CompositorError {}

/// Render target for pass 1, source texture for pass 2
pub struct OffscreenSurface {
    pub framebuffer: Framebuffer,
    /// Sampling used when the surface is drawn in pass 2
    pub filter: FilterMode,
}

impl OffscreenSurface {
    pub fn new(width: usize, height: usize, filter: FilterMode) -> Self {
        Self {
            framebuffer: Framebuffer::new(width, height),
            filter,
        }
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height
    }
}

/// Fullscreen quad showing the offscreen surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositingQuad {
    /// Displacement in world units (x = camera right, y = up)
    pub offset: Vec2,
    /// World units covered by one offscreen pixel this frame
    pub units_per_pixel: f32,
}

impl CompositingQuad {
    /// Offset in offscreen pixels
    pub fn pixel_offset(&self) -> Vec2 {
        Vec2::new(
            self.offset.x / self.units_per_pixel,
            self.offset.y / self.units_per_pixel,
        )
    }
}

/// Where the quad lands on screen, in window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadPlacement {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Letterbox the surface into the window keeping its aspect ratio, then
/// shift it by the quad offset scaled to displayed pixels.
pub fn fit_quad(
    surface_width: usize,
    surface_height: usize,
    screen_width: f32,
    screen_height: f32,
    quad: &CompositingQuad,
) -> QuadPlacement {
    let surface_aspect = surface_width as f32 / surface_height as f32;
    let screen_aspect = screen_width / screen_height;
    let (w, h, x, y) = if surface_aspect > screen_aspect {
        let w = screen_width;
        let h = screen_width / surface_aspect;
        (w, h, 0.0, (screen_height - h) * 0.5)
    } else {
        let h = screen_height;
        let w = screen_height * surface_aspect;
        (w, h, (screen_width - w) * 0.5, 0.0)
    };

    let scale = h / surface_height as f32;
    let px = quad.pixel_offset();

    // World up is screen up; window rows grow downward
    QuadPlacement {
        x: x + px.x * scale,
        y: y - px.y * scale,
        w,
        h,
    }
}

/// Drawing services the compositor depends on
pub trait RenderBackend {
    fn create_offscreen_surface(
        &mut self,
        width: usize,
        height: usize,
        filter: FilterMode,
    ) -> Result<OffscreenSurface, CompositorError>;

    /// Pass 1: scene through the camera into the offscreen surface
    fn render_scene_pass(&mut self, scene: &Scene, view: &CameraView, target: &mut OffscreenSurface);

    /// Pass 2: offscreen surface onto the visible framebuffer
    fn render_quad_pass(&mut self, source: &OffscreenSurface, quad: &CompositingQuad);
}

/// Owns the offscreen surface and the quad that presents it
pub struct Compositor {
    surface: OffscreenSurface,
    quad: CompositingQuad,
}

impl Compositor {
    /// Allocate the offscreen surface. Always nearest-filtered.
    pub fn new<B: RenderBackend + ?Sized>(
        backend: &mut B,
        width: usize,
        height: usize,
    ) -> Result<Self, CompositorError> {
        let surface = backend.create_offscreen_surface(width, height, FilterMode::Nearest)?;
        Ok(Self {
            surface,
            quad: CompositingQuad {
                offset: Vec2::ZERO,
                units_per_pixel: 1.0,
            },
        })
    }

    /// Run both passes for one tick, scene first
    pub fn render_frame<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        scene: &Scene,
        view: &CameraView,
        quad_offset: Vec2,
        scale: &PixelScale,
    ) {
        self.quad = CompositingQuad {
            offset: quad_offset,
            units_per_pixel: scale.units_per_pixel,
        };
        backend.render_scene_pass(scene, view, &mut self.surface);
        backend.render_quad_pass(&self.surface, &self.quad);
    }

    pub fn surface(&self) -> &OffscreenSurface {
        &self.surface
    }

    pub fn quad(&self) -> &CompositingQuad {
        &self.quad
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::camera::{compute_pixel_scale, CameraPose, Frustum, Lens};
    use crate::rasterizer::{Color, Vec3};
    use crate::shading::DirectionalLight;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Create(usize, usize, FilterMode),
        Scene { yaw_forward: Vec3 },
        Quad(CompositingQuad),
    }

    /// Backend that only records what it was asked to do
    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub calls: Vec<Call>,
    }

    impl RenderBackend for RecordingBackend {
        fn create_offscreen_surface(
            &mut self,
            width: usize,
            height: usize,
            filter: FilterMode,
        ) -> Result<OffscreenSurface, CompositorError> {
            self.calls.push(Call::Create(width, height, filter));
            if width == 0 || height == 0 {
                return Err(CompositorError::InvalidSize { width, height });
            }
            Ok(OffscreenSurface::new(width, height, filter))
        }

        fn render_scene_pass(&mut self, _scene: &Scene, view: &CameraView, _target: &mut OffscreenSurface) {
            self.calls.push(Call::Scene { yaw_forward: view.forward });
        }

        fn render_quad_pass(&mut self, _source: &OffscreenSurface, quad: &CompositingQuad) {
            self.calls.push(Call::Quad(*quad));
        }
    }

    fn lens() -> Lens {
        Lens {
            base_size: 10.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 100.0,
            tilt_degrees: 30.0,
        }
    }

    #[test]
    fn test_surface_is_nearest_filtered() {
        let mut backend = RecordingBackend::default();
        let compositor = Compositor::new(&mut backend, 320, 240).unwrap();
        assert_eq!(backend.calls, vec![Call::Create(320, 240, FilterMode::Nearest)]);
        assert_eq!(compositor.surface().width(), 320);
        assert_eq!(compositor.surface().height(), 240);
    }

    #[test]
    fn test_surface_failure_propagates() {
        let mut backend = RecordingBackend::default();
        let err = Compositor::new(&mut backend, 0, 240).err();
        assert_eq!(err, Some(CompositorError::InvalidSize { width: 0, height: 240 }));
    }

    #[test]
    fn test_scene_pass_runs_before_quad_pass_once_each() {
        let mut backend = RecordingBackend::default();
        let mut compositor = Compositor::new(&mut backend, 320, 240).unwrap();
        backend.calls.clear();

        let frustum = Frustum::from_zoom(&lens(), 1.0);
        let scale = compute_pixel_scale(&frustum, 240);
        let view = CameraView::attach(&CameraPose::new(Vec3::ZERO, 45.0), &frustum);
        let scene = Scene::new(DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0), Vec3::ONE), Color::BLACK);
        let offset = Vec2::new(-0.4 * scale.units_per_pixel, 0.0);

        compositor.render_frame(&mut backend, &scene, &view, offset, &scale);

        assert_eq!(backend.calls.len(), 2);
        assert!(matches!(backend.calls[0], Call::Scene { .. }));
        match &backend.calls[1] {
            Call::Quad(quad) => {
                assert!((quad.pixel_offset().x + 0.4).abs() < 1e-5);
                assert!((quad.units_per_pixel - scale.units_per_pixel).abs() < 1e-7);
            }
            other => panic!("expected quad pass, got {:?}", other),
        }
    }

    #[test]
    fn test_fit_quad_letterboxes_wide_window() {
        let quad = CompositingQuad { offset: Vec2::ZERO, units_per_pixel: 0.5 };
        let placed = fit_quad(320, 240, 1920.0, 960.0, &quad);
        assert!((placed.h - 960.0).abs() < 1e-4);
        assert!((placed.w - 1280.0).abs() < 1e-4);
        assert!((placed.x - 320.0).abs() < 1e-4);
        assert!(placed.y.abs() < 1e-4);
    }

    #[test]
    fn test_fit_quad_letterboxes_tall_window() {
        let quad = CompositingQuad { offset: Vec2::ZERO, units_per_pixel: 0.5 };
        let placed = fit_quad(320, 240, 640.0, 800.0, &quad);
        assert!((placed.w - 640.0).abs() < 1e-4);
        assert!((placed.h - 480.0).abs() < 1e-4);
        assert!((placed.y - 160.0).abs() < 1e-4);
    }

    #[test]
    fn test_fit_quad_offset_scales_with_display() {
        // Half a pixel left and a quarter pixel up, shown at 3x
        let quad = CompositingQuad {
            offset: Vec2::new(-0.25, 0.125),
            units_per_pixel: 0.5,
        };
        let placed = fit_quad(320, 240, 960.0, 720.0, &quad);
        assert!((placed.x + 1.5).abs() < 1e-4);
        assert!((placed.y + 0.75).abs() < 1e-4);
    }
}
