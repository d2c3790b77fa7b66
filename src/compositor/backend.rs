//! macroquad render backend
//!
//! Pass 1 runs the software rasterizer into the surface's framebuffer.
//! Pass 2 uploads the pixels as a texture and draws it letterboxed.

use macroquad::prelude::{
    clear_background, draw_texture_ex, screen_height, screen_width, Color as MqColor, DrawTextureParams,
    FilterMode, Texture2D, Vec2 as MqVec2, WHITE,
};

use super::{fit_quad, CompositingQuad, CompositorError, OffscreenSurface, RenderBackend};
use crate::camera::CameraView;
use crate::rasterizer::{render_scene, RasterSettings};
use crate::scene::Scene;

pub struct MacroquadBackend {
    pub settings: RasterSettings,
    /// Window color around the letterboxed quad
    pub border: MqColor,
}

impl MacroquadBackend {
    pub fn new(settings: RasterSettings) -> Self {
        Self {
            settings,
            border: MqColor::from_rgba(8, 8, 10, 255),
        }
    }
}

impl RenderBackend for MacroquadBackend {
    fn create_offscreen_surface(
        &mut self,
        width: usize,
        height: usize,
        filter: FilterMode,
    ) -> Result<OffscreenSurface, CompositorError> {
        // Texture2D::from_rgba8 takes u16 dimensions
        if width == 0 || height == 0 || width > u16::MAX as usize || height > u16::MAX as usize {
            return Err(CompositorError::InvalidSize { width, height });
        }
        Ok(OffscreenSurface::new(width, height, filter))
    }

    fn render_scene_pass(&mut self, scene: &Scene, view: &CameraView, target: &mut OffscreenSurface) {
        render_scene(&mut target.framebuffer, scene, view, &self.settings);
    }

    fn render_quad_pass(&mut self, source: &OffscreenSurface, quad: &CompositingQuad) {
        let fb = &source.framebuffer;
        let placement = fit_quad(fb.width, fb.height, screen_width(), screen_height(), quad);

        clear_background(self.border);

        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(source.filter);

        draw_texture_ex(
            &texture,
            placement.x,
            placement.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(MqVec2::new(placement.w, placement.h)),
                ..Default::default()
            },
        );
    }
}
