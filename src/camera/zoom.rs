//! Discrete zoom levels with smoothed transitions

use super::{compute_pixel_scale, Frustum, Lens, PixelScale, Sign};

/// Distance below which the current level counts as having arrived
pub const ZOOM_EPSILON: f32 = 1e-3;

/// Whether a zoom animation is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPhase {
    /// Current level has reached the target; new steps are accepted
    Idle,
    /// Current level is still easing toward the target; new steps are rejected
    Transitioning,
}

/// Outcome of a zoom step request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomResponse {
    /// Target moved to the neighbouring level
    Accepted,
    /// Already at the first/last level, nothing changed
    AtLimit,
    /// A transition is still running, request ignored
    Rejected,
}

/// Zoom level selection and smoothing
#[derive(Debug, Clone)]
pub struct ZoomState {
    current: f32,
    target: f32,
    levels: Vec<f32>,
    index: usize,
    smoothing: f32,
    phase: ZoomPhase,
}

impl ZoomState {
    /// `levels` must be non-empty, strictly ascending and positive, and
    /// `start_index` in range; `ViewerConfig::validate` guarantees both.
    pub fn new(levels: Vec<f32>, start_index: usize, smoothing: f32) -> Self {
        assert!(start_index < levels.len(), "zoom start index out of range");
        let level = levels[start_index];
        Self {
            current: level,
            target: level,
            levels,
            index: start_index,
            smoothing,
            phase: ZoomPhase::Idle,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn phase(&self) -> ZoomPhase {
        self.phase
    }

    /// Move one level in `direction` (positive = zoom in, i.e. larger level)
    pub fn request_step(&mut self, direction: Sign) -> ZoomResponse {
        if self.phase == ZoomPhase::Transitioning {
            return ZoomResponse::Rejected;
        }

        let next = match direction {
            Sign::Positive => (self.index + 1).min(self.levels.len() - 1),
            Sign::Negative => self.index.saturating_sub(1),
        };
        if next == self.index {
            return ZoomResponse::AtLimit;
        }

        self.index = next;
        self.target = self.levels[next];
        self.update_phase();
        ZoomResponse::Accepted
    }

    /// Ease the current level toward the target by one tick
    pub fn tick(&mut self) {
        // No lerp while idle so a settled level never drifts
        if self.phase == ZoomPhase::Idle {
            return;
        }
        self.current += (self.target - self.current) * self.smoothing;
        self.update_phase();
    }

    fn update_phase(&mut self) {
        self.phase = if (self.current - self.target).abs() <= ZOOM_EPSILON {
            ZoomPhase::Idle
        } else {
            ZoomPhase::Transitioning
        };
    }
}

/// Owns zoom state and everything derived from it
#[derive(Debug, Clone)]
pub struct CameraController {
    lens: Lens,
    zoom: ZoomState,
    offscreen_height: usize,
    frustum: Frustum,
    pixel_scale: PixelScale,
}

impl CameraController {
    pub fn new(lens: Lens, zoom: ZoomState, offscreen_height: usize) -> Self {
        let frustum = Frustum::from_zoom(&lens, zoom.current());
        let pixel_scale = compute_pixel_scale(&frustum, offscreen_height);
        Self {
            lens,
            zoom,
            offscreen_height,
            frustum,
            pixel_scale,
        }
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn pixel_scale(&self) -> &PixelScale {
        &self.pixel_scale
    }

    pub fn request_zoom_step(&mut self, direction: Sign) -> ZoomResponse {
        self.zoom.request_step(direction)
    }

    /// Advance zoom smoothing, then rebuild the frustum and pixel sizes
    pub fn tick(&mut self) {
        self.zoom.tick();
        self.frustum = Frustum::from_zoom(&self.lens, self.zoom.current());
        self.pixel_scale = compute_pixel_scale(&self.frustum, self.offscreen_height);
    }
}
