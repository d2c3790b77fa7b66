//! Per-tick viewer update
//!
//! `Viewer::tick` is the only place derived camera state changes and the
//! only place the render passes are issued. Its order is fixed:
//!
//! 1. drain queued intents into the accumulators
//! 2. advance zoom smoothing, rebuilding frustum and pixel scale
//! 3. drain whole-pixel pan steps and snap the pivot
//! 4. attach the camera to the pivot
//! 5. pass 1 (scene to offscreen), pass 2 (quad to screen)
//! 6. apply pending yaw, visible from the next tick

use macroquad::logging::debug;

use crate::camera::{
    drain, pivot_in_pixels, CameraController, CameraPose, CameraView, DrainOutcome, PanAccumulator, ZoomPhase, ZoomResponse,
};
use crate::compositor::{Compositor, RenderBackend};
use crate::config::ViewerConfig;
use crate::input::{Intent, IntentQueue};
use crate::rasterizer::{Vec2, Vec3};
use crate::scene::Scene;

/// Everything a tick mutates
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub camera: CameraController,
    pub pan: PanAccumulator,
    pub pose: CameraPose,
    /// Yaw steps requested this tick, applied after the passes
    pub pending_yaw_steps: i32,
    pub tick: u64,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            camera: CameraController::new(config.lens(), config.zoom_state(), config.surface_height),
            pan: PanAccumulator::default(),
            pose: CameraPose::new(Vec3::ZERO, config.rotation_step_degrees),
            pending_yaw_steps: 0,
            tick: 0,
        }
    }
}

/// What one tick did, for the HUD and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub tick: u64,
    pub zoom_level: f32,
    pub zoom_target: f32,
    pub zoom_phase: ZoomPhase,
    /// Yaw the passes were rendered with
    pub yaw_degrees: f32,
    pub pivot: Vec3,
    /// Pivot in offscreen pixels; whole numbers after every drain
    pub pivot_px: Vec3,
    pub drain: DrainOutcome,
    pub view: CameraView,
}

impl FrameReport {
    /// One-line status for the overlay
    pub fn status_line(&self) -> String {
        let phase = match self.zoom_phase {
            ZoomPhase::Idle => "idle",
            ZoomPhase::Transitioning => "zooming",
        };
        format!(
            "pivot ({:.2}, {:.2}, {:.2}) px ({:.2}, {:.2}, {:.2})  yaw {:.0}  zoom {:.2}/{:.2} {}",
            self.pivot.x,
            self.pivot.y,
            self.pivot.z,
            self.pivot_px.x,
            self.pivot_px.y,
            self.pivot_px.z,
            self.yaw_degrees,
            self.zoom_level,
            self.zoom_target,
            phase
        )
    }

    pub fn quad_offset(&self) -> Vec2 {
        self.drain.quad_offset
    }
}

pub struct Viewer {
    pub state: ViewerState,
    intents: IntentQueue,
    pan_speed: f32,
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            state: ViewerState::new(config),
            intents: IntentQueue::new(),
            pan_speed: config.pan_speed,
        }
    }

    /// Queue input handlers write into
    pub fn intents(&mut self) -> &mut IntentQueue {
        &mut self.intents
    }

    fn apply_intents(&mut self) {
        let state = &mut self.state;
        for intent in self.intents.drain() {
            match intent {
                Intent::Pan { axis, sign } => state.pan.add(axis, sign.as_f32() * self.pan_speed),
                Intent::Rotate(sign) => state.pending_yaw_steps += sign.as_i32(),
                Intent::Zoom(sign) => match state.camera.request_zoom_step(sign) {
                    ZoomResponse::Accepted => {}
                    ZoomResponse::AtLimit => debug!("zoom step {:?} ignored: already at limit", sign),
                    ZoomResponse::Rejected => debug!("zoom step {:?} ignored: transition running", sign),
                },
            }
        }
    }

    /// Advance one frame and issue both render passes
    pub fn tick<B: RenderBackend + ?Sized>(
        &mut self,
        scene: &Scene,
        compositor: &mut Compositor,
        backend: &mut B,
    ) -> FrameReport {
        self.apply_intents();

        let state = &mut self.state;
        state.camera.tick();

        let scale = *state.camera.pixel_scale();
        let outcome = drain(&mut state.pan, &mut state.pose, &scale);

        let view = CameraView::attach(&state.pose, state.camera.frustum());
        compositor.render_frame(backend, scene, &view, outcome.quad_offset, &scale);

        let report = FrameReport {
            tick: state.tick,
            zoom_level: state.camera.zoom().current(),
            zoom_target: state.camera.zoom().target(),
            zoom_phase: state.camera.zoom().phase(),
            yaw_degrees: state.pose.yaw_degrees(),
            pivot: state.pose.pivot,
            pivot_px: pivot_in_pixels(state.pose.pivot, &scale),
            drain: outcome,
            view,
        };

        if state.pending_yaw_steps != 0 {
            state.pose.rotate_steps(state.pending_yaw_steps);
            state.pending_yaw_steps = 0;
        }
        state.tick += 1;

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{PanAxis, Sign};
    use crate::compositor::tests::{Call, RecordingBackend};
    use crate::rasterizer::Color;
    use crate::shading::DirectionalLight;

    fn setup(config: &ViewerConfig) -> (Viewer, Scene, Compositor, RecordingBackend) {
        let mut backend = RecordingBackend::default();
        let compositor = Compositor::new(&mut backend, config.surface_width, config.surface_height).unwrap();
        backend.calls.clear();
        let scene = Scene::new(DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0), Vec3::ONE), Color::BLACK);
        (Viewer::new(config), scene, compositor, backend)
    }

    fn scene_forward(call: &Call) -> Vec3 {
        match call {
            Call::Scene { yaw_forward } => *yaw_forward,
            other => panic!("expected scene pass, got {:?}", other),
        }
    }

    #[test]
    fn test_rotation_shows_from_next_tick() {
        let config = ViewerConfig::default();
        let (mut viewer, scene, mut compositor, mut backend) = setup(&config);

        viewer.intents().push(Intent::Rotate(Sign::Positive));
        let first = viewer.tick(&scene, &mut compositor, &mut backend);
        assert!(first.yaw_degrees.abs() < 1e-6);
        assert_eq!(viewer.state.pose.yaw_steps(), 1);

        let second = viewer.tick(&scene, &mut compositor, &mut backend);
        assert!((second.yaw_degrees - 45.0).abs() < 1e-4);

        let before = scene_forward(&backend.calls[0]);
        let after = scene_forward(&backend.calls[2]);
        assert!((before - after).len() > 0.1);
    }

    #[test]
    fn test_passes_alternate_every_tick() {
        let config = ViewerConfig::default();
        let (mut viewer, scene, mut compositor, mut backend) = setup(&config);

        for _ in 0..3 {
            viewer.tick(&scene, &mut compositor, &mut backend);
        }
        assert_eq!(backend.calls.len(), 6);
        for pair in backend.calls.chunks(2) {
            assert!(matches!(pair[0], Call::Scene { .. }));
            assert!(matches!(pair[1], Call::Quad(_)));
        }
        assert_eq!(viewer.state.tick, 3);
    }

    #[test]
    fn test_subpixel_pan_is_carried_by_the_quad() {
        let mut config = ViewerConfig::default();
        config.pan_speed = 0.4;
        let (mut viewer, scene, mut compositor, mut backend) = setup(&config);
        let upp = viewer.state.camera.pixel_scale().units_per_pixel;

        let pan_right = Intent::Pan { axis: PanAxis::Lateral, sign: Sign::Positive };

        viewer.intents().push(pan_right);
        let report = viewer.tick(&scene, &mut compositor, &mut backend);
        assert_eq!(report.drain.steps, [0, 0, 0]);
        assert!((report.quad_offset().x + 0.4 * upp).abs() < 1e-6);
        assert!((compositor.quad().pixel_offset().x + 0.4).abs() < 1e-5);

        viewer.intents().push(pan_right);
        viewer.tick(&scene, &mut compositor, &mut backend);
        viewer.intents().push(pan_right);
        let report = viewer.tick(&scene, &mut compositor, &mut backend);

        // 1.2 pixels requested: one whole step, 0.2 left for the quad
        assert_eq!(report.drain.steps, [1, 0, 0]);
        assert!((report.pivot.x - upp).abs() < 1e-5);
        assert!((report.drain.residual.x - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_steps_are_debounced_during_transition() {
        let config = ViewerConfig::default();
        let (mut viewer, scene, mut compositor, mut backend) = setup(&config);

        viewer.intents().push(Intent::Zoom(Sign::Positive));
        viewer.intents().push(Intent::Zoom(Sign::Positive));
        let report = viewer.tick(&scene, &mut compositor, &mut backend);
        assert_eq!(viewer.state.camera.zoom().index(), 2);
        assert_eq!(report.zoom_phase, ZoomPhase::Transitioning);
        assert!((report.zoom_target - 2.0).abs() < 1e-6);
        assert!(report.zoom_level > 1.0 && report.zoom_level < 2.0);

        viewer.intents().push(Intent::Zoom(Sign::Positive));
        viewer.tick(&scene, &mut compositor, &mut backend);
        assert_eq!(viewer.state.camera.zoom().index(), 2);
    }

    #[test]
    fn test_zoom_changes_pixel_scale() {
        let config = ViewerConfig::default();
        let (mut viewer, scene, mut compositor, mut backend) = setup(&config);
        let before = viewer.state.camera.pixel_scale().units_per_pixel;

        viewer.intents().push(Intent::Zoom(Sign::Positive));
        for _ in 0..200 {
            viewer.tick(&scene, &mut compositor, &mut backend);
        }
        let after = viewer.state.camera.pixel_scale().units_per_pixel;
        assert!((after - before / 2.0).abs() < before * 1e-3);
    }

    #[test]
    fn test_instances_are_independent() {
        let config = ViewerConfig::default();
        let (mut a, scene, mut comp_a, mut backend_a) = setup(&config);
        let (b, _, _, _) = setup(&config);

        a.intents().push(Intent::Pan { axis: PanAxis::Depth, sign: Sign::Positive });
        a.intents().push(Intent::Rotate(Sign::Negative));
        a.tick(&scene, &mut comp_a, &mut backend_a);

        assert_ne!(a.state.pose, b.state.pose);
        assert_eq!(b.state.tick, 0);
    }

    #[test]
    fn test_status_line_mentions_zoom_phase() {
        let config = ViewerConfig::default();
        let (mut viewer, scene, mut compositor, mut backend) = setup(&config);
        let report = viewer.tick(&scene, &mut compositor, &mut backend);
        let line = report.status_line();
        assert!(line.contains("idle"));
        assert!(line.contains("px (0.00, 0.00, 0.00)"));
        assert!(line.contains("zoom 1.00/1.00"));
    }
}
