//! Camera pivot (position + yaw) and the tilted camera attached to it

use super::Frustum;
use crate::rasterizer::Vec3;

/// The pivot the camera hangs off.
///
/// Yaw is kept as a whole number of fixed-size steps so repeated
/// rotations never accumulate rounding error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub pivot: Vec3,
    yaw_steps: i32,
    step_degrees: f32,
}

impl CameraPose {
    pub fn new(pivot: Vec3, step_degrees: f32) -> Self {
        Self {
            pivot,
            yaw_steps: 0,
            step_degrees,
        }
    }

    pub fn yaw_steps(&self) -> i32 {
        self.yaw_steps
    }

    /// Yaw in degrees, wrapped to [0, 360)
    pub fn yaw_degrees(&self) -> f32 {
        (self.yaw_steps as f32 * self.step_degrees).rem_euclid(360.0)
    }

    pub fn yaw_radians(&self) -> f32 {
        self.yaw_degrees().to_radians()
    }

    /// Turn the pivot by `steps` increments (positive = counter-clockwise seen from above)
    pub fn rotate_steps(&mut self, steps: i32) {
        let full_turn = (360.0 / self.step_degrees).round() as i32;
        self.yaw_steps += steps;
        if full_turn > 0 {
            self.yaw_steps = self.yaw_steps.rem_euclid(full_turn);
        }
    }

    /// Lateral basis vector
    pub fn right(&self) -> Vec3 {
        let (sin, cos) = self.yaw_radians().sin_cos();
        Vec3::new(cos, 0.0, -sin)
    }

    /// Vertical basis vector
    pub fn up(&self) -> Vec3 {
        Vec3::UP
    }

    /// Ground-plane forward basis vector
    pub fn forward(&self) -> Vec3 {
        let (sin, cos) = self.yaw_radians().sin_cos();
        Vec3::new(-sin, 0.0, -cos)
    }
}

/// Orthographic camera as seen by a render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// View direction
    pub forward: Vec3,
    pub half_width: f32,
    pub half_height: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraView {
    /// Hang a camera tilted down by `frustum.tilt` off the pivot, backed
    /// away along its view direction so the pivot sits mid-depth.
    pub fn attach(pose: &CameraPose, frustum: &Frustum) -> Self {
        let (sin_t, cos_t) = frustum.tilt.sin_cos();
        let right = pose.right();
        let forward = (pose.forward() * cos_t + Vec3::new(0.0, -sin_t, 0.0)).normalize();
        let up = right.cross(forward);

        Self {
            position: pose.pivot - forward * frustum.pivot_distance(),
            right,
            up,
            forward,
            half_width: frustum.half_width,
            half_height: frustum.half_height,
            near: frustum.near,
            far: frustum.far,
        }
    }
}
