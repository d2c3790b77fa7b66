//! Pan accumulation and whole-pixel draining

use super::{snap_vec3, CameraPose, PixelScale};
use crate::rasterizer::{Vec2, Vec3};

/// Camera-relative pan axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanAxis {
    /// Positive = camera right
    Lateral,
    /// Positive = world up
    Vertical,
    /// Positive = toward the view direction
    Depth,
}

impl PanAxis {
    pub const ALL: [PanAxis; 3] = [PanAxis::Lateral, PanAxis::Vertical, PanAxis::Depth];
}

/// Pending pan movement in pixel units, not yet applied to the pivot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanAccumulator {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PanAccumulator {
    pub fn get(&self, axis: PanAxis) -> f32 {
        match axis {
            PanAxis::Lateral => self.x,
            PanAxis::Vertical => self.y,
            PanAxis::Depth => self.z,
        }
    }

    fn get_mut(&mut self, axis: PanAxis) -> &mut f32 {
        match axis {
            PanAxis::Lateral => &mut self.x,
            PanAxis::Vertical => &mut self.y,
            PanAxis::Depth => &mut self.z,
        }
    }

    pub fn add(&mut self, axis: PanAxis, amount: f32) {
        *self.get_mut(axis) += amount;
    }

    /// Leftover sub-pixel motion on the screen axes.
    ///
    /// Vertical and depth both project onto screen Y, so their fractions are
    /// summed. When both change in the same tick the sum can cancel out, and
    /// that lost precision is accepted.
    pub fn residual(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.z)
    }
}

/// Result of draining one tick's accumulated pan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrainOutcome {
    /// Whole-pixel steps taken per axis (lateral, vertical, depth), signed
    pub steps: [i32; 3],
    /// Sub-pixel remainder in pixel units (screen x, screen y)
    pub residual: Vec2,
    /// Offset for the compositing quad in world units
    pub quad_offset: Vec2,
}

/// Move the pivot by whole pixels while any axis holds at least one pixel
/// of pending motion, then re-snap the pivot to the pixel grid.
pub fn drain(acc: &mut PanAccumulator, pose: &mut CameraPose, scale: &PixelScale) -> DrainOutcome {
    let mut steps = [0; 3];

    for (slot, axis) in PanAxis::ALL.into_iter().enumerate() {
        let (basis, step) = match axis {
            PanAxis::Lateral => (pose.right(), scale.units_per_pixel),
            PanAxis::Vertical => (pose.up(), scale.units_per_pixel),
            PanAxis::Depth => (pose.forward(), scale.tilt_adjusted_units_per_pixel),
        };

        let pending = acc.get_mut(axis);
        while pending.abs() >= 1.0 {
            let sign = pending.signum();
            pose.pivot += basis * (step * sign);
            *pending -= sign;
            steps[slot] += sign as i32;
        }
    }

    pose.pivot = snap_vec3(pose.pivot, scale.units_per_pixel);

    let residual = acc.residual();
    let quad_offset = Vec2::new(
        -residual.x * scale.units_per_pixel,
        -residual.y * scale.units_per_pixel,
    );

    DrainOutcome {
        steps,
        residual,
        quad_offset,
    }
}

/// Pivot position expressed in whole pixels (for diagnostics)
pub fn pivot_in_pixels(pivot: Vec3, scale: &PixelScale) -> Vec3 {
    pivot.scale(1.0 / scale.units_per_pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> PixelScale {
        PixelScale {
            units_per_pixel: 0.05,
            tilt_adjusted_units_per_pixel: 0.05 * 3.0_f32.sqrt(),
        }
    }

    fn is_grid_multiple(v: f32, p: f32) -> bool {
        let k = v / p;
        (k - k.round()).abs() < 1e-3
    }

    #[test]
    fn test_drain_takes_whole_steps_and_keeps_fraction() {
        let mut acc = PanAccumulator { x: 2.4, y: 0.0, z: 0.0 };
        let mut pose = CameraPose::new(Vec3::ZERO, 45.0);
        let out = drain(&mut acc, &mut pose, &scale());

        assert_eq!(out.steps, [2, 0, 0]);
        assert!((acc.x - 0.4).abs() < 1e-5);
        assert!((pose.pivot.x - 0.1).abs() < 1e-6);
        assert!(pose.pivot.y.abs() < 1e-6);
        assert!(pose.pivot.z.abs() < 1e-6);
    }

    #[test]
    fn test_negative_drain() {
        let mut acc = PanAccumulator { x: 0.0, y: -1.5, z: 0.0 };
        let mut pose = CameraPose::new(Vec3::ZERO, 45.0);
        let out = drain(&mut acc, &mut pose, &scale());

        assert_eq!(out.steps, [0, -1, 0]);
        assert!((acc.y + 0.5).abs() < 1e-6);
        assert!((pose.pivot.y + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_below_one_pixel_does_not_move() {
        let mut acc = PanAccumulator { x: 0.99, y: -0.99, z: 0.5 };
        let mut pose = CameraPose::new(Vec3::ZERO, 45.0);
        let out = drain(&mut acc, &mut pose, &scale());
        assert_eq!(out.steps, [0, 0, 0]);
        assert_eq!(pose.pivot, Vec3::ZERO);
    }

    #[test]
    fn test_depth_uses_forward_axis_and_tilt_adjusted_step() {
        let mut acc = PanAccumulator { x: 0.0, y: 0.0, z: 1.0 };
        let mut pose = CameraPose::new(Vec3::ZERO, 45.0);
        let s = scale();
        drain(&mut acc, &mut pose, &s);

        // Forward is -Z at zero yaw; snapped back onto the plain grid
        let expected = crate::camera::snap(-s.tilt_adjusted_units_per_pixel, s.units_per_pixel);
        assert!((pose.pivot.z - expected).abs() < 1e-6);
        assert_eq!(acc.z, 0.0);
    }

    #[test]
    fn test_pivot_lands_on_grid_after_drain() {
        let s = scale();
        let mut pose = CameraPose::new(Vec3::new(0.013, 1.0, -0.4), 45.0);
        pose.rotate_steps(1);
        let mut acc = PanAccumulator::default();

        for tick in 0..50 {
            acc.add(PanAxis::Lateral, 0.7);
            acc.add(PanAxis::Depth, if tick % 2 == 0 { 1.0 } else { -0.3 });
            acc.add(PanAxis::Vertical, -0.45);
            drain(&mut acc, &mut pose, &s);

            assert!(is_grid_multiple(pose.pivot.x, s.units_per_pixel));
            assert!(is_grid_multiple(pose.pivot.y, s.units_per_pixel));
            assert!(is_grid_multiple(pose.pivot.z, s.units_per_pixel));
            assert!(acc.x.abs() < 1.0 && acc.y.abs() < 1.0 && acc.z.abs() < 1.0);
        }
    }

    #[test]
    fn test_quad_offset_is_negated_residual() {
        let s = scale();
        let mut acc = PanAccumulator { x: 1.25, y: 0.0, z: -0.5 };
        let mut pose = CameraPose::new(Vec3::ZERO, 45.0);
        let out = drain(&mut acc, &mut pose, &s);

        assert!((out.residual.x - 0.25).abs() < 1e-6);
        assert!((out.residual.y + 0.5).abs() < 1e-6);
        assert!((out.quad_offset.x + 0.25 * s.units_per_pixel).abs() < 1e-7);
        assert!((out.quad_offset.y - 0.5 * s.units_per_pixel).abs() < 1e-7);
    }

    #[test]
    fn test_vertical_and_depth_fractions_merge_into_one_screen_axis() {
        // Opposite fractions on vertical and depth cancel in the residual:
        // the quad does not move even though both axes have pending motion.
        let s = scale();
        let mut acc = PanAccumulator { x: 0.0, y: 0.5, z: -0.5 };
        let mut pose = CameraPose::new(Vec3::ZERO, 45.0);
        let out = drain(&mut acc, &mut pose, &s);

        assert_eq!(out.residual.y, 0.0);
        assert_eq!(out.quad_offset.y, 0.0);
        assert_eq!(acc.y, 0.5);
        assert_eq!(acc.z, -0.5);
    }

    #[test]
    fn test_pivot_in_pixels() {
        let p = pivot_in_pixels(Vec3::new(0.1, -0.05, 0.0), &scale());
        assert!((p.x - 2.0).abs() < 1e-4);
        assert!((p.y + 1.0).abs() < 1e-4);
    }
}
