//! Horizontal drag to rotation steps

use crate::camera::Sign;

/// Tracks one mouse drag and turns horizontal travel into yaw steps.
///
/// A step fires once the pointer is more than `threshold` pixels from the
/// anchor, and the anchor then resets to the pointer. One update fires at
/// most one step, however far the pointer jumped.
#[derive(Debug, Clone)]
pub struct DragGesture {
    threshold: f32,
    anchor: Option<f32>,
}

impl DragGesture {
    pub fn new(threshold: f32) -> Self {
        Self { threshold, anchor: None }
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn begin(&mut self, x: f32) {
        self.anchor = Some(x);
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }

    /// Feed the current pointer x; returns the step fired, if any
    pub fn update(&mut self, x: f32) -> Option<Sign> {
        let anchor = self.anchor.as_mut()?;
        let travel = x - *anchor;
        if travel.abs() <= self.threshold {
            return None;
        }
        *anchor = x;
        Sign::of(travel)
    }
}
