//! Pixel-stable orthographic camera
//!
//! Everything that decides where the camera is and how big a pixel is:
//! - Frustum derived from a base size and the current zoom level
//! - Discrete zoom levels with smoothed transitions
//! - Pixel-grid quantization (plain and tilt-adjusted)
//! - Pan accumulation drained in whole-pixel steps
//! - Yaw in fixed increments around a pivot

mod frustum;
mod pan;
mod pose;
mod quantize;
mod zoom;

pub use frustum::*;
pub use pan::*;
pub use pose::*;
pub use quantize::*;
pub use zoom::*;

/// Direction of a discrete step (pan, rotate or zoom)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub fn as_i32(self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Positive => 1,
        }
    }

    pub fn as_f32(self) -> f32 {
        self.as_i32() as f32
    }

    /// Sign of a non-zero value, `None` for zero (or NaN)
    pub fn of(value: f32) -> Option<Sign> {
        if value > 0.0 {
            Some(Sign::Positive)
        } else if value < 0.0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }
}
