//! Cel shading
//!
//! Lighting is quantized into a handful of bands by looking continuous
//! terms up in 256-sample ramp tables instead of using them directly.

mod cel;
mod ramp;

pub use cel::*;
pub use ramp::*;
