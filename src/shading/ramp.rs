//! Stepwise lookup ramps for banded lighting

use std::fmt;

/// Number of samples in every ramp
pub const RAMP_SAMPLES: usize = 256;

/// Rejected ramp descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RampError {
    /// `breakpoints[index]` is not greater than the breakpoint before it
    NotIncreasing { index: usize, previous: usize, value: usize },
    /// `breakpoints[index]` falls outside the 256-sample domain
    OutOfDomain { index: usize, value: usize },
}

impl fmt::Display for RampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RampError::NotIncreasing { index, previous, value } => write!(
                f,
                "ramp breakpoint {} ({}) does not increase past {}",
                index, value, previous
            ),
            RampError::OutOfDomain { index, value } => write!(
                f,
                "ramp breakpoint {} ({}) is outside 0..{}",
                index, value, RAMP_SAMPLES
            ),
        }
    }
}

impl std::error::Error for RampError {}

/// A 256-entry step function over [0, 1]. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct RampTable {
    samples: [u8; RAMP_SAMPLES],
}

impl fmt::Debug for RampTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print the bands rather than 256 bytes
        let mut bands = Vec::new();
        let mut start = 0;
        for i in 1..=RAMP_SAMPLES {
            if i == RAMP_SAMPLES || self.samples[i] != self.samples[start] {
                bands.push((start, self.samples[start]));
                start = i;
            }
        }
        f.debug_struct("RampTable").field("bands", &bands).finish()
    }
}

impl RampTable {
    /// Build a ramp from strictly increasing sample-index `breakpoints` and
    /// band `values`.
    ///
    /// `values` is zero-padded to `breakpoints.len() + 1` entries; extra
    /// entries are ignored. Sample `i` before the last breakpoint gets
    /// `values[k]` where `k` counts the breakpoints `<= i`; every sample from
    /// the last breakpoint on gets the last value.
    pub fn build(breakpoints: &[usize], values: &[u8]) -> Result<Self, RampError> {
        for (index, &value) in breakpoints.iter().enumerate() {
            if value >= RAMP_SAMPLES {
                return Err(RampError::OutOfDomain { index, value });
            }
            if index > 0 && value <= breakpoints[index - 1] {
                return Err(RampError::NotIncreasing {
                    index,
                    previous: breakpoints[index - 1],
                    value,
                });
            }
        }

        let mut padded = values.to_vec();
        if padded.len() < breakpoints.len() + 1 {
            padded.resize(breakpoints.len() + 1, 0);
        }
        let last_value = padded[breakpoints.len()];
        let last_breakpoint = breakpoints.last().copied().unwrap_or(0);

        let mut samples = [last_value; RAMP_SAMPLES];
        for (i, sample) in samples.iter_mut().enumerate().take(last_breakpoint) {
            let k = breakpoints.iter().take_while(|&&b| b <= i).count();
            *sample = padded[k];
        }

        Ok(Self { samples })
    }

    /// A ramp that returns `value` everywhere
    pub fn constant(value: u8) -> Self {
        Self {
            samples: [value; RAMP_SAMPLES],
        }
    }

    pub fn samples(&self) -> &[u8; RAMP_SAMPLES] {
        &self.samples
    }

    /// Nearest texel for `x` in [0, 1] (clamped)
    pub fn texel(&self, x: f32) -> u8 {
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        let index = ((x * RAMP_SAMPLES as f32) as usize).min(RAMP_SAMPLES - 1);
        self.samples[index]
    }

    /// Look up `x` and normalize the band value to [0, 1]
    pub fn sample(&self, x: f32) -> f32 {
        self.texel(x) as f32 / 255.0
    }
}
