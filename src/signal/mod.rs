//! Borrowed view over a recorded acceleration signal plus small helpers.
//!
//! Detectors never own the signal: callers keep their sample buffer and pass a
//! [`SignalView`] that also carries the sampling rate and, optionally, the
//! companion timestamp vector (epoch milliseconds). Without timestamps the
//! view derives them from the sample index and rate.

pub mod io;

use crate::error::DetectError;
use crate::types::Sample;

/// Read-only view of a tri-axial acceleration recording.
#[derive(Clone, Copy, Debug)]
pub struct SignalView<'a> {
    pub samples: &'a [Sample],
    pub timestamps: Option<&'a [i64]>,
    pub hz: f32,
}

impl<'a> SignalView<'a> {
    pub fn new(samples: &'a [Sample], hz: f32) -> Self {
        Self {
            samples,
            timestamps: None,
            hz,
        }
    }

    pub fn with_timestamps(mut self, timestamps: &'a [i64]) -> Self {
        self.timestamps = Some(timestamps);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Reject empty signals, non-positive rates and mismatched timestamps.
    pub fn validate(&self) -> Result<(), DetectError> {
        if self.samples.is_empty() {
            return Err(DetectError::invalid("signal is empty"));
        }
        if !(self.hz.is_finite() && self.hz > 0.0) {
            return Err(DetectError::invalid(format!(
                "sampling rate must be positive, got {}",
                self.hz
            )));
        }
        if let Some(ts) = self.timestamps {
            if ts.len() != self.samples.len() {
                return Err(DetectError::invalid(format!(
                    "timestamp vector has {} entries for {} samples",
                    ts.len(),
                    self.samples.len()
                )));
            }
        }
        Ok(())
    }

    /// Timestamp (ms) of sample `index`.
    #[inline]
    pub fn timestamp(&self, index: usize) -> i64 {
        match self.timestamps {
            Some(ts) => ts[index],
            None => (index as f64 * 1000.0 / self.hz as f64).round() as i64,
        }
    }

    /// Number of samples spanning `seconds` at this rate (rounded).
    #[inline]
    pub fn samples_for_seconds(&self, seconds: f32) -> usize {
        (seconds as f64 * self.hz as f64).round() as usize
    }
}

/// Options for [`vector_magnitude`].
///
/// - `minus_one`: subtract 1 g (Euclidean norm minus one, ENMO).
/// - `clamp_negative`: clamp negative results to zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct VmOptions {
    pub minus_one: bool,
    pub clamp_negative: bool,
}

/// Norm of one sample, accumulated in f64, with `options` applied.
#[inline]
pub fn sample_magnitude(sample: &Sample, options: VmOptions) -> f64 {
    let mut v = sample.cast::<f64>().norm();
    if options.minus_one {
        v -= 1.0;
    }
    if options.clamp_negative && v < 0.0 {
        v = 0.0;
    }
    v
}

/// Euclidean norm of each sample.
pub fn vector_magnitude(samples: &[Sample], options: VmOptions) -> Vec<f32> {
    samples
        .iter()
        .map(|s| sample_magnitude(s, options) as f32)
        .collect()
}
