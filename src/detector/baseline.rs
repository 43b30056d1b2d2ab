//! Standard-deviation baseline over non-overlapping windows.
//!
//! The window length equals the minimum interval, so a single qualifying
//! window already forms a complete episode. A truncated window at the end of
//! the recording is never evaluated and stays labelled as wear.

use super::params::BaselineParams;
use super::NonWearDetector;
use crate::diagnostics::TimingBreakdown;
use crate::episodes::{all_wear, detection_from_ranges, merge_ranges};
use crate::error::DetectError;
use crate::signal::SignalView;
use crate::stats::{windowed_stats, Channels, WindowSpec};
use crate::types::Detection;
use log::debug;

pub struct BaselineDetector {
    params: BaselineParams,
}

impl BaselineDetector {
    pub fn new(params: BaselineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BaselineParams {
        &self.params
    }
}

impl NonWearDetector for BaselineDetector {
    fn name(&self) -> &'static str {
        if self.params.use_vector_magnitude {
            "baseline-vmu"
        } else {
            "baseline-xyz"
        }
    }

    fn detect_timed(
        &self,
        signal: &SignalView,
        timings: &mut TimingBreakdown,
    ) -> Result<Detection, DetectError> {
        signal.validate()?;
        self.params.validate()?;
        let p = &self.params;

        let window = signal.samples_for_seconds(p.min_interval_seconds);
        if window == 0 {
            return Err(DetectError::invalid(format!(
                "min_interval_seconds={} is shorter than one sample at {} Hz",
                p.min_interval_seconds, signal.hz
            )));
        }
        if signal.len() < window {
            debug!(
                "BaselineDetector: {} samples shorter than one {}-sample window, all wear",
                signal.len(),
                window
            );
            return Ok(all_wear(signal, p.encoding));
        }

        let channels = if p.use_vector_magnitude {
            Channels::VectorMagnitude
        } else {
            Channels::Axes
        };
        let flagged = timings.time("windows", || -> Result<_, DetectError> {
            let mut flagged = Vec::new();
            for w in windowed_stats(signal.samples, WindowSpec::tiling(window), channels)? {
                if !w.finite || w.all_std_below(p.std_threshold) {
                    flagged.push(w.start..w.end());
                }
            }
            Ok(flagged)
        })?;
        let ranges = merge_ranges(flagged, 0);
        debug!(
            "BaselineDetector: window={} samples, {} episodes",
            window,
            ranges.len()
        );
        Ok(timings.time("labels", || {
            detection_from_ranges(signal, &ranges, p.encoding)
        }))
    }
}
