//! Non-wear detectors over raw tri-axial acceleration.
//!
//! Overview
//! - [`BaselineDetector`] thresholds the standard deviation of long,
//!   non-overlapping windows (per axis or on the vector magnitude) and merges
//!   consecutive qualifying windows.
//! - [`RefinedDetector`] evaluates SD and range per axis on 1-second windows,
//!   keeps candidate runs that reach a minimum duration and widens them over
//!   ambiguous don/doff seconds.
//! - [`ClassifierDetector`] resamples to the scorer's canonical rate and
//!   classifies fixed-duration windows with a learned [`WindowScorer`].
//!
//! All detectors share the [`NonWearDetector`] contract: a borrowed
//! [`SignalView`] in, a [`Detection`] with one label per input sample and
//! the matching episode list out. Detectors hold only immutable parameters,
//! so one instance can serve many threads.
//!
//! Modules
//! - [`params`] – configuration types and published presets.
//! - `baseline`, `refined`, `classifier` – the three strategies.

mod baseline;
pub mod classifier;
pub mod params;
mod refined;

pub use baseline::BaselineDetector;
pub use classifier::{ClassifierDetector, FnScorer, LinearWindowModel, WindowScorer};
pub use params::{
    BaselineParams, ClassifierMode, ClassifierParams, EpisodeEdgeOptions, RefinedParams,
    StartStopDecision,
};
pub use refined::RefinedDetector;

use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{DetectionReport, InputDescriptor, TimingBreakdown};
use crate::error::DetectError;
use crate::signal::SignalView;
use crate::types::Detection;
use std::time::Instant;

/// Common contract of every non-wear detector.
pub trait NonWearDetector: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Run detection, recording stage timings into `timings`.
    fn detect_timed(
        &self,
        signal: &SignalView,
        timings: &mut TimingBreakdown,
    ) -> Result<Detection, DetectError>;

    /// Label every sample of `signal` as wear or non-wear.
    fn detect(&self, signal: &SignalView) -> Result<Detection, DetectError> {
        self.detect_timed(signal, &mut TimingBreakdown::default())
    }

    /// Run detection and return the result with input and timing diagnostics.
    fn detect_with_report(&self, signal: &SignalView) -> Result<DetectionReport, DetectError> {
        let start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let detection = self.detect_timed(signal, &mut timings)?;
        timings.total_ms = elapsed_ms(start);
        Ok(DetectionReport {
            detector: self.name(),
            input: InputDescriptor::from_signal(signal),
            detection,
            timings,
        })
    }
}
