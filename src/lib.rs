#![doc = include_str!("../README.md")]

// Public modules
pub mod batch;
pub mod compare;
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod episodes;
pub mod error;
pub mod resample;
pub mod signal;
pub mod stats;
pub mod types;

// --- High-level re-exports -------------------------------------------------

// Detectors and their parameters.
pub use crate::detector::{
    BaselineDetector, BaselineParams, ClassifierDetector, ClassifierMode, ClassifierParams,
    NonWearDetector, RefinedDetector, RefinedParams,
};

// Results and errors.
pub use crate::error::DetectError;
pub use crate::types::{Detection, DetectionWarning, Encoding, Episode, Sample};

// Input contract.
pub use crate::signal::SignalView;

// Diagnostics returned by `detect_with_report`.
pub use crate::diagnostics::DetectionReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use nonwear::prelude::*;
///
/// # fn main() -> Result<(), DetectError> {
/// let hz = 100.0;
/// let samples = vec![Sample::new(0.0, 0.0, 1.0); 10 * 60 * 100];
/// let signal = SignalView::new(&samples, hz);
///
/// let det = RefinedDetector::new(RefinedParams {
///     min_non_wear_window_minutes: 5.0,
///     ..RefinedParams::hees_2013()
/// });
/// let detection = det.detect(&signal)?;
/// println!("episodes={}", detection.episodes.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::detector::{FnScorer, WindowScorer};
    pub use crate::{
        BaselineDetector, BaselineParams, ClassifierDetector, ClassifierParams, DetectError,
        Detection, Encoding, NonWearDetector, RefinedDetector, RefinedParams, Sample, SignalView,
    };
}
