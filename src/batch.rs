//! Run one detector over many independent recordings in parallel.

use crate::detector::NonWearDetector;
use crate::error::DetectError;
use crate::signal::SignalView;
use crate::types::Detection;
use log::debug;
use rayon::prelude::*;

/// Detect non-wear on every signal, one rayon task per signal.
///
/// Results keep the order of `signals`; a failing signal does not stop the
/// others.
pub fn detect_batch<D>(detector: &D, signals: &[SignalView]) -> Vec<Result<Detection, DetectError>>
where
    D: NonWearDetector + ?Sized,
{
    debug!(
        "detect_batch: {} signals with {}",
        signals.len(),
        detector.name()
    );
    signals
        .par_iter()
        .map(|signal| detector.detect(signal))
        .collect()
}
