use super::TimingBreakdown;
use crate::signal::SignalView;
use crate::types::Detection;
use serde::Serialize;

/// Result produced by [`NonWearDetector::detect_with_report`](crate::NonWearDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub detector: &'static str,
    pub input: InputDescriptor,
    pub detection: Detection,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub samples: usize,
    pub hz: f32,
    pub duration_seconds: f64,
}

impl InputDescriptor {
    pub fn from_signal(signal: &SignalView) -> Self {
        Self {
            samples: signal.len(),
            hz: signal.hz,
            duration_seconds: signal.len() as f64 / signal.hz as f64,
        }
    }
}

impl DetectionReport {
    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        let non_wear = self.detection.non_wear_samples();
        format!(
            "{}: {} episodes, {:.1}% non-wear over {:.1} min ({:.3} ms)",
            self.detector,
            self.detection.episodes.len(),
            if self.input.samples > 0 {
                100.0 * non_wear as f64 / self.input.samples as f64
            } else {
                0.0
            },
            self.input.duration_seconds / 60.0,
            self.timings.total_ms
        )
    }
}
