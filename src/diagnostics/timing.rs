use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Timing entry describing a single stage of a detector run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for the detector run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Run `f`, recording its duration under `label`.
    pub fn time<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.push(label, elapsed_ms(start));
        out
    }
}

#[inline]
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_recorded_in_call_order() {
        let mut timings = TimingBreakdown::default();
        let n = timings.time("seconds", || 3);
        let label = timings.time("labels", || "done");
        assert_eq!((n, label), (3, "done"));
        let labels: Vec<&str> = timings.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["seconds", "labels"]);
        assert!(timings.stages.iter().all(|s| s.elapsed_ms >= 0.0));
        assert_eq!(timings.total_ms, 0.0);
    }
}
