//! Multi-criterion detector on 1-second windows.
//!
//! Each second is summarised by the per-axis SD and range. A second is a
//! candidate when enough axes read low on SD or enough axes read low on
//! range. Candidate runs shorter than the minimum duration are dropped
//! outright. Retained runs are then widened over neighbouring seconds that
//! still show partial stillness (at least one low axis on either statistic)
//! without being candidates themselves, stopping at the first second where
//! neither statistic is low on any axis. Widened runs that meet are merged.
//!
//! A second containing a non-finite sample counts as a candidate. It still
//! has to belong to a run that reaches the minimum duration.

use super::params::RefinedParams;
use super::NonWearDetector;
use crate::diagnostics::TimingBreakdown;
use crate::episodes::{all_wear, detection_from_ranges, find_runs, merge_ranges};
use crate::error::DetectError;
use crate::signal::SignalView;
use crate::stats::{windowed_stats, Channels, WindowSpec};
use crate::types::Detection;
use log::debug;
use std::ops::Range;

pub struct RefinedDetector {
    params: RefinedParams,
}

/// Classification of one second.
#[derive(Clone, Debug)]
struct Second {
    samples: Range<usize>,
    candidate: bool,
    /// Some axis reads low on SD or range.
    partial: bool,
}

impl RefinedDetector {
    pub fn new(params: RefinedParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RefinedParams {
        &self.params
    }

    fn classify_seconds(&self, signal: &SignalView, sps: usize) -> Result<Vec<Second>, DetectError> {
        let p = &self.params;
        let std_thr = p.std_threshold_mg / 1000.0;
        let range_thr = p.range_threshold_mg / 1000.0;
        let spec = WindowSpec::tiling(sps).with_min_tail(sps.div_ceil(2));
        let seconds = windowed_stats(signal.samples, spec, Channels::Axes)?
            .map(|w| {
                if !w.finite {
                    return Second {
                        samples: w.start..w.end(),
                        candidate: true,
                        partial: true,
                    };
                }
                let low_std = w.count_std_below(std_thr);
                let low_range = w.count_range_below(range_thr);
                Second {
                    samples: w.start..w.end(),
                    candidate: low_std >= p.std_min_axes || low_range >= p.range_min_axes,
                    partial: low_std > 0 || low_range > 0,
                }
            })
            .collect();
        Ok(seconds)
    }
}

/// Widen `run` (second indices) over adjacent partial, non-candidate seconds.
fn widen(run: Range<usize>, seconds: &[Second]) -> Range<usize> {
    let absorbable = |s: &Second| s.partial && !s.candidate;
    let mut lo = run.start;
    while lo > 0 && absorbable(&seconds[lo - 1]) {
        lo -= 1;
    }
    let mut hi = run.end;
    while hi < seconds.len() && absorbable(&seconds[hi]) {
        hi += 1;
    }
    lo..hi
}

impl NonWearDetector for RefinedDetector {
    fn name(&self) -> &'static str {
        "refined"
    }

    fn detect_timed(
        &self,
        signal: &SignalView,
        timings: &mut TimingBreakdown,
    ) -> Result<Detection, DetectError> {
        signal.validate()?;
        self.params.validate()?;
        let p = &self.params;

        let sps = (signal.hz.round() as usize).max(1);
        let min_samples = p.min_non_wear_window_minutes as f64 * 60.0 * signal.hz as f64;
        if (signal.len() as f64) < min_samples {
            debug!(
                "RefinedDetector: {} samples shorter than minimum episode, all wear",
                signal.len()
            );
            return Ok(all_wear(signal, p.encoding));
        }

        let seconds = timings.time("seconds", || self.classify_seconds(signal, sps))?;
        let flags: Vec<bool> = seconds.iter().map(|s| s.candidate).collect();

        let mut ranges = Vec::new();
        let mut dropped = 0usize;
        for run in find_runs(&flags) {
            let span = seconds[run.start].samples.start..seconds[run.end - 1].samples.end;
            if ((span.end - span.start) as f64) < min_samples {
                dropped += 1;
                continue;
            }
            let wide = widen(run, &seconds);
            ranges.push(seconds[wide.start].samples.start..seconds[wide.end - 1].samples.end);
        }
        let ranges = merge_ranges(ranges, 0);
        debug!(
            "RefinedDetector: {} seconds, {} episodes kept, {} short runs dropped",
            seconds.len(),
            ranges.len(),
            dropped
        );
        Ok(timings.time("labels", || {
            detection_from_ranges(signal, &ranges, p.encoding)
        }))
    }
}
