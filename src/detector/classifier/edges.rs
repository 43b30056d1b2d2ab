//! Episode-edge classification.
//!
//! 1. Candidate episodes: tiled windows of `candidate_window_minutes` whose
//!    SD is at or below `std_threshold` on every axis. Each run of candidate
//!    windows is grown in 60-second steps while the SD over the whole grown
//!    range stays under the threshold, and runs shorter than
//!    `min_segment_minutes` are dropped.
//! 2. Candidates closer than `merge_distance_minutes` (plus a few samples of
//!    slack) are merged.
//! 3. Both edges are moved outward in 1-second steps while each new second
//!    stays under the threshold, for at most `max_edge_search_minutes`.
//! 4. The window right before the start and right after the stop are
//!    scored. An edge without a full window uses `edge_default`. The two
//!    decisions are combined with AND or OR.
//!
//! Everything here runs at the canonical rate.

use super::{ClassifierDetector, WindowScorer};
use crate::detector::params::{EpisodeEdgeOptions, StartStopDecision};
use crate::episodes::merge_ranges;
use crate::stats::{slice_stats, windowed_stats, Channels, WindowSpec};
use crate::types::Sample;
use log::debug;
use std::ops::Range;

const GROW_STEP_SECONDS: f64 = 60.0;

pub(super) fn classify<S: WindowScorer>(
    det: &ClassifierDetector<S>,
    samples: &[Sample],
    opts: &EpisodeEdgeOptions,
) -> (Vec<bool>, Vec<f32>) {
    let hz = det.params.canonical_hz as f64;
    let sps = (hz.round() as usize).max(1);
    let win = det.params.window_len();
    let n = samples.len();

    let candidates = find_candidates(samples, opts, det.params.min_segment_minutes, hz);
    let grouped = merge_ranges(candidates, merge_gap(opts, hz));
    let max_steps = (opts.max_edge_search_minutes as f64 * 60.0).round() as usize;

    let mut kept = Vec::new();
    let mut scores = Vec::new();
    for range in grouped {
        let range = refine_edges(samples, range, sps, max_steps, opts.std_threshold);

        let start_nw = if range.start >= win {
            let score = det.score_window(&samples[range.start - win..range.start]);
            scores.push(score);
            det.is_non_wear(score)
        } else {
            opts.edge_default
        };
        let stop_nw = if range.end + win <= n {
            let score = det.score_window(&samples[range.end..range.end + win]);
            scores.push(score);
            det.is_non_wear(score)
        } else {
            opts.edge_default
        };

        let accepted = match opts.decision {
            StartStopDecision::And => start_nw && stop_nw,
            StartStopDecision::Or => start_nw || stop_nw,
        };
        debug!(
            "episode {}..{} start={} stop={} accepted={}",
            range.start, range.end, start_nw, stop_nw, accepted
        );
        if accepted {
            kept.push(range);
        }
    }

    let mut flags = vec![false; n];
    for r in merge_ranges(kept, 0) {
        flags[r].fill(true);
    }
    (flags, scores)
}

/// Gap for [`merge_ranges`] between half-open candidates. Two candidates
/// merge when the next start lies at most the merge distance plus the
/// correction after the last sample of the previous one.
pub(super) fn merge_gap(opts: &EpisodeEdgeOptions, hz: f64) -> usize {
    ((opts.merge_distance_minutes as f64 * 60.0 * hz).round() as usize
        + opts.merge_correction_samples)
        .saturating_sub(1)
}

/// Low-variance candidate ranges at minute resolution.
fn find_candidates(
    samples: &[Sample],
    opts: &EpisodeEdgeOptions,
    min_segment_minutes: f32,
    hz: f64,
) -> Vec<Range<usize>> {
    let window = ((opts.candidate_window_minutes as f64 * 60.0 * hz).round() as usize).max(1);
    let sps = (hz.round() as usize).max(1);
    let spec = WindowSpec::tiling(window).with_min_tail(sps.min(window));
    let flagged: Vec<Range<usize>> = match windowed_stats(samples, spec, Channels::Axes) {
        Ok(iter) => iter
            .filter(|w| !w.finite || w.all_std_at_most(opts.std_threshold))
            .map(|w| w.start..w.end())
            .collect(),
        Err(_) => return Vec::new(),
    };
    let step = (GROW_STEP_SECONDS * hz).round() as usize;
    let min_len = (min_segment_minutes as f64 * 60.0 * hz).round() as usize;

    let grown: Vec<Range<usize>> = merge_ranges(flagged, 0)
        .into_iter()
        .map(|r| grow(samples, r, step, opts.std_threshold))
        .filter(|r| r.end - r.start >= min_len)
        .collect();
    merge_ranges(grown, 0)
}

/// Extend `range` by whole `step`s while the SD over the extended range holds.
fn grow(samples: &[Sample], mut range: Range<usize>, step: usize, threshold: f32) -> Range<usize> {
    if step == 0 {
        return range;
    }
    let still = |r: Range<usize>| {
        let stats = slice_stats(&samples[r], Channels::Axes);
        stats.finite && stats.all_std_at_most(threshold)
    };
    while range.start >= step && still(range.start - step..range.end) {
        range.start -= step;
    }
    while range.end + step <= samples.len() && still(range.start..range.end + step) {
        range.end += step;
    }
    range
}

/// Move both edges outward one second at a time while each second is still.
fn refine_edges(
    samples: &[Sample],
    mut range: Range<usize>,
    sps: usize,
    max_steps: usize,
    threshold: f32,
) -> Range<usize> {
    let still = |r: Range<usize>| {
        let stats = slice_stats(&samples[r], Channels::Axes);
        stats.finite && stats.all_std_at_most(threshold)
    };
    for _ in 0..max_steps {
        if range.end + sps > samples.len() || !still(range.end..range.end + sps) {
            break;
        }
        range.end += sps;
    }
    for _ in 0..max_steps {
        if range.start < sps || !still(range.start - sps..range.start) {
            break;
        }
        range.start -= sps;
    }
    range
}

#[cfg(test)]
pub(super) fn candidate_flags(
    samples: &[Sample],
    opts: &EpisodeEdgeOptions,
    min_segment_minutes: f32,
    hz: f64,
) -> Vec<bool> {
    let mut flags = vec![false; samples.len()];
    for r in find_candidates(samples, opts, min_segment_minutes, hz) {
        flags[r].fill(true);
    }
    flags
}

