//! Run extraction and episode bookkeeping shared by the detectors.
//!
//! Detectors work with half-open sample ranges internally. The public
//! [`Episode`] uses an inclusive stop index and carries timestamps looked up
//! through the [`SignalView`]. Episodes are always derived from the final
//! label vector so that the two representations agree exactly.

use crate::signal::SignalView;
use crate::types::{Detection, DetectionWarning, Encoding, Episode};
use std::ops::Range;

/// Maximal runs of `true` in `flags` as half-open ranges.
pub fn find_runs(flags: &[bool]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &flag) in flags.iter().enumerate() {
        match (flag, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..flags.len());
    }
    runs
}

/// Merge ranges whose gap (`next.start - cur.end`) is at most `max_gap`.
///
/// Input order does not matter; output is sorted and non-overlapping.
/// `max_gap == 0` merges only touching or overlapping ranges.
pub fn merge_ranges(mut ranges: Vec<Range<usize>>, max_gap: usize) -> Vec<Range<usize>> {
    ranges.retain(|r| r.start < r.end);
    if ranges.len() < 2 {
        return ranges;
    }
    ranges.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for r in ranges {
        match merged.last_mut() {
            Some(cur) if r.start <= cur.end.saturating_add(max_gap) => {
                cur.end = cur.end.max(r.end);
            }
            _ => merged.push(r),
        }
    }
    merged
}

/// Label vector of length `n` with every sample inside `ranges` marked non-wear.
pub fn labels_from_ranges(n: usize, ranges: &[Range<usize>], encoding: Encoding) -> Vec<u8> {
    let mut labels = vec![encoding.wear; n];
    for r in ranges {
        let end = r.end.min(n);
        if r.start < end {
            labels[r.start..end].fill(encoding.non_wear);
        }
    }
    labels
}

/// Episodes of contiguous non-wear labels.
pub fn episodes_from_labels(labels: &[u8], encoding: Encoding, signal: &SignalView) -> Vec<Episode> {
    let flags: Vec<bool> = labels.iter().map(|&l| l == encoding.non_wear).collect();
    find_runs(&flags)
        .into_iter()
        .map(|r| Episode {
            start_index: r.start,
            stop_index: r.end - 1,
            start_timestamp: signal.timestamp(r.start),
            stop_timestamp: signal.timestamp(r.end - 1),
        })
        .collect()
}

/// Assemble a [`Detection`] from labels, deriving the episode list.
pub(crate) fn detection_from_labels(
    signal: &SignalView,
    labels: Vec<u8>,
    encoding: Encoding,
    warnings: Vec<DetectionWarning>,
    window_scores: Option<Vec<f32>>,
) -> Detection {
    let episodes = episodes_from_labels(&labels, encoding, signal);
    Detection {
        labels,
        episodes,
        encoding,
        warnings,
        window_scores,
    }
}

/// Assemble a [`Detection`] from non-wear sample ranges.
pub(crate) fn detection_from_ranges(
    signal: &SignalView,
    ranges: &[Range<usize>],
    encoding: Encoding,
) -> Detection {
    let labels = labels_from_ranges(signal.len(), ranges, encoding);
    detection_from_labels(signal, labels, encoding, Vec::new(), None)
}

/// All-wear result with no episodes.
pub(crate) fn all_wear(signal: &SignalView, encoding: Encoding) -> Detection {
    detection_from_ranges(signal, &[], encoding)
}
