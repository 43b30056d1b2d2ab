use super::{Channels, WindowSpec, WindowStats};
use crate::error::DetectError;
use crate::signal::{sample_magnitude, VmOptions};
use crate::types::Sample;

/// Lazy iterator over per-window statistics.
#[derive(Clone, Debug)]
pub struct WindowStatsIter<'a> {
    samples: &'a [Sample],
    spec: WindowSpec,
    channels: Channels,
    next_start: usize,
    done: bool,
}

/// Iterate statistics of `spec`-shaped windows over `samples`.
pub fn windowed_stats(
    samples: &[Sample],
    spec: WindowSpec,
    channels: Channels,
) -> Result<WindowStatsIter<'_>, DetectError> {
    spec.validate()?;
    Ok(WindowStatsIter {
        samples,
        spec,
        channels,
        next_start: 0,
        done: false,
    })
}

impl Iterator for WindowStatsIter<'_> {
    type Item = WindowStats;

    fn next(&mut self) -> Option<WindowStats> {
        if self.done || self.next_start >= self.samples.len() {
            return None;
        }
        let start = self.next_start;
        let end = (start + self.spec.len).min(self.samples.len());
        if end - start < self.spec.len {
            self.done = true;
            if end - start < self.spec.min_tail {
                return None;
            }
        }
        self.next_start = start + self.spec.step;
        let mut stats = slice_stats(&self.samples[start..end], self.channels);
        stats.start = start;
        Some(stats)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.samples.len().saturating_sub(self.next_start);
        (0, Some(remaining.div_ceil(self.spec.step)))
    }
}

/// Statistics over a whole slice, reported with `start == 0`.
pub fn slice_stats(window: &[Sample], channels: Channels) -> WindowStats {
    let mut stats = WindowStats {
        start: 0,
        len: window.len(),
        channels,
        finite: true,
        std: [0.0; 3],
        range: [0.0; 3],
    };
    if window.is_empty() {
        return stats;
    }
    if window.iter().any(|s| !s.iter().all(|v| v.is_finite())) {
        stats.finite = false;
        stats.std = [f32::NAN; 3];
        stats.range = [f32::NAN; 3];
        return stats;
    }
    for c in 0..channels.count() {
        let (std, range) = channel_std_range(window, |s| channel_value(s, channels, c));
        stats.std[c] = std;
        stats.range[c] = range;
    }
    stats
}

#[inline]
fn channel_value(sample: &Sample, channels: Channels, c: usize) -> f64 {
    match channels {
        Channels::Axes => sample[c] as f64,
        Channels::VectorMagnitude => sample_magnitude(sample, VmOptions::default()),
    }
}

fn channel_std_range(window: &[Sample], value: impl Fn(&Sample) -> f64) -> (f32, f32) {
    let n = window.len() as f64;
    let mut sum = 0.0f64;
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for s in window {
        let v = value(s);
        sum += v;
        lo = lo.min(v);
        hi = hi.max(v);
    }
    let mean = sum / n;
    let var = window
        .iter()
        .map(|s| {
            let d = value(s) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (var.sqrt() as f32, (hi - lo) as f32)
}
