//! Windowed statistics over tri-axial signals.
//!
//! Windows start at sample 0 and advance by `step` samples. Each window
//! yields the population standard deviation and peak-to-trough range per
//! channel, where the channels are either the three axes or the single
//! vector-magnitude channel. The sequence is lazy: statistics are computed
//! as the iterator is advanced, so a detector can consume a multi-million
//! sample recording without materialising per-window buffers.
//!
//! Boundary handling
//! - Windows never read past the end of the signal. The first window that
//!   would cross the end is truncated; it is emitted only when its length is
//!   at least `min_tail` and iteration stops after it.
//! - A window containing any non-finite component is flagged
//!   (`finite == false`) and carries NaN statistics. Detectors treat such
//!   windows as meeting their non-wear criteria instead of comparing NaN.

mod windows;

pub use windows::{slice_stats, windowed_stats, WindowStatsIter};

use crate::error::DetectError;

/// Channels the statistics are computed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channels {
    /// x, y and z independently.
    Axes,
    /// Euclidean norm of each sample.
    VectorMagnitude,
}

impl Channels {
    #[inline]
    pub fn count(self) -> usize {
        match self {
            Channels::Axes => 3,
            Channels::VectorMagnitude => 1,
        }
    }
}

/// Window geometry in samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    pub len: usize,
    pub step: usize,
    /// Shortest truncated tail window that is still emitted.
    pub min_tail: usize,
}

impl WindowSpec {
    /// Non-overlapping windows; truncated tails are dropped.
    pub fn tiling(len: usize) -> Self {
        Self {
            len,
            step: len,
            min_tail: len,
        }
    }

    pub fn with_min_tail(mut self, min_tail: usize) -> Self {
        self.min_tail = min_tail;
        self
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        if self.len == 0 || self.step == 0 {
            return Err(DetectError::invalid(format!(
                "window length and step must be positive, got len={} step={}",
                self.len, self.step
            )));
        }
        if self.step > self.len {
            return Err(DetectError::invalid(format!(
                "window step {} exceeds window length {}",
                self.step, self.len
            )));
        }
        Ok(())
    }
}

/// Statistics of one window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowStats {
    /// First sample index of the window.
    pub start: usize,
    /// Number of samples in the window (shorter than `WindowSpec::len` for a tail).
    pub len: usize,
    pub channels: Channels,
    pub finite: bool,
    std: [f32; 3],
    range: [f32; 3],
}

impl WindowStats {
    /// One past the last sample index.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn std(&self) -> &[f32] {
        &self.std[..self.channels.count()]
    }

    #[inline]
    pub fn range(&self) -> &[f32] {
        &self.range[..self.channels.count()]
    }

    /// Channels whose standard deviation is strictly below `threshold`.
    pub fn count_std_below(&self, threshold: f32) -> usize {
        self.std().iter().filter(|&&s| s < threshold).count()
    }

    /// Channels whose range is strictly below `threshold`.
    pub fn count_range_below(&self, threshold: f32) -> usize {
        self.range().iter().filter(|&&r| r < threshold).count()
    }

    /// Every channel has a standard deviation strictly below `threshold`.
    pub fn all_std_below(&self, threshold: f32) -> bool {
        self.count_std_below(threshold) == self.channels.count()
    }

    /// Every channel has a standard deviation at or below `threshold`.
    pub fn all_std_at_most(&self, threshold: f32) -> bool {
        self.std().iter().all(|&s| s <= threshold)
    }
}
