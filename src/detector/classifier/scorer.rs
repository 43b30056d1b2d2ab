//! Window scoring backends.
//!
//! The detector only relies on [`WindowScorer`]: a fixed window length and a
//! function from one window to a non-wear probability. Any classifier can be
//! plugged in as long as it honours the window contract.

use crate::error::DetectError;
use crate::stats::{slice_stats, Channels};
use crate::types::Sample;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Learned scoring function over fixed-length windows.
pub trait WindowScorer: Send + Sync {
    /// Number of samples the scorer expects per window.
    fn window_len(&self) -> usize;

    /// Probability in `[0, 1]` that `window` was recorded while not worn.
    /// `window.len() == self.window_len()` is guaranteed by the caller.
    fn score(&self, window: &[Sample]) -> f32;
}

impl<S: WindowScorer + ?Sized> WindowScorer for Box<S> {
    fn window_len(&self) -> usize {
        (**self).window_len()
    }

    fn score(&self, window: &[Sample]) -> f32 {
        (**self).score(window)
    }
}

/// Adapter turning a closure into a [`WindowScorer`].
pub struct FnScorer<F> {
    window_len: usize,
    f: F,
}

impl<F> FnScorer<F>
where
    F: Fn(&[Sample]) -> f32 + Send + Sync,
{
    pub fn new(window_len: usize, f: F) -> Self {
        Self { window_len, f }
    }
}

impl<F> WindowScorer for FnScorer<F>
where
    F: Fn(&[Sample]) -> f32 + Send + Sync,
{
    fn window_len(&self) -> usize {
        self.window_len
    }

    fn score(&self, window: &[Sample]) -> f32 {
        (self.f)(window)
    }
}

/// Logistic model over per-axis window statistics, stored as JSON.
///
/// `score = sigmoid(bias + std·w_std + range·w_range + mean·w_mean)` with the
/// statistics in g.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearWindowModel {
    pub window_len: usize,
    pub std_weights: [f32; 3],
    pub range_weights: [f32; 3],
    #[serde(default)]
    pub mean_weights: [f32; 3],
    pub bias: f32,
}

impl LinearWindowModel {
    /// Load a model artifact. Missing or malformed files are
    /// [`DetectError::ModelUnavailable`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DetectError> {
        let path = path.as_ref();
        let unavailable = |reason: String| DetectError::ModelUnavailable {
            path: path.to_path_buf(),
            reason,
        };
        let data = fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let model: Self = serde_json::from_str(&data).map_err(|e| unavailable(e.to_string()))?;
        if model.window_len == 0 {
            return Err(unavailable("window_len is zero".to_string()));
        }
        let finite = model
            .std_weights
            .iter()
            .chain(&model.range_weights)
            .chain(&model.mean_weights)
            .chain(std::iter::once(&model.bias))
            .all(|w| w.is_finite());
        if !finite {
            return Err(unavailable("non-finite weights".to_string()));
        }
        Ok(model)
    }
}

impl WindowScorer for LinearWindowModel {
    fn window_len(&self) -> usize {
        self.window_len
    }

    fn score(&self, window: &[Sample]) -> f32 {
        let stats = slice_stats(window, Channels::Axes);
        let n = window.len().max(1) as f32;
        let mean = window.iter().fold(Sample::zeros(), |acc, s| acc + s) / n;
        let mut z = self.bias;
        for c in 0..3 {
            z += self.std_weights[c] * stats.std()[c]
                + self.range_weights[c] * stats.range()[c]
                + self.mean_weights[c] * mean[c];
        }
        1.0 / (1.0 + (-z).exp())
    }
}
