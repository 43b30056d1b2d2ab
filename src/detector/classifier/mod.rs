//! Learned window classifier.
//!
//! Pipeline
//! - Resample to the scorer's canonical rate when the input differs; the
//!   result carries a [`DetectionWarning::ResamplingPrecision`] advisory.
//! - Tiling mode: score consecutive non-overlapping windows and broadcast
//!   each decision over its samples. A trailing partial window is not scored
//!   and stays wear.
//! - Episode-edge mode: see `edges`.
//! - Map canonical-rate decisions back to the input rate by nearest sample
//!   and derive episodes from the final label vector.
//!
//! Windows containing non-finite samples are never passed to the scorer;
//! they are labelled non-wear and reported with a NaN score. A NaN score
//! from the scorer is treated the same way.

mod edges;
mod scorer;

pub use scorer::{FnScorer, LinearWindowModel, WindowScorer};

use super::params::{ClassifierMode, ClassifierParams};
use super::NonWearDetector;
use crate::diagnostics::TimingBreakdown;
use crate::episodes::detection_from_labels;
use crate::error::DetectError;
use crate::resample::{nearest_index, resample, resampled_len};
use crate::signal::SignalView;
use crate::types::{Detection, DetectionWarning, Sample};
use log::{debug, warn};
use std::borrow::Cow;
use std::path::Path;

pub struct ClassifierDetector<S> {
    params: ClassifierParams,
    scorer: S,
}

impl ClassifierDetector<LinearWindowModel> {
    /// Load a [`LinearWindowModel`] artifact and build the detector. Fails
    /// before any detection when the artifact is unusable.
    pub fn from_model_file(
        params: ClassifierParams,
        path: impl AsRef<Path>,
    ) -> Result<Self, DetectError> {
        let model = LinearWindowModel::load(path)?;
        Self::new(params, model)
    }
}

impl<S: WindowScorer> ClassifierDetector<S> {
    /// Build a detector, checking that the scorer's window matches
    /// `window_seconds` at the canonical rate.
    pub fn new(params: ClassifierParams, scorer: S) -> Result<Self, DetectError> {
        params.validate()?;
        if scorer.window_len() != params.window_len() {
            return Err(DetectError::invalid(format!(
                "scorer expects {} samples per window, parameters give {} ({} s at {} Hz)",
                scorer.window_len(),
                params.window_len(),
                params.window_seconds,
                params.canonical_hz
            )));
        }
        Ok(Self { params, scorer })
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Score one canonical-rate window, mapping unusable windows to NaN.
    fn score_window(&self, window: &[Sample]) -> f32 {
        if window.iter().any(|s| !s.iter().all(|v| v.is_finite())) {
            return f32::NAN;
        }
        self.scorer.score(window)
    }

    /// Decision for a score: non-wear at or above the threshold, or unusable.
    #[inline]
    fn is_non_wear(&self, score: f32) -> bool {
        score.is_nan() || score >= self.params.decision_threshold
    }

    fn tile(&self, samples: &[Sample]) -> (Vec<bool>, Vec<f32>) {
        let win = self.params.window_len();
        let mut flags = vec![false; samples.len()];
        let mut scores = Vec::with_capacity(samples.len() / win);
        for (k, window) in samples.chunks_exact(win).enumerate() {
            let score = self.score_window(window);
            if self.is_non_wear(score) {
                flags[k * win..(k + 1) * win].fill(true);
            }
            scores.push(score);
        }
        (flags, scores)
    }
}

impl<S: WindowScorer> NonWearDetector for ClassifierDetector<S> {
    fn name(&self) -> &'static str {
        match self.params.mode {
            ClassifierMode::Tiling => "classifier",
            ClassifierMode::EpisodeEdges(_) => "classifier-episode-edges",
        }
    }

    fn detect_timed(
        &self,
        signal: &SignalView,
        timings: &mut TimingBreakdown,
    ) -> Result<Detection, DetectError> {
        signal.validate()?;
        let p = &self.params;
        let encoding = p.encoding;
        let canonical = p.canonical_hz;
        let win = p.window_len();

        let mut warnings = Vec::new();
        let rate_differs = (signal.hz - canonical).abs() > f32::EPSILON * canonical;
        if rate_differs {
            warn!(
                "ClassifierDetector: input at {} Hz resampled to {} Hz; results on resampled data are not validated",
                signal.hz, canonical
            );
            warnings.push(DetectionWarning::ResamplingPrecision {
                from_hz: signal.hz,
                to_hz: canonical,
            });
        }

        let canonical_len = if rate_differs {
            resampled_len(signal.len(), signal.hz, canonical)
        } else {
            signal.len()
        };
        if canonical_len < win || (rate_differs && signal.len() < 2) {
            debug!(
                "ClassifierDetector: {} canonical samples shorter than one {}-sample window, all wear",
                canonical_len, win
            );
            let labels = vec![encoding.wear; signal.len()];
            let scores = p.keep_scores.then(Vec::new);
            return Ok(detection_from_labels(signal, labels, encoding, warnings, scores));
        }

        let work: Cow<'_, [Sample]> = if rate_differs {
            Cow::Owned(timings.time("resample", || resample(signal.samples, signal.hz, canonical))?)
        } else {
            Cow::Borrowed(signal.samples)
        };

        let (flags, scores) = match &p.mode {
            ClassifierMode::Tiling => timings.time("score", || self.tile(&work)),
            ClassifierMode::EpisodeEdges(opts) => {
                timings.time("episode_edges", || edges::classify(self, &work, opts))
            }
        };
        debug!(
            "ClassifierDetector: {} windows scored on {} canonical samples",
            scores.len(),
            work.len()
        );

        let labels = timings.time("labels", || {
            if rate_differs {
                (0..signal.len())
                    .map(|i| {
                        let j = nearest_index(i, signal.hz, canonical, flags.len());
                        encoding.label(flags[j])
                    })
                    .collect()
            } else {
                flags.iter().map(|&f| encoding.label(f)).collect()
            }
        });
        let scores = p.keep_scores.then_some(scores);
        Ok(detection_from_labels(signal, labels, encoding, warnings, scores))
    }
}
