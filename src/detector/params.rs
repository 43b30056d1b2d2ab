//! Parameter types configuring the detectors.
//!
//! Every struct deserializes with `#[serde(default)]`, so a config file only
//! needs to name the fields it overrides. Defaults follow the published
//! parameter sets; named presets cover the other published variants.

use crate::error::DetectError;
use crate::types::Encoding;
use serde::{Deserialize, Serialize};

/// Sliding-window standard-deviation baseline.
///
/// - `std_threshold`: window SD (g) strictly below which a window is non-wear.
/// - `min_interval_seconds`: window length; one qualifying window is already
///   a complete episode.
/// - `use_vector_magnitude`: evaluate the Euclidean norm instead of requiring
///   all three axes to qualify.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineParams {
    pub std_threshold: f32,
    pub min_interval_seconds: f32,
    pub use_vector_magnitude: bool,
    pub encoding: Encoding,
}

impl Default for BaselineParams {
    fn default() -> Self {
        Self::xyz()
    }
}

impl BaselineParams {
    /// Per-axis variant: 0.004 g over 90 minutes.
    pub fn xyz() -> Self {
        Self {
            std_threshold: 0.004,
            min_interval_seconds: 90.0 * 60.0,
            use_vector_magnitude: false,
            encoding: Encoding::default(),
        }
    }

    /// Vector-magnitude variant: 0.004 g over 105 minutes.
    pub fn vector_magnitude() -> Self {
        Self {
            std_threshold: 0.004,
            min_interval_seconds: 105.0 * 60.0,
            use_vector_magnitude: true,
            encoding: Encoding::default(),
        }
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        validate_encoding(self.encoding)?;
        ensure_positive("std_threshold", self.std_threshold)?;
        ensure_positive("min_interval_seconds", self.min_interval_seconds)
    }
}

/// Multi-criterion detector on 1-second windows.
///
/// A second is a candidate when at least `std_min_axes` axes have an SD below
/// `std_threshold_mg`, or at least `range_min_axes` axes have a range below
/// `range_threshold_mg`. Candidate runs shorter than
/// `min_non_wear_window_minutes` are discarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinedParams {
    pub min_non_wear_window_minutes: f32,
    pub std_threshold_mg: f32,
    pub std_min_axes: usize,
    pub range_threshold_mg: f32,
    pub range_min_axes: usize,
    pub encoding: Encoding,
}

impl Default for RefinedParams {
    fn default() -> Self {
        Self::hees_2013()
    }
}

impl RefinedParams {
    /// 60-minute minimum, 3 mg SD / 50 mg range on two axes.
    pub fn hees_2013() -> Self {
        Self {
            min_non_wear_window_minutes: 60.0,
            std_threshold_mg: 3.0,
            std_min_axes: 2,
            range_threshold_mg: 50.0,
            range_min_axes: 2,
            encoding: Encoding::default(),
        }
    }

    /// Same criteria with the earlier 30-minute minimum.
    pub fn hees_2011() -> Self {
        Self {
            min_non_wear_window_minutes: 30.0,
            ..Self::hees_2013()
        }
    }

    /// Hyperparameters tuned against ECG-verified wear.
    pub fn syed_2020_optimized() -> Self {
        Self {
            min_non_wear_window_minutes: 135.0,
            std_threshold_mg: 7.0,
            std_min_axes: 1,
            range_threshold_mg: 1.0,
            range_min_axes: 1,
            encoding: Encoding::default(),
        }
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        validate_encoding(self.encoding)?;
        ensure_positive("min_non_wear_window_minutes", self.min_non_wear_window_minutes)?;
        ensure_positive("std_threshold_mg", self.std_threshold_mg)?;
        ensure_positive("range_threshold_mg", self.range_threshold_mg)?;
        ensure_axis_count("std_min_axes", self.std_min_axes)?;
        ensure_axis_count("range_min_axes", self.range_min_axes)
    }
}

/// How the classifier turns window scores into episodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierMode {
    /// Score every non-overlapping window and broadcast its decision.
    #[default]
    Tiling,
    /// Find low-variance candidate episodes and score the windows just
    /// before their start and just after their stop.
    EpisodeEdges(EpisodeEdgeOptions),
}

/// Logical combination of the start and stop window decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartStopDecision {
    #[default]
    And,
    Or,
}

/// Candidate search and edge refinement for [`ClassifierMode::EpisodeEdges`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeEdgeOptions {
    /// Candidate windows need an SD (g) at or below this on every axis.
    pub std_threshold: f32,
    /// Length of the tiled candidate windows.
    pub candidate_window_minutes: f32,
    /// Candidates at most this far apart are merged.
    pub merge_distance_minutes: f32,
    /// Extra samples tolerated on top of the merge distance.
    pub merge_correction_samples: usize,
    /// Limit of the 1-second edge search on either side.
    pub max_edge_search_minutes: f32,
    /// Decision for a start/stop window that falls outside the recording.
    pub edge_default: bool,
    pub decision: StartStopDecision,
}

impl Default for EpisodeEdgeOptions {
    fn default() -> Self {
        Self {
            std_threshold: 0.004,
            candidate_window_minutes: 1.0,
            merge_distance_minutes: 5.0,
            merge_correction_samples: 3,
            max_edge_search_minutes: 5.0,
            edge_default: true,
            decision: StartStopDecision::And,
        }
    }
}

/// Learned window classifier.
///
/// - `canonical_hz`: rate the scorer was trained on; other inputs are
///   resampled and flagged with a warning.
/// - `window_seconds`: trained window duration.
/// - `decision_threshold`: scores (non-wear probability) at or above this
///   are non-wear.
/// - `min_segment_minutes`: minimum candidate length in episode-edge mode.
///   Tiling mode applies no duration filter.
/// - `keep_scores`: return the raw per-window scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    pub canonical_hz: f32,
    pub window_seconds: f32,
    pub decision_threshold: f32,
    pub min_segment_minutes: f32,
    pub keep_scores: bool,
    pub mode: ClassifierMode,
    pub encoding: Encoding,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            canonical_hz: 100.0,
            window_seconds: 7.0,
            decision_threshold: 0.5,
            min_segment_minutes: 1.0,
            keep_scores: false,
            mode: ClassifierMode::Tiling,
            encoding: Encoding::default(),
        }
    }
}

impl ClassifierParams {
    /// Window length in samples at the canonical rate.
    pub fn window_len(&self) -> usize {
        (self.window_seconds as f64 * self.canonical_hz as f64).round() as usize
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        validate_encoding(self.encoding)?;
        ensure_positive("canonical_hz", self.canonical_hz)?;
        ensure_positive("window_seconds", self.window_seconds)?;
        if self.window_len() == 0 {
            return Err(DetectError::invalid("classifier window is shorter than one sample"));
        }
        if !self.decision_threshold.is_finite() {
            return Err(DetectError::invalid("decision_threshold must be finite"));
        }
        if let ClassifierMode::EpisodeEdges(opts) = &self.mode {
            ensure_positive("min_segment_minutes", self.min_segment_minutes)?;
            ensure_positive("std_threshold", opts.std_threshold)?;
            ensure_positive("candidate_window_minutes", opts.candidate_window_minutes)?;
            ensure_non_negative("merge_distance_minutes", opts.merge_distance_minutes)?;
            ensure_non_negative("max_edge_search_minutes", opts.max_edge_search_minutes)?;
        }
        Ok(())
    }
}

fn validate_encoding(encoding: Encoding) -> Result<(), DetectError> {
    if encoding.wear == encoding.non_wear {
        return Err(DetectError::invalid(format!(
            "wear and non-wear encodings must differ, both are {}",
            encoding.wear
        )));
    }
    Ok(())
}

fn ensure_positive(name: &str, value: f32) -> Result<(), DetectError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DetectError::invalid(format!("{name} must be positive, got {value}")))
    }
}

fn ensure_non_negative(name: &str, value: f32) -> Result<(), DetectError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DetectError::invalid(format!("{name} must be non-negative, got {value}")))
    }
}

fn ensure_axis_count(name: &str, value: usize) -> Result<(), DetectError> {
    if (1..=3).contains(&value) {
        Ok(())
    } else {
        Err(DetectError::invalid(format!("{name} must be within 1..=3, got {value}")))
    }
}
