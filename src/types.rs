use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One tri-axial acceleration sample in gravity units.
pub type Sample = Vector3<f32>;

/// Label values written into the per-sample wear vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Encoding {
    pub wear: u8,
    pub non_wear: u8,
}

impl Default for Encoding {
    fn default() -> Self {
        Self {
            wear: 0,
            non_wear: 1,
        }
    }
}

impl Encoding {
    #[inline]
    pub fn label(&self, non_wear: bool) -> u8 {
        if non_wear {
            self.non_wear
        } else {
            self.wear
        }
    }
}

/// Contiguous run of non-wear samples. `stop_index` is inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub start_index: usize,
    pub stop_index: usize,
    pub start_timestamp: i64,
    pub stop_timestamp: i64,
}

impl Episode {
    /// Number of samples covered by the episode.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.stop_index - self.start_index + 1
    }

    /// Duration in seconds at the given sampling rate.
    #[inline]
    pub fn duration_seconds(&self, hz: f32) -> f32 {
        self.sample_count() as f32 / hz
    }
}

/// Non-fatal advisories attached to a detection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DetectionWarning {
    /// The input was resampled to the classifier's canonical rate; behaviour
    /// on resampled signals has not been validated.
    ResamplingPrecision { from_hz: f32, to_hz: f32 },
}

/// Output of a single detector run.
///
/// Equality is exact: window scores are compared by bit pattern, so two runs
/// that both recorded a NaN score for an unscored window compare equal.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// One label per input sample, either `encoding.wear` or `encoding.non_wear`.
    pub labels: Vec<u8>,
    /// Sorted, non-overlapping non-wear episodes.
    pub episodes: Vec<Episode>,
    pub encoding: Encoding,
    pub warnings: Vec<DetectionWarning>,
    /// Raw classifier scores per window, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_scores: Option<Vec<f32>>,
}

impl Detection {
    /// Number of samples labelled non-wear.
    pub fn non_wear_samples(&self) -> usize {
        self.labels
            .iter()
            .filter(|&&l| l == self.encoding.non_wear)
            .count()
    }

    #[inline]
    pub fn is_non_wear(&self, index: usize) -> bool {
        self.labels[index] == self.encoding.non_wear
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl PartialEq for Detection {
    fn eq(&self, other: &Self) -> bool {
        let same_scores = match (&self.window_scores, &other.window_scores) {
            (Some(a), Some(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (None, None) => true,
            _ => false,
        };
        self.labels == other.labels
            && self.episodes == other.episodes
            && self.encoding == other.encoding
            && self.warnings == other.warnings
            && same_scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(scores: Option<Vec<f32>>) -> Detection {
        Detection {
            labels: vec![1, 1, 0],
            episodes: vec![Episode {
                start_index: 0,
                stop_index: 1,
                start_timestamp: 0,
                stop_timestamp: 10,
            }],
            encoding: Encoding::default(),
            warnings: Vec::new(),
            window_scores: scores,
        }
    }

    #[test]
    fn nan_scores_compare_by_bits() {
        let a = detection(Some(vec![f32::NAN, 0.2]));
        assert_eq!(a, a.clone());
        assert_ne!(a, detection(Some(vec![f32::NAN, 0.3])));
        assert_ne!(a, detection(None));
        assert_eq!(detection(None), detection(None));
    }

    #[test]
    fn signed_zero_scores_differ() {
        assert_ne!(detection(Some(vec![0.0])), detection(Some(vec![-0.0])));
    }
}
