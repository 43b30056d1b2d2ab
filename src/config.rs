//! JSON run description consumed by the `detect_nonwear` tool.
//!
//! ```json
//! {
//!   "input": "recording.csv",
//!   "hz": 100.0,
//!   "detector": { "type": "refined", "min_non_wear_window_minutes": 60 },
//!   "output": "out/summary.json"
//! }
//! ```

use crate::detector::params::{BaselineParams, ClassifierParams, RefinedParams};
use crate::detector::{BaselineDetector, ClassifierDetector, NonWearDetector, RefinedDetector};
use crate::error::DetectError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    /// CSV with a header and `timestamp_ms,x,y,z` columns.
    pub input: PathBuf,
    /// Sampling rate of the input in Hz.
    pub hz: f32,
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Destination of the JSON summary.
    pub output: PathBuf,
    /// Include per-sample labels in the summary.
    #[serde(default)]
    pub write_labels: bool,
}

/// Detector selection, tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetectorConfig {
    Baseline(BaselineParams),
    Refined(RefinedParams),
    Classifier {
        /// Path to a `LinearWindowModel` JSON artifact.
        model: PathBuf,
        #[serde(default)]
        params: ClassifierParams,
    },
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig::Refined(RefinedParams::default())
    }
}

impl DetectorConfig {
    /// Instantiate the selected detector. Loading the classifier model
    /// happens here, before any signal is read.
    pub fn build(&self) -> Result<Box<dyn NonWearDetector>, DetectError> {
        Ok(match self {
            DetectorConfig::Baseline(p) => {
                p.validate()?;
                Box::new(BaselineDetector::new(p.clone()))
            }
            DetectorConfig::Refined(p) => {
                p.validate()?;
                Box::new(RefinedDetector::new(p.clone()))
            }
            DetectorConfig::Classifier { model, params } => {
                Box::new(ClassifierDetector::from_model_file(params.clone(), model)?)
            }
        })
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
