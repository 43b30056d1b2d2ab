//! Error taxonomy shared by every detector.
//!
//! Advisories that do not stop detection (e.g. resampling) are reported as
//! [`crate::types::DetectionWarning`] values on the result instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectError {
    /// Empty or malformed signal, mismatched timestamps, non-positive rates
    /// or window sizes, or an inconsistent configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Not enough samples for the requested operation.
    #[error("insufficient data: need at least {needed} samples, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// Model artifact missing or unreadable.
    #[error("model unavailable at {}: {reason}", path.display())]
    ModelUnavailable { path: PathBuf, reason: String },
}

impl DetectError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DetectError::InvalidInput(msg.into())
    }
}
