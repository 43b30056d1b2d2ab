//! Diagnostics returned alongside a detection.
//!
//! `DetectionReport` bundles the deterministic [`Detection`](crate::Detection)
//! with a description of the input and a per-stage timing breakdown. Timings
//! live here rather than on the detection so that repeated runs produce
//! identical detections.

pub mod report;
pub mod timing;

pub use report::{DetectionReport, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
