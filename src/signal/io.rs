//! I/O helpers for the command-line adapter.
//!
//! - `load_signal_csv`: read `timestamp_ms,x,y,z` rows into an owned signal.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::SignalView;
use crate::types::Sample;
use csv::ReaderBuilder;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned signal buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct OwnedSignal {
    samples: Vec<Sample>,
    timestamps: Vec<i64>,
    hz: f32,
}

impl OwnedSignal {
    pub fn new(samples: Vec<Sample>, timestamps: Vec<i64>, hz: f32) -> Self {
        Self {
            samples,
            timestamps,
            hz,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn hz(&self) -> f32 {
        self.hz
    }

    /// Borrow as a read-only `SignalView`
    pub fn as_view(&self) -> SignalView<'_> {
        SignalView::new(&self.samples, self.hz).with_timestamps(&self.timestamps)
    }
}

/// Load a CSV with a header row and columns `timestamp_ms,x,y,z` (g units).
pub fn load_signal_csv(path: &Path, hz: f32) -> Result<OwnedSignal, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;

    let mut samples = Vec::new();
    let mut timestamps = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| format!("Invalid row {} in {}: {e}", row_idx + 1, path.display()))?;
        if record.len() < 4 {
            return Err(format!(
                "Row {} in {} has {} columns, expected 4",
                row_idx + 1,
                path.display(),
                record.len()
            ));
        }
        let field = |i: usize| -> Result<f64, String> {
            record[i].trim().parse::<f64>().map_err(|e| {
                format!("Invalid value '{}' in row {}: {e}", &record[i], row_idx + 1)
            })
        };
        timestamps.push(field(0)?.round() as i64);
        samples.push(Sample::new(
            field(1)? as f32,
            field(2)? as f32,
            field(3)? as f32,
        ));
    }

    if samples.is_empty() {
        return Err(format!("{} contains no samples", path.display()));
    }
    Ok(OwnedSignal::new(samples, timestamps, hz))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
