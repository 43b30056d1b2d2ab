//! Linear resampling of tri-axial signals between sampling rates.
//!
//! The source grid is reconstructed as `t_i = i / from_hz` and each output
//! sample `t_j = j / to_hz` is linearly interpolated per axis. Output times
//! beyond the last source sample hold the last value. The output length is
//! `round(n * to_hz / from_hz)`.

use crate::error::DetectError;
use crate::types::Sample;

/// Resample `samples` from `from_hz` to `to_hz`.
pub fn resample(samples: &[Sample], from_hz: f32, to_hz: f32) -> Result<Vec<Sample>, DetectError> {
    if !(from_hz.is_finite() && from_hz > 0.0 && to_hz.is_finite() && to_hz > 0.0) {
        return Err(DetectError::invalid(format!(
            "resampling rates must be positive, got {from_hz} -> {to_hz}"
        )));
    }
    if samples.is_empty() {
        return Err(DetectError::invalid("cannot resample an empty signal"));
    }
    if samples.len() < 2 {
        return Err(DetectError::InsufficientData {
            needed: 2,
            available: samples.len(),
        });
    }

    let n = samples.len();
    let out_len = resampled_len(n, from_hz, to_hz);
    if out_len == 0 {
        return Err(DetectError::invalid(format!(
            "resampling {n} samples from {from_hz} Hz to {to_hz} Hz yields no samples"
        )));
    }

    let ratio = from_hz as f64 / to_hz as f64;
    let last = n - 1;
    let mut out = Vec::with_capacity(out_len);
    for j in 0..out_len {
        let pos = j as f64 * ratio;
        let i0 = pos.floor() as usize;
        if i0 >= last {
            out.push(samples[last]);
            continue;
        }
        let frac = (pos - i0 as f64) as f32;
        let a = samples[i0];
        let b = samples[i0 + 1];
        out.push(a + (b - a) * frac);
    }
    Ok(out)
}

/// Output length for a signal of `n` samples resampled `from_hz -> to_hz`.
#[inline]
pub fn resampled_len(n: usize, from_hz: f32, to_hz: f32) -> usize {
    (n as f64 * to_hz as f64 / from_hz as f64).round() as usize
}

/// Nearest index on the `to_hz` grid for sample `index` on the `from_hz` grid,
/// clamped to `len - 1`.
#[inline]
pub fn nearest_index(index: usize, from_hz: f32, to_hz: f32, len: usize) -> usize {
    let j = (index as f64 * to_hz as f64 / from_hz as f64).round() as usize;
    j.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_length_follows_rate_ratio() {
        let samples = vec![Sample::zeros(); 1000];
        let out = resample(&samples, 100.0, 30.0).unwrap();
        assert_eq!(out.len(), 300);
        let up = resample(&samples, 100.0, 128.0).unwrap();
        assert_eq!(up.len(), 1280);
    }

    #[test]
    fn single_sample_is_insufficient() {
        let samples = vec![Sample::zeros()];
        assert!(matches!(
            resample(&samples, 30.0, 100.0),
            Err(DetectError::InsufficientData {
                needed: 2,
                available: 1
            })
        ));
    }

    #[test]
    fn empty_signal_and_bad_rates_are_invalid() {
        assert!(matches!(
            resample(&[], 30.0, 100.0),
            Err(DetectError::InvalidInput(_))
        ));
        let samples = vec![Sample::zeros(); 4];
        assert!(matches!(
            resample(&samples, 0.0, 100.0),
            Err(DetectError::InvalidInput(_))
        ));
    }

    #[test]
    fn linear_ramp_is_reproduced_exactly() {
        let samples: Vec<Sample> = (0..50)
            .map(|i| Sample::new(i as f32, -(i as f32), 1.0))
            .collect();
        let out = resample(&samples, 10.0, 20.0).unwrap();
        assert_eq!(out.len(), 100);
        assert!((out[3].x - 1.5).abs() < 1e-5);
        assert!((out[3].y + 1.5).abs() < 1e-5);
        // beyond the last source sample the last value is held
        assert_eq!(out[99], samples[49]);
    }

    #[test]
    fn nearest_index_is_clamped() {
        assert_eq!(nearest_index(10, 30.0, 100.0, 1000), 33);
        assert_eq!(nearest_index(299, 30.0, 100.0, 996), 995);
    }
}
