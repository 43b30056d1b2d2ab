//! Comparing and combining detections of the same recording.
//!
//! Labels are compared by their wear / non-wear meaning, so detections with
//! different [`Encoding`](crate::Encoding)s can be mixed.

use crate::episodes::detection_from_labels;
use crate::error::DetectError;
use crate::signal::SignalView;
use crate::types::Detection;
use log::debug;

fn ensure_len(detection: &Detection, expected: usize) -> Result<(), DetectError> {
    if detection.len() != expected {
        return Err(DetectError::invalid(format!(
            "detection covers {} samples, expected {}",
            detection.len(),
            expected
        )));
    }
    Ok(())
}

/// Fraction of samples on which `a` and `b` agree.
pub fn agreement(a: &Detection, b: &Detection) -> Result<f64, DetectError> {
    ensure_len(b, a.len())?;
    if a.is_empty() {
        return Err(DetectError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }
    let same = (0..a.len())
        .filter(|&i| a.is_non_wear(i) == b.is_non_wear(i))
        .count();
    Ok(same as f64 / a.len() as f64)
}

/// Majority vote: a sample is non-wear when at least `min_votes` detections
/// say so. The result uses the first detection's encoding and carries the
/// union of all warnings.
pub fn consensus(
    signal: &SignalView,
    detections: &[Detection],
    min_votes: usize,
) -> Result<Detection, DetectError> {
    signal.validate()?;
    let first = detections
        .first()
        .ok_or_else(|| DetectError::invalid("consensus needs at least one detection"))?;
    if min_votes == 0 || min_votes > detections.len() {
        return Err(DetectError::invalid(format!(
            "min_votes must be in 1..={}, got {}",
            detections.len(),
            min_votes
        )));
    }
    for d in detections {
        ensure_len(d, signal.len())?;
    }

    let encoding = first.encoding;
    let labels = (0..signal.len())
        .map(|i| {
            let votes = detections.iter().filter(|d| d.is_non_wear(i)).count();
            encoding.label(votes >= min_votes)
        })
        .collect();

    let mut warnings = Vec::new();
    for w in detections.iter().flat_map(|d| d.warnings.iter()) {
        if !warnings.contains(w) {
            warnings.push(w.clone());
        }
    }

    let out = detection_from_labels(signal, labels, encoding, warnings, None);
    debug!(
        "consensus: {} detections, min_votes={}, {} episodes",
        detections.len(),
        min_votes,
        out.episodes.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DetectionWarning, Encoding, Sample};

    fn detection(signal: &SignalView, flags: &[u8], encoding: Encoding) -> Detection {
        let labels = flags.iter().map(|&f| encoding.label(f == 1)).collect();
        detection_from_labels(signal, labels, encoding, Vec::new(), None)
    }

    #[test]
    fn agreement_ignores_encoding() {
        let samples = vec![Sample::zeros(); 4];
        let view = SignalView::new(&samples, 1.0);
        let a = detection(&view, &[1, 1, 0, 0], Encoding::default());
        let b = detection(
            &view,
            &[1, 0, 0, 0],
            Encoding {
                wear: 7,
                non_wear: 3,
            },
        );
        assert_eq!(agreement(&a, &b).unwrap(), 0.75);
        assert_eq!(agreement(&a, &a).unwrap(), 1.0);
    }

    #[test]
    fn agreement_rejects_length_mismatch() {
        let samples = vec![Sample::zeros(); 4];
        let a = detection(&SignalView::new(&samples, 1.0), &[1, 1, 0, 0], Encoding::default());
        let b = detection(&SignalView::new(&samples[..3], 1.0), &[1, 1, 0], Encoding::default());
        assert!(matches!(agreement(&a, &b), Err(DetectError::InvalidInput(_))));
    }

    #[test]
    fn consensus_counts_votes() {
        let samples = vec![Sample::zeros(); 6];
        let view = SignalView::new(&samples, 1.0);
        let mut a = detection(&view, &[1, 1, 1, 0, 0, 0], Encoding::default());
        a.warnings.push(DetectionWarning::ResamplingPrecision {
            from_hz: 30.0,
            to_hz: 100.0,
        });
        let b = detection(&view, &[0, 1, 1, 1, 0, 0], Encoding::default());
        let c = detection(&view, &[0, 0, 1, 1, 0, 1], Encoding::default());
        let all = [a, b, c];

        let majority = consensus(&view, &all, 2).unwrap();
        assert_eq!(majority.labels, vec![0, 1, 1, 1, 0, 0]);
        assert_eq!(majority.episodes.len(), 1);
        assert_eq!(majority.warnings.len(), 1);

        let unanimous = consensus(&view, &all, 3).unwrap();
        assert_eq!(unanimous.labels, vec![0, 0, 1, 0, 0, 0]);

        assert!(consensus(&view, &all, 0).is_err());
        assert!(consensus(&view, &all, 4).is_err());
        assert!(consensus(&view, &[], 1).is_err());
    }
}
