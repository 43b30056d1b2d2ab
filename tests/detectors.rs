mod common;

use common::synthetic_signal::{resting, schedule, sine, worn, zeros};
use nonwear::batch::detect_batch;
use nonwear::compare::{agreement, consensus};
use nonwear::detector::{ClassifierMode, EpisodeEdgeOptions};
use nonwear::resample::resample;
use nonwear::{
    BaselineDetector, BaselineParams, ClassifierDetector, ClassifierParams, DetectError,
    DetectionWarning, NonWearDetector, RefinedDetector, RefinedParams, SignalView,
};
use std::fs;
use std::path::PathBuf;

fn baseline(vmu: bool) -> BaselineDetector {
    let preset = if vmu {
        BaselineParams::vector_magnitude()
    } else {
        BaselineParams::xyz()
    };
    BaselineDetector::new(BaselineParams {
        std_threshold: 0.01,
        min_interval_seconds: 5.0,
        ..preset
    })
}

#[test]
fn baseline_flags_ten_still_minutes_at_100hz() {
    let _ = env_logger::builder().is_test(true).try_init();
    let samples = zeros(100.0, 600.0);
    let signal = SignalView::new(&samples, 100.0);
    for vmu in [false, true] {
        let out = baseline(vmu).detect(&signal).expect("baseline detects");
        assert_eq!(out.non_wear_samples(), samples.len(), "vmu={vmu}");
        assert_eq!(out.episodes.len(), 1);
        assert_eq!(out.episodes[0].start_index, 0);
        assert_eq!(out.episodes[0].stop_index, samples.len() - 1);
    }
}

#[test]
fn baseline_keeps_unit_sine_as_wear() {
    let samples = sine(100.0, 600.0, 1.0, 1.0);
    let signal = SignalView::new(&samples, 100.0);
    for vmu in [false, true] {
        let out = baseline(vmu).detect(&signal).expect("baseline detects");
        assert_eq!(out.non_wear_samples(), 0, "vmu={vmu}");
        assert!(out.episodes.is_empty());
    }
}

#[test]
fn refined_respects_minimum_duration() {
    let _ = env_logger::builder().is_test(true).try_init();
    let samples = zeros(100.0, 200.0 * 60.0);
    let signal = SignalView::new(&samples, 100.0);

    let det = RefinedDetector::new(RefinedParams {
        min_non_wear_window_minutes: 60.0,
        ..RefinedParams::hees_2013()
    });
    let out = det.detect(&signal).expect("refined detects");
    assert_eq!(out.episodes.len(), 1);
    assert_eq!(out.episodes[0].start_index, 0);
    assert_eq!(out.episodes[0].stop_index, samples.len() - 1);
    assert_eq!(out.episodes[0].stop_timestamp, ((samples.len() - 1) * 10) as i64);

    let det = RefinedDetector::new(RefinedParams {
        min_non_wear_window_minutes: 250.0,
        ..RefinedParams::hees_2013()
    });
    let out = det.detect(&signal).expect("refined detects");
    assert!(out.episodes.is_empty());
    assert_eq!(out.non_wear_samples(), 0);
}

#[test]
fn refined_presets_differ_in_minimum() {
    // 45 resting minutes: long enough for 2011, too short for 2013
    let samples = schedule(10.0, &[(true, 600.0), (false, 45.0 * 60.0), (true, 600.0)]);
    let signal = SignalView::new(&samples, 10.0);
    let hees_2011 = RefinedDetector::new(RefinedParams::hees_2011())
        .detect(&signal)
        .expect("2011 detects");
    let hees_2013 = RefinedDetector::new(RefinedParams::hees_2013())
        .detect(&signal)
        .expect("2013 detects");
    assert_eq!(hees_2011.episodes.len(), 1);
    assert_eq!(hees_2011.episodes[0].start_index, 6000);
    assert!(hees_2013.episodes.is_empty());
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("nonwear-it-{}-{name}", std::process::id()))
}

/// Logistic model that calls a window non-wear when all axes are flat.
fn write_flat_model(name: &str, window_len: usize) -> PathBuf {
    let path = temp_path(name);
    let model = format!(
        r#"{{ "window_len": {window_len},
             "std_weights": [-2000.0, -2000.0, -2000.0],
             "range_weights": [0.0, 0.0, 0.0],
             "bias": 4.0 }}"#
    );
    fs::write(&path, model).expect("write model");
    path
}

#[test]
fn classifier_short_signal_is_all_wear() {
    let model = write_flat_model("short.json", 700);
    let det = ClassifierDetector::from_model_file(ClassifierParams::default(), &model)
        .expect("model loads");
    for hz in [100.0, 30.0] {
        let samples = resting(hz, 6.0);
        let out = det
            .detect(&SignalView::new(&samples, hz))
            .expect("short signal is not an error");
        assert_eq!(out.labels, vec![0u8; samples.len()]);
        assert!(out.episodes.is_empty());
    }
    let _ = fs::remove_file(model);
}

#[test]
fn classifier_model_file_drives_detection() {
    let _ = env_logger::builder().is_test(true).try_init();
    let model = write_flat_model("flat.json", 700);
    let det = ClassifierDetector::from_model_file(ClassifierParams::default(), &model)
        .expect("model loads");
    let samples = schedule(100.0, &[(true, 70.0), (false, 140.0), (true, 70.0)]);
    let out = det.detect(&SignalView::new(&samples, 100.0)).expect("detects");
    assert!(out.warnings.is_empty());
    assert_eq!(out.episodes.len(), 1);
    assert_eq!(out.episodes[0].start_index, 7000);
    assert_eq!(out.episodes[0].stop_index, 20999);

    // same recording at 50 Hz goes through the resampler
    let samples = schedule(50.0, &[(true, 70.0), (false, 140.0), (true, 70.0)]);
    let out = det.detect(&SignalView::new(&samples, 50.0)).expect("detects");
    assert_eq!(
        out.warnings,
        vec![DetectionWarning::ResamplingPrecision {
            from_hz: 50.0,
            to_hz: 100.0
        }]
    );
    assert_eq!(out.labels.len(), samples.len());
    assert!(out.is_non_wear(5000));
    assert!(!out.is_non_wear(1000));
    let _ = fs::remove_file(model);
}

#[test]
fn classifier_model_errors_surface_before_detection() {
    let missing = ClassifierDetector::from_model_file(
        ClassifierParams::default(),
        temp_path("missing-model.json"),
    );
    assert!(matches!(missing.err(), Some(DetectError::ModelUnavailable { .. })));

    let model = write_flat_model("wrong-window.json", 500);
    let mismatch = ClassifierDetector::from_model_file(ClassifierParams::default(), &model);
    assert!(matches!(mismatch.err(), Some(DetectError::InvalidInput(_))));
    let _ = fs::remove_file(model);
}

#[test]
fn episode_edge_mode_uses_flanking_windows() {
    let model = write_flat_model("edges.json", 700);
    let params = ClassifierParams {
        mode: ClassifierMode::EpisodeEdges(EpisodeEdgeOptions::default()),
        ..ClassifierParams::default()
    };
    let det = ClassifierDetector::from_model_file(params, &model).expect("model loads");
    // flanking windows are worn, so the flat model rejects both edges
    let samples = schedule(100.0, &[(true, 120.0), (false, 600.0), (true, 120.0)]);
    let out = det.detect(&SignalView::new(&samples, 100.0)).expect("detects");
    assert_eq!(det.name(), "classifier-episode-edges");
    assert!(out.episodes.is_empty());
    let _ = fs::remove_file(model);
}

#[test]
fn resampling_round_trip_preserves_shape() {
    let original = sine(100.0, 10.0, 1.0, 1.0);
    let down = resample(&original, 100.0, 30.0).expect("downsample");
    assert_eq!(down.len(), 300);
    let up = resample(&down, 30.0, 100.0).expect("upsample");
    assert_eq!(up.len(), original.len());

    // past the last 30 Hz sample the value is held, so compare the interior
    let interior = (299.0 / 30.0 * 100.0) as usize;
    let max_err = original[..interior]
        .iter()
        .zip(&up[..interior])
        .map(|(a, b)| (a - b).amax())
        .fold(0.0f32, f32::max);
    assert!(max_err < 0.02, "round-trip error {max_err}");
}

#[test]
fn batch_and_consensus_over_recordings() {
    let _ = env_logger::builder().is_test(true).try_init();
    let a = schedule(10.0, &[(true, 600.0), (false, 3900.0), (true, 600.0)]);
    let b = worn(10.0, 5100.0);
    let signals = [SignalView::new(&a, 10.0), SignalView::new(&b, 10.0)];

    let refined = RefinedDetector::new(RefinedParams::hees_2013());
    let results = detect_batch(&refined, &signals);
    let first = results[0].as_ref().expect("first recording");
    let second = results[1].as_ref().expect("second recording");
    assert_eq!(first.episodes.len(), 1);
    assert!(second.episodes.is_empty());

    let xyz = BaselineDetector::new(BaselineParams {
        min_interval_seconds: 600.0,
        ..BaselineParams::xyz()
    });
    let base = xyz.detect(&signals[0]).expect("baseline detects");
    let score = agreement(first, &base).expect("same length");
    assert!(score > 0.9, "agreement {score}");

    let both = consensus(&signals[0], &[first.clone(), base], 2).expect("consensus");
    assert_eq!(both.episodes.len(), 1);
}
