mod common;

use common::synthetic_signal::schedule;
use nonwear::config::load_config;
use nonwear::signal::io::{load_signal_csv, write_json_file};
use nonwear::NonWearDetector;
use std::fs;
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nonwear-io-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn csv_recording_runs_through_configured_detector() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = temp_dir("run");
    let hz = 10.0;
    let samples = schedule(hz, &[(true, 300.0), (false, 40.0 * 60.0), (true, 300.0)]);

    let mut csv = String::from("timestamp_ms,x,y,z\n");
    for (i, s) in samples.iter().enumerate() {
        csv.push_str(&format!("{},{},{},{}\n", 1_000 + i * 100, s.x, s.y, s.z));
    }
    let input = dir.join("recording.csv");
    fs::write(&input, csv).expect("write csv");

    let config_path = dir.join("run.json");
    let output = dir.join("out").join("summary.json");
    let config = serde_json::json!({
        "input": input,
        "hz": hz,
        "detector": { "type": "refined", "min_non_wear_window_minutes": 30 },
        "output": output,
    });
    fs::write(&config_path, config.to_string()).expect("write config");

    let config = load_config(&config_path).expect("config loads");
    let signal = load_signal_csv(&config.input, config.hz).expect("csv loads");
    assert_eq!(signal.len(), samples.len());

    let detector = config.detector.build().expect("detector builds");
    let report = detector
        .detect_with_report(&signal.as_view())
        .expect("detection runs");
    assert_eq!(report.detection.episodes.len(), 1);
    let episode = report.detection.episodes[0];
    assert_eq!(episode.start_index, 3000);
    assert_eq!(episode.start_timestamp, 1_000 + 3000 * 100);

    write_json_file(&config.output, &report).expect("summary written");
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.output).expect("read summary"))
            .expect("summary is json");
    assert_eq!(written["detector"], "refined");
    assert_eq!(written["detection"]["episodes"][0]["startIndex"], 3000);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn malformed_rows_are_reported() {
    let dir = temp_dir("bad");
    let input = dir.join("bad.csv");
    fs::write(&input, "timestamp_ms,x,y,z\n0,0.1,0.2,1.0\n100,0.1,abc,1.0\n").expect("write csv");
    let err = load_signal_csv(&input, 10.0).unwrap_err();
    assert!(err.contains("row 2"), "unexpected error: {err}");

    let empty = dir.join("empty.csv");
    fs::write(&empty, "timestamp_ms,x,y,z\n").expect("write csv");
    assert!(load_signal_csv(&empty, 10.0).is_err());

    let _ = fs::remove_dir_all(dir);
}
