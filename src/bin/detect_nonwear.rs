use log::info;
use nonwear::config;
use nonwear::diagnostics::{InputDescriptor, TimingBreakdown};
use nonwear::signal::io::{load_signal_csv, write_json_file};
use nonwear::{DetectionWarning, Episode, NonWearDetector};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = config::load_config(Path::new(&config_path))?;

    let detector = config
        .detector
        .build()
        .map_err(|e| format!("Failed to build detector: {e}"))?;
    let signal = load_signal_csv(&config.input, config.hz)?;
    info!(
        "Loaded {} samples at {} Hz from {}",
        signal.len(),
        signal.hz(),
        config.input.display()
    );

    let report = detector
        .detect_with_report(&signal.as_view())
        .map_err(|e| format!("Detection failed on {}: {e}", config.input.display()))?;

    let non_wear_samples = report.detection.non_wear_samples();
    let summary = DetectionSummary {
        detector: report.detector,
        input: report.input,
        episode_count: report.detection.episodes.len(),
        non_wear_samples,
        non_wear_fraction: non_wear_samples as f64 / signal.len().max(1) as f64,
        episodes: report.detection.episodes,
        warnings: report.detection.warnings,
        labels: config.write_labels.then_some(report.detection.labels),
        timings: report.timings,
    };
    write_json_file(&config.output, &summary)?;

    println!(
        "{}: {} non-wear episodes ({:.1}% of samples)",
        summary.detector,
        summary.episode_count,
        100.0 * summary.non_wear_fraction
    );
    println!("Saved summary to {}", config.output.display());

    Ok(())
}

fn usage() -> String {
    "Usage: detect_nonwear <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectionSummary {
    detector: &'static str,
    input: InputDescriptor,
    episode_count: usize,
    non_wear_samples: usize,
    non_wear_fraction: f64,
    episodes: Vec<Episode>,
    warnings: Vec<DetectionWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<u8>>,
    timings: TimingBreakdown,
}
