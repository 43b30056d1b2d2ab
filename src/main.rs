use nonwear::compare::{agreement, consensus};
use nonwear::prelude::*;
use nonwear::stats::{slice_stats, Channels};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), DetectError> {
    // Demo stub: 2 h worn, 3 h on a table, 1 h worn at 20 Hz
    let hz = 20.0f32;
    let per_hour = (3600.0 * hz) as usize;
    let mut samples = Vec::with_capacity(6 * per_hour);
    for i in 0..6 * per_hour {
        let t = i as f32 / hz;
        let worn = i < 2 * per_hour || i >= 5 * per_hour;
        samples.push(if worn {
            Sample::new(
                0.20 * (2.1 * t).sin(),
                0.15 * (3.7 * t).cos(),
                1.0 + 0.10 * (1.3 * t).sin(),
            )
        } else {
            Sample::new(0.0, -0.02, 0.99)
        });
    }
    let signal = SignalView::new(&samples, hz);

    let window_seconds = 7.0;
    let classifier_params = ClassifierParams {
        canonical_hz: hz,
        window_seconds,
        ..ClassifierParams::default()
    };
    let scorer = FnScorer::new(classifier_params.window_len(), |w: &[Sample]| {
        if slice_stats(w, Channels::Axes).all_std_below(0.004) {
            0.95
        } else {
            0.05
        }
    });

    let detectors: Vec<Box<dyn NonWearDetector>> = vec![
        Box::new(BaselineDetector::new(BaselineParams::xyz())),
        Box::new(RefinedDetector::new(RefinedParams::hees_2013())),
        Box::new(ClassifierDetector::new(classifier_params, scorer)?),
    ];

    let mut detections = Vec::with_capacity(detectors.len());
    for det in &detectors {
        let report = det.detect_with_report(&signal)?;
        println!("{}", report.summary());
        detections.push(report.detection);
    }

    println!(
        "agreement baseline/refined={:.3} refined/classifier={:.3}",
        agreement(&detections[0], &detections[1])?,
        agreement(&detections[1], &detections[2])?
    );
    let majority = consensus(&signal, &detections, 2)?;
    println!("consensus episodes={}", majority.episodes.len());
    Ok(())
}
