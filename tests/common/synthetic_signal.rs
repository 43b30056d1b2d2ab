use nonwear::Sample;
use std::f32::consts::TAU;

/// Device lying flat: constant reading with gravity on z.
pub fn resting(hz: f32, seconds: f32) -> Vec<Sample> {
    vec![Sample::new(0.0, 0.0, 1.0); samples(hz, seconds)]
}

/// Every axis reads exactly zero.
pub fn zeros(hz: f32, seconds: f32) -> Vec<Sample> {
    vec![Sample::zeros(); samples(hz, seconds)]
}

/// Same sine on all three axes.
pub fn sine(hz: f32, seconds: f32, freq: f32, amplitude: f32) -> Vec<Sample> {
    assert!(hz > 0.0, "sampling rate must be positive");
    (0..samples(hz, seconds))
        .map(|i| {
            let v = amplitude * (TAU * freq * i as f32 / hz).sin();
            Sample::new(v, v, v)
        })
        .collect()
}

/// Irregular arm motion: incommensurate sines on every axis.
pub fn worn(hz: f32, seconds: f32) -> Vec<Sample> {
    (0..samples(hz, seconds))
        .map(|i| {
            let t = i as f32 / hz;
            Sample::new(
                0.3 * (TAU * 1.3 * t).sin(),
                0.2 * (TAU * 0.7 * t + 0.4).sin(),
                1.0 + 0.1 * (TAU * 2.3 * t).sin(),
            )
        })
        .collect()
}

/// Concatenate segments of alternating wear: `(is_worn, seconds)`.
pub fn schedule(hz: f32, segments: &[(bool, f32)]) -> Vec<Sample> {
    let mut out = Vec::new();
    for &(is_worn, seconds) in segments {
        if is_worn {
            out.extend(worn(hz, seconds));
        } else {
            out.extend(resting(hz, seconds));
        }
    }
    out
}

fn samples(hz: f32, seconds: f32) -> usize {
    (hz * seconds).round() as usize
}
