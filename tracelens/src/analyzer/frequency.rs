//! Cascaded frequency-response estimation for signal paths.
//!
//! Each path component contributes a simplified single-pole stage:
//! capacitors high-pass, inductors and opamps low-pass. The cascade is a
//! multiplicative magnitude and additive phase over a log-spaced sweep.
//! This is a layout-planning heuristic, not circuit simulation.

use std::collections::BTreeMap;

use crate::model::{ComponentNode, ComponentType, FrequencyResponse, SignalPath};

/// Points in the uniform sweep.
pub const SWEEP_POINTS: usize = 100;
/// Uniform sweep bounds (Hz).
pub const SWEEP_START_HZ: f64 = 10.0;
pub const SWEEP_STOP_HZ: f64 = 100_000.0;

const CAPACITOR_CORNER_HZ: f64 = 1_000.0;
const INDUCTOR_CORNER_HZ: f64 = 1_000.0;
const OPAMP_CORNER_HZ: f64 = 1_000_000.0;

/// Knee above which the parasitic high-frequency corrections apply (Hz).
const PARASITIC_KNEE_HZ: f64 = 20_000.0;
const CAPACITOR_ATTENUATION_FLOOR: f64 = 0.1;
const OPAMP_ROLLOFF_FLOOR: f64 = 0.05;

/// Generate the log-spaced sweep.
///
/// Uniform mode: 100 points, 10 Hz to 100 kHz. High-precision mode:
/// three concatenated log segments (30 points 10 Hz–1 kHz, 40 points
/// 1 kHz–20 kHz, 30 points 20 kHz–80 kHz); segment endpoints are
/// inclusive, so the seam frequencies appear twice.
pub fn frequency_sweep(high_precision: bool) -> Vec<f64> {
    if high_precision {
        let mut sweep = log_space(10.0, 1_000.0, 30);
        sweep.extend(log_space(1_000.0, 20_000.0, 40));
        sweep.extend(log_space(20_000.0, 80_000.0, 30));
        sweep
    } else {
        log_space(SWEEP_START_HZ, SWEEP_STOP_HZ, SWEEP_POINTS)
    }
}

fn log_space(start: f64, stop: f64, points: usize) -> Vec<f64> {
    if points == 0 {
        return Vec::new();
    }
    if points == 1 {
        return vec![start];
    }
    let log_start = start.log10();
    let step = (stop.log10() - log_start) / (points - 1) as f64;
    (0..points)
        .map(|i| 10f64.powf(log_start + step * i as f64))
        .collect()
}

/// Estimate the cascaded response of a path over the sweep.
///
/// `extended_bandwidth` enables the above-20 kHz parasitic corrections
/// (capacitor attenuation, inductor boost, opamp rolloff).
pub fn frequency_response(
    path: &SignalPath,
    components: &BTreeMap<String, ComponentNode>,
    high_precision: bool,
    extended_bandwidth: bool,
) -> FrequencyResponse {
    let frequencies = frequency_sweep(high_precision);
    let mut magnitude = vec![1.0; frequencies.len()];
    let mut phase = vec![0.0; frequencies.len()];

    for reference in &path.path_components {
        let Some(node) = components.get(reference) else {
            continue;
        };
        match node.component_type {
            ComponentType::Capacitor => {
                for (i, &f) in frequencies.iter().enumerate() {
                    magnitude[i] *= f / (f + CAPACITOR_CORNER_HZ);
                    phase[i] += (CAPACITOR_CORNER_HZ / f).atan();
                    if extended_bandwidth && f > PARASITIC_KNEE_HZ {
                        let attenuation = 1.0 - 0.1 * (f / PARASITIC_KNEE_HZ).log10();
                        magnitude[i] *= attenuation.max(CAPACITOR_ATTENUATION_FLOOR);
                    }
                }
            }
            ComponentType::Inductor => {
                for (i, &f) in frequencies.iter().enumerate() {
                    magnitude[i] *= INDUCTOR_CORNER_HZ / (f + INDUCTOR_CORNER_HZ);
                    phase[i] -= (f / INDUCTOR_CORNER_HZ).atan();
                    if extended_bandwidth && f > PARASITIC_KNEE_HZ {
                        magnitude[i] *= 1.0 + 0.05 * (f / PARASITIC_KNEE_HZ).log10();
                    }
                }
            }
            ComponentType::Opamp => {
                for (i, &f) in frequencies.iter().enumerate() {
                    magnitude[i] *= OPAMP_CORNER_HZ / (f + OPAMP_CORNER_HZ);
                    if extended_bandwidth && f > PARASITIC_KNEE_HZ {
                        let rolloff = 1.0 - 0.2 * (f / PARASITIC_KNEE_HZ).log10();
                        magnitude[i] *= rolloff.max(OPAMP_ROLLOFF_FLOOR);
                    }
                }
            }
            _ => {}
        }
    }

    derive_metrics(frequencies, magnitude, phase)
}

/// Derive -3dB band, flatness, and phase variation from the raw curves.
fn derive_metrics(
    frequencies: Vec<f64>,
    magnitude: Vec<f64>,
    phase: Vec<f64>,
) -> FrequencyResponse {
    let peak = magnitude.iter().cloned().fold(f64::MIN, f64::max);
    let threshold = peak / 2f64.sqrt();

    let first = magnitude.iter().position(|&m| m >= threshold);
    let last = magnitude.iter().rposition(|&m| m >= threshold);

    let (low_corner_hz, high_corner_hz, bandwidth_hz, passband_flatness, phase_variation) =
        match (first, last) {
            (Some(lo), Some(hi)) => {
                let band_magnitude = &magnitude[lo..=hi];
                let band_phase = &phase[lo..=hi];

                let band_min = band_magnitude.iter().cloned().fold(f64::MAX, f64::min);
                let band_max = band_magnitude.iter().cloned().fold(f64::MIN, f64::max);
                let flatness = if band_max > 0.0 { band_min / band_max } else { 1.0 };

                let phase_min = band_phase.iter().cloned().fold(f64::MAX, f64::min);
                let phase_max = band_phase.iter().cloned().fold(f64::MIN, f64::max);

                (
                    Some(frequencies[lo]),
                    Some(frequencies[hi]),
                    frequencies[hi] - frequencies[lo],
                    flatness,
                    phase_max - phase_min,
                )
            }
            // No point reaches peak/sqrt(2): empty passband.
            _ => (None, None, 0.0, 1.0, 0.0),
        };

    FrequencyResponse {
        frequencies,
        magnitude,
        phase,
        low_corner_hz,
        high_corner_hz,
        bandwidth_hz,
        passband_flatness,
        phase_variation,
    }
}
