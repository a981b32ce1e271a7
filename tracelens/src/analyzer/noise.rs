//! Noise-source prediction.
//!
//! Switching components (transistors, microcontrollers, oscillators) emit
//! a fixed-band switching source. Large resistors emit a thermal source
//! scaled by their value. Everything within the noise radius of a source
//! is considered affected.

use std::collections::BTreeMap;

use crate::model::{ComponentNode, ComponentType, NoiseSource, NoiseType};
use crate::units::parse_resistance;

/// Physical radius inside which a component is affected by a source (mm).
pub const NOISE_RADIUS_MM: f64 = 20.0;

const SWITCHING_RANGE_HZ: (f64, f64) = (1.0e6, 100.0e6);
const SWITCHING_AMPLITUDE_DB: f64 = -40.0;

const THERMAL_RANGE_HZ: (f64, f64) = (1.0, 1.0e6);
const THERMAL_BASE_AMPLITUDE_DB: f64 = -60.0;
/// Resistance above which thermal noise becomes worth flagging (ohms).
const THERMAL_REFERENCE_OHMS: f64 = 10_000.0;

/// Scan all components and emit predicted noise sources in reference order.
pub fn analyze_noise_sources(
    components: &BTreeMap<String, ComponentNode>,
) -> Vec<NoiseSource> {
    let mut sources = Vec::new();

    for (reference, node) in components {
        match node.component_type {
            ComponentType::Transistor
            | ComponentType::Microcontroller
            | ComponentType::Oscillator => {
                sources.push(NoiseSource {
                    reference: reference.clone(),
                    noise_type: NoiseType::Switching,
                    frequency_range: SWITCHING_RANGE_HZ,
                    amplitude_db: SWITCHING_AMPLITUDE_DB,
                    affected_components: affected_components(reference, node, components),
                });
            }
            ComponentType::Resistor => {
                // Unparseable values simply emit no source.
                let Some(ohms) = parse_resistance(&node.value) else {
                    continue;
                };
                if ohms > THERMAL_REFERENCE_OHMS {
                    let amplitude_db = THERMAL_BASE_AMPLITUDE_DB
                        + 10.0 * (ohms / THERMAL_REFERENCE_OHMS).log10();
                    sources.push(NoiseSource {
                        reference: reference.clone(),
                        noise_type: NoiseType::Thermal,
                        frequency_range: THERMAL_RANGE_HZ,
                        amplitude_db,
                        affected_components: affected_components(reference, node, components),
                    });
                }
            }
            _ => {}
        }
    }

    sources
}

fn affected_components(
    reference: &str,
    source: &ComponentNode,
    components: &BTreeMap<String, ComponentNode>,
) -> Vec<String> {
    components
        .values()
        .filter(|other| {
            other.reference != reference
                && other.position.distance_to(&source.position) < NOISE_RADIUS_MM
        })
        .map(|other| other.reference.clone())
        .collect()
}
