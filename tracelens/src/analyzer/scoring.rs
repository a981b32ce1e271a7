//! Aggregate scoring and layout recommendations.

use std::collections::BTreeMap;

use crate::analyzer::critical::MAX_PATH_LENGTH_MM;
use crate::model::{
    ComponentNode, ComponentType, CriticalPath, NoiseSource, NoiseType, Priority,
    Recommendation, RecommendationKind, SignalPath, TopologyAnalysis,
};

const CRITICAL_PATH_WEIGHT: f64 = 10.0;
const SWITCHING_PENALTY: f64 = 5.0;
const THERMAL_PENALTY: f64 = 2.0;
const LONG_PATH_PENALTY: f64 = 3.0;

/// Critical paths scoring above this get a high-priority recommendation.
const HIGH_PRIORITY_SCORE: f64 = 0.8;
/// Noise sources louder than this get a shielding recommendation (dB).
const SHIELDING_AMPLITUDE_DB: f64 = -60.0;

/// Compute the aggregate analysis score, clamped to [0, 100].
pub fn analysis_score(
    signal_paths: &[SignalPath],
    critical_paths: &[CriticalPath],
    noise_sources: &[NoiseSource],
) -> f64 {
    let mut score = 100.0;

    for critical in critical_paths {
        score -= critical.criticality_score * CRITICAL_PATH_WEIGHT;
    }

    for source in noise_sources {
        score -= match source.noise_type {
            NoiseType::Switching => SWITCHING_PENALTY,
            NoiseType::Thermal => THERMAL_PENALTY,
        };
    }

    let long_paths = signal_paths
        .iter()
        .filter(|p| p.length_mm > MAX_PATH_LENGTH_MM)
        .count();
    score -= long_paths as f64 * LONG_PATH_PENALTY;

    score.clamp(0.0, 100.0)
}

/// Produce prioritized optimization recommendations from a finished
/// analysis.
pub fn recommendations(analysis: &TopologyAnalysis) -> Vec<Recommendation> {
    let mut out = Vec::new();

    for critical in &analysis.critical_paths {
        if critical.criticality_score > HIGH_PRIORITY_SCORE {
            out.push(Recommendation {
                kind: RecommendationKind::PathOptimization,
                targets: vec![critical.path.start.clone(), critical.path.end.clone()],
                recommendation: format!(
                    "optimize signal path from {} to {}: {}",
                    critical.path.start,
                    critical.path.end,
                    critical.recommendations.join("; ")
                ),
                priority: Priority::High,
            });
        }
    }

    for source in &analysis.noise_sources {
        if source.amplitude_db > SHIELDING_AMPLITUDE_DB {
            out.push(Recommendation {
                kind: RecommendationKind::NoiseMitigation,
                targets: vec![source.reference.clone()],
                recommendation: format!(
                    "shield or filter {} ({:.0} dB noise source)",
                    source.reference, source.amplitude_db
                ),
                priority: Priority::Medium,
            });
        }
    }

    out.extend(placement_recommendations(&analysis.components));
    out
}

/// Placement advice from component-type bucket counts: audio components
/// group together, power components move to the board edge, digital
/// components get isolated.
fn placement_recommendations(
    components: &BTreeMap<String, ComponentNode>,
) -> Vec<Recommendation> {
    let bucket = |kinds: &[ComponentType]| -> Vec<String> {
        components
            .values()
            .filter(|node| kinds.contains(&node.component_type))
            .map(|node| node.reference.clone())
            .collect()
    };

    let audio = bucket(&[ComponentType::Opamp, ComponentType::Transistor]);
    let power = bucket(&[ComponentType::Regulator, ComponentType::Connector]);
    let digital = bucket(&[ComponentType::Microcontroller, ComponentType::Oscillator]);

    let mut out = Vec::new();

    if audio.len() >= 2 {
        out.push(Recommendation {
            kind: RecommendationKind::Placement,
            targets: audio,
            recommendation: "group audio components to minimize signal path lengths"
                .to_string(),
            priority: Priority::Medium,
        });
    }

    if !power.is_empty() {
        out.push(Recommendation {
            kind: RecommendationKind::Placement,
            targets: power,
            recommendation: "place power components near the board edge".to_string(),
            priority: Priority::Low,
        });
    }

    if !digital.is_empty() {
        out.push(Recommendation {
            kind: RecommendationKind::Placement,
            targets: digital,
            recommendation: "isolate digital components from analog circuitry"
                .to_string(),
            priority: Priority::High,
        });
    }

    out
}
