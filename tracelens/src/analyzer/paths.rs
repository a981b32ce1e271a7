//! Signal-path enumeration and classification.

use std::collections::BTreeMap;

use crate::graph::SignalFlowGraph;
use crate::model::{ComponentNode, ComponentType, SignalPath, SignalType};
use crate::units::parse_resistance;

/// Baseline path impedance before per-component adjustments.
pub const BASELINE_IMPEDANCE_OHMS: f64 = 50.0;

const CAPACITOR_IMPEDANCE_FACTOR: f64 = 0.9;
const INDUCTOR_IMPEDANCE_FACTOR: f64 = 1.1;

/// Enumerate shortest signal paths for every connected unordered pair.
///
/// Pairs are visited in sorted reference order; disconnected pairs are
/// skipped. At most `pair_budget` pairs are examined: beyond that the
/// partial path set is returned and a warning logged, so oversized inputs
/// degrade instead of blocking.
pub fn enumerate_signal_paths(
    components: &BTreeMap<String, ComponentNode>,
    graph: &SignalFlowGraph,
    pair_budget: usize,
) -> Vec<SignalPath> {
    let references: Vec<&str> = components.keys().map(String::as_str).collect();
    let mut paths = Vec::new();
    let mut pairs_examined = 0usize;

    'outer: for i in 0..references.len() {
        for j in (i + 1)..references.len() {
            if pairs_examined >= pair_budget {
                tracing::warn!(
                    pairs_examined,
                    "pair budget exhausted; returning partial path set"
                );
                break 'outer;
            }
            pairs_examined += 1;

            let (start, end) = (references[i], references[j]);
            let Some((path_components, path_nets)) = graph.shortest_path(start, end)
            else {
                continue;
            };

            let length_mm = path_length_mm(&path_components, components);
            let impedance_ohms = path_impedance_ohms(&path_components, components);
            let signal_type = classify_path(&path_components, components);

            paths.push(SignalPath {
                start: start.to_string(),
                end: end.to_string(),
                path_components,
                path_nets,
                length_mm,
                impedance_ohms,
                signal_type,
            });
        }
    }

    paths
}

/// Sum of Euclidean distances between consecutive path components.
fn path_length_mm(
    path: &[String],
    components: &BTreeMap<String, ComponentNode>,
) -> f64 {
    path.windows(2)
        .filter_map(|pair| {
            let a = components.get(&pair[0])?;
            let b = components.get(&pair[1])?;
            Some(a.position.distance_to(&b.position))
        })
        .sum()
}

/// Heuristic impedance: 50 ohm baseline, resistors add their parsed value,
/// capacitors scale by 0.9, inductors by 1.1. Unparseable resistor values
/// contribute nothing.
fn path_impedance_ohms(
    path: &[String],
    components: &BTreeMap<String, ComponentNode>,
) -> f64 {
    let mut impedance = BASELINE_IMPEDANCE_OHMS;
    for reference in path {
        let Some(node) = components.get(reference) else {
            continue;
        };
        match node.component_type {
            ComponentType::Resistor => {
                if let Some(ohms) = parse_resistance(&node.value) {
                    impedance += ohms;
                }
            }
            ComponentType::Capacitor => impedance *= CAPACITOR_IMPEDANCE_FACTOR,
            ComponentType::Inductor => impedance *= INDUCTOR_IMPEDANCE_FACTOR,
            _ => {}
        }
    }
    impedance
}

/// Classify a path by which component categories appear anywhere on it.
///
/// Category checks are whole-path "any" tests applied in priority order
/// (power, then digital, then audio); component order along the path does
/// not matter.
pub fn classify_path(
    path: &[String],
    components: &BTreeMap<String, ComponentNode>,
) -> SignalType {
    let has = |kinds: &[ComponentType]| {
        path.iter().any(|reference| {
            components
                .get(reference)
                .map(|node| kinds.contains(&node.component_type))
                .unwrap_or(false)
        })
    };

    if has(&[ComponentType::Regulator, ComponentType::Connector]) {
        SignalType::Power
    } else if has(&[ComponentType::Microcontroller, ComponentType::Oscillator]) {
        SignalType::Digital
    } else if has(&[ComponentType::Opamp, ComponentType::Transistor]) {
        SignalType::Audio
    } else {
        SignalType::Control
    }
}
