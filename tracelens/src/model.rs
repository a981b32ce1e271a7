//! Core data model for topology analysis results.
//!
//! Everything here is a plain value type: built once per analysis run,
//! serializable, and never mutated after construction. Result maps use
//! `BTreeMap` so that identical inputs produce identical output, down to
//! iteration order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Component category inferred from reference designator and value text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Opamp,
    Resistor,
    Capacitor,
    Inductor,
    Transistor,
    Diode,
    Connector,
    Regulator,
    Oscillator,
    Microcontroller,
    /// No prefix rule matched. Unknown components never join a signal-type
    /// category or a placement bucket.
    Unknown,
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentType::Opamp => write!(f, "opamp"),
            ComponentType::Resistor => write!(f, "resistor"),
            ComponentType::Capacitor => write!(f, "capacitor"),
            ComponentType::Inductor => write!(f, "inductor"),
            ComponentType::Transistor => write!(f, "transistor"),
            ComponentType::Diode => write!(f, "diode"),
            ComponentType::Connector => write!(f, "connector"),
            ComponentType::Regulator => write!(f, "regulator"),
            ComponentType::Oscillator => write!(f, "oscillator"),
            ComponentType::Microcontroller => write!(f, "microcontroller"),
            ComponentType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Signal class of a path, decided by which component categories appear
/// along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Audio,
    Power,
    Control,
    Digital,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalType::Audio => write!(f, "audio"),
            SignalType::Power => write!(f, "power"),
            SignalType::Control => write!(f, "control"),
            SignalType::Digital => write!(f, "digital"),
        }
    }
}

/// Position on the board (in mm).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A parsed, classified component.
///
/// Invariant: `power_pins` and `signal_pins` partition `pins` (disjoint,
/// union equals `pins`, original order preserved). `nets` keeps the input
/// order with duplicates removed, because the ground mapper depends on
/// first-net-wins semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Reference designator, unique per analysis (e.g. "R1", "OPA1").
    pub reference: String,

    /// Free-text value (e.g. "10k", "100n", "TL072").
    pub value: String,

    pub component_type: ComponentType,

    pub position: Position,

    /// Pin identifiers in input order.
    pub pins: Vec<String>,

    /// Net names this component touches, input order, deduplicated.
    pub nets: Vec<String>,

    /// Pins whose identifier matches a power-net pattern.
    pub power_pins: Vec<String>,

    /// All remaining pins.
    pub signal_pins: Vec<String>,
}

/// A shortest connection between two components through shared nets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalPath {
    pub start: String,
    pub end: String,

    /// Component references along the path, start to end, no repeats.
    pub path_components: Vec<String>,

    /// Net traversed between each consecutive component pair
    /// (always one fewer entry than `path_components`).
    pub path_nets: Vec<String>,

    /// Sum of Euclidean distances between consecutive components (mm).
    pub length_mm: f64,

    /// Heuristic impedance, built up from a 50 ohm baseline.
    pub impedance_ohms: f64,

    pub signal_type: SignalType,
}

/// A signal path whose accumulated rule score exceeded the criticality
/// threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalPath {
    pub path: SignalPath,

    /// Sum of triggered rule contributions; always above the configured
    /// threshold for any materialized instance.
    pub criticality_score: f64,

    pub issues: Vec<String>,

    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseType {
    Switching,
    Thermal,
}

/// A component predicted to inject noise into its neighborhood.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseSource {
    pub reference: String,
    pub noise_type: NoiseType,

    /// (low, high) in Hz, low < high.
    pub frequency_range: (f64, f64),

    /// Heuristic amplitude in dB.
    pub amplitude_db: f64,

    /// References of all other components within the noise radius, sorted.
    pub affected_components: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopSeverity {
    High,
    Medium,
}

/// A cycle in the component-to-ground-reference graph with more than two
/// distinct nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundLoop {
    /// Cycle members in traversal order, starting from the
    /// lexicographically smallest node.
    pub nodes: Vec<String>,

    pub severity: LoopSeverity,

    pub recommendation: String,
}

/// Cascaded frequency-domain estimate for one signal path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyResponse {
    /// Log-spaced sweep frequencies in Hz.
    pub frequencies: Vec<f64>,

    /// Magnitude per sweep point (unity = flat).
    pub magnitude: Vec<f64>,

    /// Phase per sweep point, radians.
    pub phase: Vec<f64>,

    /// First sweep frequency inside the -3dB band, if any point qualifies.
    pub low_corner_hz: Option<f64>,

    /// Last sweep frequency inside the -3dB band.
    pub high_corner_hz: Option<f64>,

    /// high - low corner; 0 when no point reaches peak/sqrt(2).
    pub bandwidth_hz: f64,

    /// min/max magnitude ratio inside the band; 1.0 for an empty band.
    pub passband_flatness: f64,

    /// max - min phase inside the band, radians; 0.0 for an empty band.
    pub phase_variation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    PathOptimization,
    NoiseMitigation,
    Placement,
}

/// A prioritized layout suggestion for the placement/routing optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,

    /// Component references the suggestion applies to.
    pub targets: Vec<String>,

    pub recommendation: String,

    pub priority: Priority,
}

/// An input record dropped by best-effort parsing, kept observable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedComponent {
    /// Reference as it appeared in the input (may be empty).
    pub reference: String,

    pub reason: String,
}

/// The complete analysis snapshot returned by the engine.
///
/// Built fresh on every call; nothing is cached across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyAnalysis {
    pub components: BTreeMap<String, ComponentNode>,

    pub signal_paths: Vec<SignalPath>,

    pub critical_paths: Vec<CriticalPath>,

    pub noise_sources: Vec<NoiseSource>,

    /// For each component, the references with an inbound edge to it in
    /// the signal-flow graph, sorted.
    pub component_dependencies: BTreeMap<String, Vec<String>>,

    /// Component reference -> ground net name.
    pub ground_references: BTreeMap<String, String>,

    /// Component reference -> power net memberships, net-list order.
    pub power_distribution: BTreeMap<String, Vec<String>>,

    /// Aggregate quality score, clamped to [0, 100].
    pub analysis_score: f64,

    /// Records dropped during parsing, with reasons.
    pub skipped_components: Vec<SkippedComponent>,
}

impl TopologyAnalysis {
    pub fn component(&self, reference: &str) -> Option<&ComponentNode> {
        self.components.get(reference)
    }

    /// Signal paths between the given pair, in either direction.
    pub fn paths_between(&self, a: &str, b: &str) -> Vec<&SignalPath> {
        self.signal_paths
            .iter()
            .filter(|p| {
                (p.start == a && p.end == b) || (p.start == b && p.end == a)
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_component_type_display() {
        assert_eq!(ComponentType::Opamp.to_string(), "opamp");
        assert_eq!(ComponentType::Microcontroller.to_string(), "microcontroller");
        assert_eq!(ComponentType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_signal_type_serde_roundtrip() {
        let json = serde_json::to_string(&SignalType::Audio).unwrap();
        assert_eq!(json, "\"audio\"");
        let back: SignalType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SignalType::Audio);
    }
}
