//! Tracelens - circuit topology and signal-path analysis.
//!
//! Given a flat description of components, their net connections, and
//! physical positions, this library derives a signal-flow graph,
//! classified signal paths, critical-path diagnostics, noise-source
//! predictions, ground and power maps, ground-loop reports, and cascaded
//! frequency-response estimates. It guides layout and routing decisions
//! for sensitive analog circuitry before placement is finalized.
//!
//! # Quick Start
//!
//! ```
//! use tracelens::prelude::*;
//!
//! let mut description = SchematicDescription::new();
//! description.add_component(
//!     ComponentRecord::new("R1")
//!         .with_value("10k")
//!         .with_nets(["SIG1", "SIG2"]),
//! );
//! description.add_component(
//!     ComponentRecord::new("OPA1")
//!         .with_value("TL072")
//!         .with_nets(["SIG2"]),
//! );
//!
//! let analyzer = TopologyAnalyzer::new(AnalysisOptions::default());
//! let analysis = analyzer.analyze(&description);
//!
//! assert_eq!(analysis.components.len(), 2);
//! assert_eq!(analysis.signal_paths.len(), 1);
//! ```
//!
//! # Features
//!
//! - **Signal paths**: shortest connection per component pair with
//!   length, heuristic impedance, and signal-type classification
//! - **Critical paths**: rule-scored diagnostics with recommendations
//! - **Noise prediction**: switching and thermal sources with affected
//!   neighborhoods
//! - **Grounding**: ground references, power distribution, ground loops
//! - **Frequency response**: cascaded per-stage magnitude/phase estimate
//!
//! The analysis is best-effort by design: malformed records are skipped
//! (and reported in the result), and the entry points always return a
//! valid, possibly partial, [`TopologyAnalysis`].

pub mod analyzer;
pub mod core;
pub mod graph;
pub mod model;
pub mod parser;
pub mod units;

// Re-export main types
pub use crate::core::{AnalysisOptions, TopologyAnalyzer, TopologyError};
pub use crate::graph::SignalFlowGraph;
pub use crate::model::{
    ComponentNode, ComponentType, CriticalPath, FrequencyResponse, GroundLoop,
    LoopSeverity, NoiseSource, NoiseType, Position, Priority, Recommendation,
    RecommendationKind, SignalPath, SignalType, SkippedComponent, TopologyAnalysis,
};
pub use crate::parser::{ComponentRecord, SchematicDescription};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AnalysisOptions, ComponentRecord, SchematicDescription, TopologyAnalysis,
        TopologyAnalyzer, TopologyError,
    };
}
