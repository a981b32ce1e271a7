//! Top-level analysis orchestration.
//!
//! `TopologyAnalyzer` wires the stages together: parse, build the
//! signal-flow graph, enumerate paths, then run the independent analyses
//! and aggregate the score. The entry points never fail: malformed input
//! degrades to an empty (but valid) analysis, and every per-item parse
//! failure only skips that item's contribution.

use crate::analyzer::{critical, frequency, grounding, noise, paths, scoring};
use crate::graph::SignalFlowGraph;
use crate::model::{
    FrequencyResponse, GroundLoop, Recommendation, SignalPath, TopologyAnalysis,
};
use crate::parser::{self, SchematicDescription};

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("malformed circuit description: {0}")]
    MalformedInput(#[from] serde_json::Error),
}

/// Tuning knobs for an analysis run.
#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// Paths must score strictly above this to be flagged critical.
    pub critical_path_threshold: f64,

    /// Use the three-segment high-precision frequency sweep.
    pub high_precision_sweep: bool,

    /// Apply the above-20 kHz parasitic corrections in the frequency
    /// model.
    pub extended_bandwidth: bool,

    /// Maximum component pairs examined during path enumeration; larger
    /// inputs return a partial path set instead of blocking.
    pub pair_budget: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            critical_path_threshold: 0.7,
            high_precision_sweep: false,
            extended_bandwidth: false,
            pair_budget: 20_000,
        }
    }
}

/// The analysis engine. Holds only options; every run builds its result
/// from scratch and shares nothing with previous runs.
#[derive(Clone, Debug, Default)]
pub struct TopologyAnalyzer {
    options: AnalysisOptions,
}

impl TopologyAnalyzer {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Run the full analysis over a typed circuit description.
    ///
    /// Always returns a valid result; see the crate docs for the
    /// best-effort degradation rules.
    pub fn analyze(&self, description: &SchematicDescription) -> TopologyAnalysis {
        let parsed = parser::parse_components(description);
        let graph = SignalFlowGraph::build(&parsed.components);

        let signal_paths = paths::enumerate_signal_paths(
            &parsed.components,
            &graph,
            self.options.pair_budget,
        );
        let critical_paths = critical::identify_critical_paths(
            &signal_paths,
            self.options.critical_path_threshold,
        );
        let noise_sources = noise::analyze_noise_sources(&parsed.components);
        let component_dependencies = graph.dependencies();
        let ground_references = grounding::map_ground_references(&parsed.components);
        let power_distribution = grounding::map_power_distribution(&parsed.components);

        let analysis_score =
            scoring::analysis_score(&signal_paths, &critical_paths, &noise_sources);

        TopologyAnalysis {
            components: parsed.components,
            signal_paths,
            critical_paths,
            noise_sources,
            component_dependencies,
            ground_references,
            power_distribution,
            analysis_score,
            skipped_components: parsed.skipped,
        }
    }

    /// Parse a JSON circuit description and analyze it.
    ///
    /// Unlike [`analyze_value`](Self::analyze_value), malformed input
    /// surfaces as a typed error instead of degrading silently.
    pub fn try_analyze_json(&self, json: &str) -> Result<TopologyAnalysis, TopologyError> {
        let description: SchematicDescription = serde_json::from_str(json)?;
        Ok(self.analyze(&description))
    }

    /// Run the analysis over a loosely-typed JSON value.
    ///
    /// Deserialization failure is logged and answered with the analysis
    /// of an empty circuit, so downstream consumers always receive a
    /// valid result.
    pub fn analyze_value(&self, value: &serde_json::Value) -> TopologyAnalysis {
        match serde_json::from_value::<SchematicDescription>(value.clone()) {
            Ok(description) => self.analyze(&description),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "malformed circuit description; analyzing empty circuit"
                );
                self.analyze(&SchematicDescription::default())
            }
        }
    }

    /// Cascaded frequency-response estimate for one signal path from a
    /// finished analysis.
    pub fn frequency_response(
        &self,
        path: &SignalPath,
        analysis: &TopologyAnalysis,
    ) -> FrequencyResponse {
        frequency::frequency_response(
            path,
            &analysis.components,
            self.options.high_precision_sweep,
            self.options.extended_bandwidth,
        )
    }

    /// Ground-loop report over a finished analysis.
    pub fn detect_ground_loops(analysis: &TopologyAnalysis) -> Vec<GroundLoop> {
        grounding::detect_ground_loops(&analysis.ground_references)
    }

    /// Prioritized optimization recommendations over a finished analysis.
    pub fn recommendations(analysis: &TopologyAnalysis) -> Vec<Recommendation> {
        scoring::recommendations(analysis)
    }
}
