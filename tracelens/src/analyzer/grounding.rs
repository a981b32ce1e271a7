//! Ground-reference mapping, power-distribution mapping, and ground-loop
//! detection.

use std::collections::BTreeMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::model::{ComponentNode, GroundLoop, LoopSeverity};

/// Ground reference assigned when a component touches no GND-like net.
pub const DEFAULT_GROUND: &str = "GND";

/// Net-name substrings marking power distribution nets.
const POWER_NET_PATTERNS: &[&str] = &["VCC", "VDD", "V+", "V-"];

/// Cycles need more than this many distinct nodes to count as a loop.
const MIN_LOOP_NODES: usize = 2;
/// Above this many nodes a loop is reported as high severity.
const HIGH_SEVERITY_NODES: usize = 3;

const LOOP_RECOMMENDATION: &str = "implement star grounding or ground isolation";

/// For each component, the first net (in input order) containing "GND",
/// else the literal default.
pub fn map_ground_references(
    components: &BTreeMap<String, ComponentNode>,
) -> BTreeMap<String, String> {
    components
        .iter()
        .map(|(reference, node)| {
            let ground = node
                .nets
                .iter()
                .find(|net| net.to_uppercase().contains("GND"))
                .cloned()
                .unwrap_or_else(|| DEFAULT_GROUND.to_string());
            (reference.clone(), ground)
        })
        .collect()
}

/// For each component, every net whose name matches a power pattern, in
/// net-list order.
pub fn map_power_distribution(
    components: &BTreeMap<String, ComponentNode>,
) -> BTreeMap<String, Vec<String>> {
    components
        .iter()
        .map(|(reference, node)| {
            let power_nets: Vec<String> = node
                .nets
                .iter()
                .filter(|net| {
                    let upper = net.to_uppercase();
                    POWER_NET_PATTERNS.iter().any(|p| upper.contains(p))
                })
                .cloned()
                .collect();
            (reference.clone(), power_nets)
        })
        .collect()
}

/// Detect ground loops in the component-to-ground-reference graph.
///
/// Every component contributes exactly one outgoing edge, so each
/// non-trivial strongly connected component is exactly one simple cycle;
/// cycles with more than two distinct nodes are reported. Node order in
/// the report follows the cycle from its lexicographically smallest
/// member.
pub fn detect_ground_loops(
    ground_references: &BTreeMap<String, String>,
) -> Vec<GroundLoop> {
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut indices: BTreeMap<String, NodeIndex> = BTreeMap::new();

    for (component, ground) in ground_references {
        for name in [component, ground] {
            if !indices.contains_key(name) {
                let idx = graph.add_node(name.clone());
                indices.insert(name.clone(), idx);
            }
        }
    }
    for (component, ground) in ground_references {
        graph.add_edge(indices[component], indices[ground], ());
    }

    let mut loops = Vec::new();
    for scc in tarjan_scc(&graph) {
        if scc.len() <= MIN_LOOP_NODES {
            continue;
        }

        // Walk the cycle from its smallest member; every node inside a
        // non-trivial SCC here has exactly one successor.
        let Some(start) = scc
            .iter()
            .min_by(|a, b| graph[**a].cmp(&graph[**b]))
            .copied()
        else {
            continue;
        };
        let mut nodes = Vec::with_capacity(scc.len());
        let mut current = start;
        for _ in 0..scc.len() {
            nodes.push(graph[current].clone());
            let Some(next) = graph.neighbors(current).next() else {
                break;
            };
            if next == start {
                break;
            }
            current = next;
        }

        let severity = if nodes.len() > HIGH_SEVERITY_NODES {
            LoopSeverity::High
        } else {
            LoopSeverity::Medium
        };

        loops.push(GroundLoop {
            nodes,
            severity,
            recommendation: LOOP_RECOMMENDATION.to_string(),
        });
    }

    loops.sort_by(|a, b| a.nodes.cmp(&b.nodes));
    loops
}
