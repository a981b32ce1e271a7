//! Signal-flow graph construction and traversal.
//!
//! The graph is directed over component references: for every net touched
//! by more than one component, both directions of every ordered pair get
//! an edge tagged with the net name. Construction cost is O(sum of
//! net_size^2), fine for tens to low hundreds of components; nets fanning
//! out to hundreds of members (typically ground pours) are the scaling
//! risk and get a warning below.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::model::ComponentNode;

/// Net member count above which construction logs a scaling warning.
const DENSE_NET_WARNING: usize = 64;

/// Directed graph over component references with net-tagged edges.
#[derive(Debug, Clone)]
pub struct SignalFlowGraph {
    graph: DiGraph<String, String>,
    indices: BTreeMap<String, NodeIndex>,
}

impl SignalFlowGraph {
    /// Build the graph from a parsed component map.
    ///
    /// Nodes and edges are inserted in sorted (reference, net) order so
    /// identical inputs always produce an identical graph.
    pub fn build(components: &BTreeMap<String, ComponentNode>) -> Self {
        let mut graph = DiGraph::new();
        let mut indices = BTreeMap::new();

        for reference in components.keys() {
            let idx = graph.add_node(reference.clone());
            indices.insert(reference.clone(), idx);
        }

        // Net -> members, members already sorted because the component
        // map iterates in reference order.
        let mut net_members: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (reference, node) in components {
            for net in &node.nets {
                net_members
                    .entry(net.as_str())
                    .or_default()
                    .push(reference.as_str());
            }
        }

        for (net, members) in &net_members {
            if members.len() < 2 {
                continue;
            }
            if members.len() > DENSE_NET_WARNING {
                tracing::warn!(
                    net = %net,
                    members = members.len(),
                    "dense net produces quadratic edge count"
                );
            }
            for a in members {
                for b in members {
                    if a == b {
                        continue;
                    }
                    graph.add_edge(indices[*a], indices[*b], net.to_string());
                }
            }
        }

        Self { graph, indices }
    }

    pub fn component_count(&self) -> usize {
        self.indices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nets tagging the direct edges from `a` to `b`.
    pub fn edges_between(&self, a: &str, b: &str) -> Vec<String> {
        let (Some(&from), Some(&to)) = (self.indices.get(a), self.indices.get(b)) else {
            return Vec::new();
        };
        self.graph
            .edges_connecting(from, to)
            .map(|e| e.weight().clone())
            .collect()
    }

    /// Shortest path between two components, as (component references,
    /// traversed nets). `None` when the pair is disconnected.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<(Vec<String>, Vec<String>)> {
        let &from_idx = self.indices.get(from)?;
        let &to_idx = self.indices.get(to)?;

        let (_, node_path) = astar(
            &self.graph,
            from_idx,
            |n| n == to_idx,
            |_| 1usize,
            |_| 0usize,
        )?;

        let references: Vec<String> = node_path
            .iter()
            .map(|&idx| self.graph[idx].clone())
            .collect();

        let mut nets = Vec::with_capacity(node_path.len().saturating_sub(1));
        for pair in node_path.windows(2) {
            let edge = self.graph.find_edge(pair[0], pair[1])?;
            nets.push(self.graph[edge].clone());
        }

        Some((references, nets))
    }

    /// For each component, the sorted set of components with an inbound
    /// edge to it.
    pub fn dependencies(&self) -> BTreeMap<String, Vec<String>> {
        let mut dependencies = BTreeMap::new();
        for (reference, &idx) in &self.indices {
            let inbound: BTreeSet<String> = self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .map(|n| self.graph[n].clone())
                .collect();
            dependencies.insert(reference.clone(), inbound.into_iter().collect());
        }
        dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_components, ComponentRecord, SchematicDescription};

    fn components_from(records: Vec<ComponentRecord>) -> BTreeMap<String, ComponentNode> {
        let mut description = SchematicDescription::new();
        for r in records {
            description.add_component(r);
        }
        parse_components(&description).components
    }

    #[test]
    fn test_shared_net_creates_symmetric_edges() {
        let components = components_from(vec![
            ComponentRecord::new("R1").with_nets(["N1"]),
            ComponentRecord::new("C1").with_nets(["N1"]),
        ]);
        let graph = SignalFlowGraph::build(&components);

        assert_eq!(graph.edges_between("R1", "C1"), vec!["N1"]);
        assert_eq!(graph.edges_between("C1", "R1"), vec!["N1"]);
    }

    #[test]
    fn test_multiple_shared_nets_tag_parallel_edges() {
        let components = components_from(vec![
            ComponentRecord::new("R1").with_nets(["A", "B"]),
            ComponentRecord::new("R2").with_nets(["A", "B"]),
        ]);
        let graph = SignalFlowGraph::build(&components);

        let mut nets = graph.edges_between("R1", "R2");
        nets.sort();
        assert_eq!(nets, vec!["A", "B"]);
    }

    #[test]
    fn test_shortest_path_through_chain() {
        let components = components_from(vec![
            ComponentRecord::new("R1").with_nets(["N1"]),
            ComponentRecord::new("C1").with_nets(["N1", "N2"]),
            ComponentRecord::new("OPA1").with_nets(["N2"]),
        ]);
        let graph = SignalFlowGraph::build(&components);

        let (refs, nets) = graph.shortest_path("R1", "OPA1").unwrap();
        assert_eq!(refs, vec!["R1", "C1", "OPA1"]);
        assert_eq!(nets, vec!["N1", "N2"]);
    }

    #[test]
    fn test_disconnected_pair_has_no_path() {
        let components = components_from(vec![
            ComponentRecord::new("R1").with_nets(["N1"]),
            ComponentRecord::new("R2").with_nets(["N1"]),
            ComponentRecord::new("R3").with_nets(["N9"]),
        ]);
        let graph = SignalFlowGraph::build(&components);

        assert!(graph.shortest_path("R1", "R3").is_none());
    }

    #[test]
    fn test_dependencies_are_inbound_neighbors() {
        let components = components_from(vec![
            ComponentRecord::new("R1").with_nets(["N1"]),
            ComponentRecord::new("R2").with_nets(["N1"]),
            ComponentRecord::new("R3").with_nets(["N1"]),
        ]);
        let graph = SignalFlowGraph::build(&components);

        let deps = graph.dependencies();
        assert_eq!(deps["R1"], vec!["R2", "R3"]);
        assert_eq!(deps["R2"], vec!["R1", "R3"]);
    }

    #[test]
    fn test_single_member_net_creates_no_edges() {
        let components = components_from(vec![
            ComponentRecord::new("R1").with_nets(["LONELY"]),
            ComponentRecord::new("R2").with_nets(["OTHER"]),
        ]);
        let graph = SignalFlowGraph::build(&components);

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.component_count(), 2);
    }
}
