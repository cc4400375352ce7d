//! Single-source shortest paths with lazy-deletion Dijkstra
//!
//! The engine relaxes edges of one [`EdgeClass`] outward from a source using
//! the shared relaxation driver with the [`PathCost`] rule. The frontier has no
//! decrease-key: improving a vertex pushes a duplicate entry and the outdated
//! one is skipped when it surfaces.
//!
//! # Complexity
//! - Time: O(E log E) frontier operations, at most one push per relaxation
//! - Space: O(V + E) for the vectors and the frontier
//!
//! Weights must be non-negative. Negative weights are accepted, logged, and
//! give undefined distances.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::algorithm::path_finding::reconstruct::PathReconstructor;
use crate::algorithm::state::{relax, PathCost};
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmMetrics, AlgorithmParameter, NodeId,
};
use crate::data_structures::graph::{Distance, EdgeClass, Graph};
use crate::execution::tracer::{ExecutionTracer, TraceMetadata};

/// Shortest-path engine over one edge class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dijkstra {
    edge_class: EdgeClass,
}

impl Dijkstra {
    pub fn new(edge_class: EdgeClass) -> Self {
        Self { edge_class }
    }

    pub fn directed() -> Self {
        Self::new(EdgeClass::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(EdgeClass::Undirected)
    }

    pub fn edge_class(&self) -> EdgeClass {
        self.edge_class
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::undirected()
    }
}

impl Algorithm for Dijkstra {
    type Output = ShortestPathTree;

    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn category(&self) -> &'static str {
        "path_finding"
    }

    fn description(&self) -> String {
        format!(
            "Single-source shortest paths over {} edges using a binary heap \
             with lazy deletion of superseded entries",
            self.edge_class
        )
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(E log V)",
            space_complexity: "O(V + E)",
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![AlgorithmParameter {
            name: "edge_class".into(),
            value: self.edge_class.as_str().into(),
            allowed_values: vec!["undirected".into(), "directed".into()],
        }]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match (name, value) {
            ("edge_class", "undirected") => self.edge_class = EdgeClass::Undirected,
            ("edge_class", "directed") => self.edge_class = EdgeClass::Directed,
            ("edge_class", other) => {
                return Err(AlgorithmError::InvalidParameter {
                    name: name.into(),
                    reason: format!("expected 'undirected' or 'directed', got '{other}'"),
                })
            }
            _ => {
                return Err(AlgorithmError::InvalidParameter {
                    name: name.into(),
                    reason: "unknown parameter; valid parameters: edge_class".into(),
                })
            }
        }
        Ok(())
    }

    fn execute_with_tracing(
        &self,
        graph: &Graph,
        source: NodeId,
        mut tracer: Option<&mut ExecutionTracer>,
    ) -> Result<ShortestPathTree, AlgorithmError> {
        self.is_compatible_with(graph, source)?;

        if graph.has_negative_weights(self.edge_class) {
            warn!("negative {} edge weights present; shortest distances are undefined", self.edge_class);
        }
        debug!("dijkstra from {} over {} {} edges", source, graph.edge_count(self.edge_class), self.edge_class);

        if let Some(t) = tracer.as_deref_mut() {
            t.begin(TraceMetadata {
                algorithm_name: self.name().into(),
                source,
                edge_class: self.edge_class,
                vertex_count: graph.vertex_count(),
            });
        }

        let outcome = relax(graph, source, self.edge_class, &PathCost, tracer);

        Ok(ShortestPathTree {
            source,
            edge_class: self.edge_class,
            distances: outcome.distances,
            parents: outcome.parents,
            metrics: outcome.metrics,
        })
    }
}

/// Shortest distance and path to one vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    pub target: NodeId,
    pub distance: Distance,
    /// `None` when the target is unreached
    pub path: Option<Vec<NodeId>>,
}

/// Violation found while checking a shortest-path tree against its graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificateError {
    #[error("source {0} does not have distance 0 and no parent")]
    Source(NodeId),

    #[error("edge {from} -> {to} can still be relaxed")]
    Relaxable { from: NodeId, to: NodeId },

    #[error("no edge from parent {parent} realizes the distance of {node}")]
    LooseParent { node: NodeId, parent: NodeId },

    #[error("vertex {0} is unreached but has a parent, or reached without one")]
    Unreached(NodeId),

    #[error("result covers {actual} vertices but the graph has {expected}")]
    Size { expected: usize, actual: usize },
}

/// Result of a shortest-path run: distance and parent vectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPathTree {
    source: NodeId,
    edge_class: EdgeClass,
    distances: Vec<Distance>,
    parents: Vec<Option<NodeId>>,
    metrics: AlgorithmMetrics,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn edge_class(&self) -> EdgeClass {
        self.edge_class
    }

    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    pub fn parents(&self) -> &[Option<NodeId>] {
        &self.parents
    }

    pub fn metrics(&self) -> &AlgorithmMetrics {
        &self.metrics
    }

    #[inline]
    pub fn distance(&self, node: NodeId) -> Distance {
        self.distances[node.0]
    }

    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents[node.0]
    }

    #[inline]
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_finite()
    }

    /// Source-to-`target` vertex sequence, `None` when unreached
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(target) {
            return None;
        }
        PathReconstructor::new(&self.parents, self.source).reconstruct(target)
    }

    /// Distance and path for every vertex in index order
    pub fn paths(&self) -> Vec<PathEntry> {
        let reconstructor = PathReconstructor::new(&self.parents, self.source);
        self.distances
            .iter()
            .enumerate()
            .map(|(i, &distance)| {
                let target = NodeId(i);
                PathEntry {
                    target,
                    distance,
                    path: distance
                        .is_finite()
                        .then(|| reconstructor.reconstruct(target))
                        .flatten(),
                }
            })
            .collect()
    }

    /// Checks the optimality certificate against `graph`
    ///
    /// A tree is optimal when no edge can still be relaxed and every parent
    /// link is a tight edge. Only meaningful for non-negative weights.
    pub fn verify(&self, graph: &Graph) -> Result<(), CertificateError> {
        if self.distances.len() != graph.vertex_count() {
            return Err(CertificateError::Size {
                expected: graph.vertex_count(),
                actual: self.distances.len(),
            });
        }
        if self.distance(self.source) != Distance::ZERO || self.parent(self.source).is_some() {
            return Err(CertificateError::Source(self.source));
        }

        for u in graph.nodes() {
            let du = self.distance(u);
            if !du.is_finite() {
                continue;
            }
            for adj in graph.neighbors(u, self.edge_class) {
                if du.extend(adj.weight) < self.distance(adj.to) {
                    return Err(CertificateError::Relaxable { from: u, to: adj.to });
                }
            }
        }

        for node in graph.nodes().filter(|&n| n != self.source) {
            match (self.distance(node).is_finite(), self.parent(node)) {
                (false, None) => {}
                (true, Some(parent)) => {
                    let tight = graph
                        .neighbors(parent, self.edge_class)
                        .iter()
                        .any(|adj| adj.to == node && self.distance(parent).extend(adj.weight) == self.distance(node));
                    if !tight {
                        return Err(CertificateError::LooseParent { node, parent });
                    }
                }
                _ => return Err(CertificateError::Unreached(node)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    /// A-B(1), B-C(2), A-C(4), C-D(1)
    fn diamond() -> Graph {
        let mut graph = Graph::new(4);
        for (u, v, w) in [(0, 1, 1), (1, 2, 2), (0, 2, 4), (2, 3, 1)] {
            graph.add_edge(NodeId(u), NodeId(v), w, EdgeClass::Undirected).unwrap();
        }
        graph
    }

    #[test]
    fn test_undirected_distances() {
        let tree = Dijkstra::undirected().execute(&diamond(), NodeId(0)).unwrap();
        let distances: Vec<_> = tree.distances().iter().map(|d| d.value()).collect();
        assert_eq!(distances, vec![Some(0), Some(1), Some(3), Some(4)]);
        assert_eq!(tree.path_to(NodeId(3)), Some(ids(&[0, 1, 2, 3])));
        assert!(tree.verify(&diamond()).is_ok());
    }

    #[test]
    fn test_directed_prefers_cheaper_detour() {
        let mut graph = Graph::new(3);
        graph.add_edge(NodeId(0), NodeId(1), 5, EdgeClass::Directed).unwrap();
        graph.add_edge(NodeId(1), NodeId(2), 3, EdgeClass::Directed).unwrap();
        graph.add_edge(NodeId(0), NodeId(2), 10, EdgeClass::Directed).unwrap();

        let tree = Dijkstra::directed().execute(&graph, NodeId(0)).unwrap();
        assert_eq!(tree.distance(NodeId(2)), Distance::new(8));
        assert_eq!(tree.parent(NodeId(2)), Some(NodeId(1)));
    }

    #[test]
    fn test_directed_edges_not_walked_backwards() {
        let mut graph = Graph::new(2);
        graph.add_edge(NodeId(1), NodeId(0), 1, EdgeClass::Directed).unwrap();

        let tree = Dijkstra::directed().execute(&graph, NodeId(0)).unwrap();
        assert!(!tree.is_reachable(NodeId(1)));
        assert_eq!(tree.path_to(NodeId(1)), None);
    }

    #[test]
    fn test_edge_class_selects_adjacency() {
        // Undirected engine on a directed-only graph sees no edges
        let mut graph = Graph::new(2);
        graph.add_edge(NodeId(0), NodeId(1), 1, EdgeClass::Directed).unwrap();

        let tree = Dijkstra::undirected().execute(&graph, NodeId(0)).unwrap();
        assert_eq!(tree.distance(NodeId(1)), Distance::INFINITY);
    }

    #[test]
    fn test_disconnected_vertex_reports_no_path() {
        let mut graph = Graph::new(3);
        graph.add_edge(NodeId(0), NodeId(1), 2, EdgeClass::Undirected).unwrap();

        let tree = Dijkstra::undirected().execute(&graph, NodeId(0)).unwrap();
        let entries = tree.paths();
        assert_eq!(entries[2].distance, Distance::INFINITY);
        assert_eq!(entries[2].path, None);
        assert_eq!(entries[0].path, Some(ids(&[0])));
        assert!(tree.verify(&graph).is_ok());
    }

    #[test]
    fn test_invalid_source_rejected() {
        let err = Dijkstra::undirected().execute(&diamond(), NodeId(4)).unwrap_err();
        assert!(matches!(err, AlgorithmError::InvalidNode { .. }));
    }

    #[test]
    fn test_parameters() {
        let mut dijkstra = Dijkstra::default();
        assert_eq!(dijkstra.get_parameter("edge_class").as_deref(), Some("undirected"));

        dijkstra.set_parameter("edge_class", "directed").unwrap();
        assert_eq!(dijkstra.edge_class(), EdgeClass::Directed);

        assert!(dijkstra.set_parameter("edge_class", "both").is_err());
        assert!(dijkstra.set_parameter("heuristic", "none").is_err());
    }

    #[test]
    fn test_verify_detects_tampering() {
        let graph = diamond();
        let mut tree = Dijkstra::undirected().execute(&graph, NodeId(0)).unwrap();
        tree.distances[3] = Distance::new(9);
        assert!(matches!(
            tree.verify(&graph),
            Err(CertificateError::Relaxable { .. })
        ));

        let mut tree = Dijkstra::undirected().execute(&graph, NodeId(0)).unwrap();
        tree.parents[2] = Some(NodeId(0));
        assert_eq!(
            tree.verify(&graph),
            Err(CertificateError::LooseParent { node: NodeId(2), parent: NodeId(0) })
        );
    }

    #[test]
    fn test_traced_run_records_metadata() {
        let mut tracer = ExecutionTracer::new();
        let tree = Dijkstra::undirected()
            .execute_with_tracing(&diamond(), NodeId(0), Some(&mut tracer))
            .unwrap();

        let metadata = tracer.metadata().unwrap();
        assert_eq!(metadata.algorithm_name, "Dijkstra");
        assert_eq!(metadata.vertex_count, 4);
        assert_eq!(tracer.finalization_order().len(), 4);
        assert_eq!(tracer.stale_skips(), tree.metrics().stale_entries_skipped);
    }
}
