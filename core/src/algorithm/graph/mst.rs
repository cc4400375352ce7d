//! Minimum Spanning Tree Algorithm Implementation
//!
//! [`Prim`] grows a spanning tree from a root over the undirected adjacency
//! using the shared relaxation driver with the [`EdgeKey`] rule: a vertex's key
//! is the weight of the cheapest edge connecting it to the tree so far, not
//! its distance from the root. The root's key is zero, so the tree weight is
//! the plain sum of the keys of all reached vertices.
//!
//! [`kruskal`] computes an independent minimum spanning forest with a
//! union-find structure and serves as a cross-check for Prim's result.
//!
//! # Theoretical Foundation
//!
//! - **Cut Property**: the lightest edge crossing any cut is safe (Prim)
//! - **Cycle Property**: the heaviest edge on any cycle is not needed (Kruskal)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::cmp::Ordering;

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::algorithm::state::{relax, EdgeKey};
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmMetrics, NodeId,
};
use crate::data_structures::graph::{Distance, Edge, EdgeClass, Graph, Weight};
use crate::execution::tracer::{ExecutionTracer, TraceMetadata};

/// Edge of a spanning tree, oriented from the tree side to the new vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeEdge {
    pub parent: NodeId,
    pub child: NodeId,
    pub weight: Weight,
}

/// MST-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MSTError {
    #[error("tree edge {parent} - {child} with weight {weight} is not in the graph")]
    MissingEdge {
        parent: NodeId,
        child: NodeId,
        weight: Weight,
    },

    #[error("tree edges contain a cycle through {0}")]
    Cycle(NodeId),

    #[error("root {0} must have key 0 and no parent")]
    Root(NodeId),

    #[error("vertex {0} is unreached but has a parent, or reached without one")]
    Unreached(NodeId),
}

/// Prim's algorithm with a lazy-deletion frontier
#[derive(Debug, Clone, Copy, Default)]
pub struct Prim;

impl Prim {
    pub fn new() -> Self {
        Self
    }
}

impl Algorithm for Prim {
    type Output = SpanningTree;

    fn name(&self) -> &'static str {
        "Prim"
    }

    fn category(&self) -> &'static str {
        "spanning_tree"
    }

    fn description(&self) -> String {
        "Minimum spanning tree grown from a root over undirected edges; each \
         vertex is keyed by its cheapest connecting edge"
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(E log V)",
            space_complexity: "O(V + E)",
        }
    }

    fn is_compatible_with(&self, graph: &Graph, source: NodeId) -> Result<(), AlgorithmError> {
        graph.check_node(source)?;
        if graph.edge_count(EdgeClass::Undirected) == 0 && graph.edge_count(EdgeClass::Directed) > 0 {
            return Err(AlgorithmError::NotSupported(
                "spanning trees require undirected edges".into(),
            ));
        }
        Ok(())
    }

    fn execute_with_tracing(
        &self,
        graph: &Graph,
        root: NodeId,
        mut tracer: Option<&mut ExecutionTracer>,
    ) -> Result<SpanningTree, AlgorithmError> {
        self.is_compatible_with(graph, root)?;

        if graph.has_negative_weights(EdgeClass::Undirected) {
            warn!("negative edge weights present; spanning tree keys are undefined");
        }
        debug!("prim from {} over {} edges", root, graph.edge_count(EdgeClass::Undirected));

        if let Some(t) = tracer.as_deref_mut() {
            t.begin(TraceMetadata {
                algorithm_name: self.name().into(),
                source: root,
                edge_class: EdgeClass::Undirected,
                vertex_count: graph.vertex_count(),
            });
        }

        let outcome = relax(graph, root, EdgeClass::Undirected, &EdgeKey, tracer);
        let tree = SpanningTree {
            root,
            keys: outcome.distances,
            parents: outcome.parents,
            metrics: outcome.metrics,
        };

        if !tree.is_spanning() {
            debug!("{} vertices are not connected to root {}", tree.unreached().len(), root);
        }
        Ok(tree)
    }
}

/// Result of a spanning-tree run: key and parent vectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    root: NodeId,
    /// Weight of the edge attaching each vertex; zero for the root
    keys: Vec<Distance>,
    parents: Vec<Option<NodeId>>,
    metrics: AlgorithmMetrics,
}

impl SpanningTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn keys(&self) -> &[Distance] {
        &self.keys
    }

    pub fn parents(&self) -> &[Option<NodeId>] {
        &self.parents
    }

    pub fn metrics(&self) -> &AlgorithmMetrics {
        &self.metrics
    }

    #[inline]
    pub fn key(&self, node: NodeId) -> Distance {
        self.keys[node.0]
    }

    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents[node.0]
    }

    /// Tree edges in child index order
    pub fn edges(&self) -> Vec<TreeEdge> {
        self.parents
            .iter()
            .zip(&self.keys)
            .enumerate()
            .filter_map(|(i, (parent, key))| {
                Some(TreeEdge {
                    parent: (*parent)?,
                    child: NodeId(i),
                    weight: key.value()?,
                })
            })
            .collect()
    }

    /// Sum of the finite keys; bounded by the graph's total edge weight
    pub fn total_weight(&self) -> Weight {
        self.keys.iter().filter_map(|k| k.value()).sum()
    }

    /// Vertices outside the root's component
    pub fn unreached(&self) -> Vec<NodeId> {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, k)| !k.is_finite())
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    pub fn is_spanning(&self) -> bool {
        self.keys.iter().all(|k| k.is_finite())
    }

    /// Checks that the tree is an acyclic subgraph of `graph`
    pub fn validate(&self, graph: &Graph) -> Result<(), MSTError> {
        if self.key(self.root) != Distance::ZERO || self.parent(self.root).is_some() {
            return Err(MSTError::Root(self.root));
        }

        let mut uf = UnionFind::new(self.keys.len());
        for node in (0..self.keys.len()).map(NodeId).filter(|&n| n != self.root) {
            match (self.key(node).value(), self.parent(node)) {
                (None, None) => {}
                (Some(weight), Some(parent)) => {
                    let present = graph
                        .neighbors(parent, EdgeClass::Undirected)
                        .iter()
                        .any(|adj| adj.to == node && adj.weight == weight);
                    if !present {
                        return Err(MSTError::MissingEdge { parent, child: node, weight });
                    }
                    if !uf.union(parent, node) {
                        return Err(MSTError::Cycle(node));
                    }
                }
                _ => return Err(MSTError::Unreached(node)),
            }
        }
        Ok(())
    }
}

/// Union-Find data structure with path compression and union by rank
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    num_components: usize,
}

impl UnionFind {
    /// Create a new Union-Find structure with n singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            num_components: n,
        }
    }

    /// Find the representative of the set containing x with path compression
    pub fn find(&mut self, x: NodeId) -> NodeId {
        let mut root = x.0;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x.0;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        NodeId(root)
    }

    /// Merge the sets containing x and y; `false` if they were already one set
    pub fn union(&mut self, x: NodeId, y: NodeId) -> bool {
        let root_x = self.find(x).0;
        let root_y = self.find(y).0;

        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            Ordering::Less => self.parent[root_x] = root_y,
            Ordering::Greater => self.parent[root_y] = root_x,
            Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }

        self.num_components -= 1;
        true
    }

    pub fn connected(&mut self, x: NodeId, y: NodeId) -> bool {
        self.find(x) == self.find(y)
    }

    pub fn components(&self) -> usize {
        self.num_components
    }
}

/// Minimum spanning forest computed by Kruskal's algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KruskalForest {
    pub edges: Vec<Edge>,
    pub total_weight: Weight,
    pub components: usize,
}

/// Kruskal's algorithm over the undirected edges of `graph`
///
/// Edges are taken in ascending weight order and kept unless they close a
/// cycle. On a disconnected graph the result is a spanning forest.
pub fn kruskal(graph: &Graph) -> KruskalForest {
    let mut edges = graph.edges(EdgeClass::Undirected).to_vec();
    edges.sort();

    let mut uf = UnionFind::new(graph.vertex_count());
    let mut forest = Vec::with_capacity(graph.vertex_count().saturating_sub(1));
    for edge in edges {
        if uf.union(edge.from, edge.to) {
            forest.push(edge);
        }
    }

    KruskalForest {
        total_weight: forest.iter().map(|e| e.weight).sum(),
        edges: forest,
        components: uf.components(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(n: usize, edges: &[(usize, usize, Weight)]) -> Graph {
        let mut graph = Graph::new(n);
        for &(u, v, w) in edges {
            graph.add_edge(NodeId(u), NodeId(v), w, EdgeClass::Undirected).unwrap();
        }
        graph
    }

    #[test]
    fn test_prim_total_weight() {
        let graph = graph_from(4, &[(0, 1, 1), (1, 2, 2), (0, 2, 4), (2, 3, 1)]);
        let tree = Prim.execute(&graph, NodeId(0)).unwrap();

        assert_eq!(tree.total_weight(), 4);
        assert_eq!(tree.key(NodeId(0)), Distance::ZERO);
        assert!(tree.is_spanning());
        assert_eq!(
            tree.edges(),
            vec![
                TreeEdge { parent: NodeId(0), child: NodeId(1), weight: 1 },
                TreeEdge { parent: NodeId(1), child: NodeId(2), weight: 2 },
                TreeEdge { parent: NodeId(2), child: NodeId(3), weight: 1 },
            ]
        );
        assert!(tree.validate(&graph).is_ok());
    }

    #[test]
    fn test_prim_key_differs_from_path_cost() {
        // Path cost to 2 is 10 but its connecting edge weighs 5
        let graph = graph_from(3, &[(0, 1, 5), (1, 2, 5), (0, 2, 20)]);
        let tree = Prim.execute(&graph, NodeId(0)).unwrap();
        assert_eq!(tree.key(NodeId(2)), Distance::new(5));
        assert_eq!(tree.parent(NodeId(2)), Some(NodeId(1)));
    }

    #[test]
    fn test_prim_matches_kruskal() {
        let graph = graph_from(
            6,
            &[
                (0, 1, 7), (0, 3, 5), (1, 2, 8), (1, 3, 9), (1, 4, 7),
                (2, 4, 5), (3, 4, 15), (3, 5, 6), (4, 5, 8),
            ],
        );
        let tree = Prim.execute(&graph, NodeId(3)).unwrap();
        let forest = kruskal(&graph);

        assert_eq!(forest.components, 1);
        assert_eq!(forest.edges.len(), 5);
        assert_eq!(tree.total_weight(), forest.total_weight);
    }

    #[test]
    fn test_disconnected_component_unreached() {
        let graph = graph_from(4, &[(0, 1, 3), (2, 3, 1)]);
        let tree = Prim.execute(&graph, NodeId(0)).unwrap();

        assert!(!tree.is_spanning());
        assert_eq!(tree.unreached(), vec![NodeId(2), NodeId(3)]);
        assert_eq!(tree.total_weight(), 3);
        assert_eq!(kruskal(&graph).components, 2);
        assert!(tree.validate(&graph).is_ok());
    }

    #[test]
    fn test_directed_graph_not_supported() {
        let mut graph = Graph::new(2);
        graph.add_edge(NodeId(0), NodeId(1), 1, EdgeClass::Directed).unwrap();
        assert!(matches!(
            Prim.execute(&graph, NodeId(0)),
            Err(AlgorithmError::NotSupported(_))
        ));
    }

    #[test]
    fn test_single_vertex_tree() {
        let graph = Graph::new(1);
        let tree = Prim.execute(&graph, NodeId(0)).unwrap();
        assert_eq!(tree.total_weight(), 0);
        assert!(tree.edges().is_empty());
    }

    #[test]
    fn test_validate_detects_foreign_edge() {
        let graph = graph_from(3, &[(0, 1, 1), (1, 2, 1)]);
        let mut tree = Prim.execute(&graph, NodeId(0)).unwrap();
        tree.parents[2] = Some(NodeId(0));
        assert_eq!(
            tree.validate(&graph),
            Err(MSTError::MissingEdge { parent: NodeId(0), child: NodeId(2), weight: 1 })
        );
    }

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(5);

        assert_eq!(uf.components(), 5);
        assert!(!uf.connected(NodeId(0), NodeId(1)));

        assert!(uf.union(NodeId(0), NodeId(1)));
        assert_eq!(uf.components(), 4);
        assert!(uf.connected(NodeId(0), NodeId(1)));

        assert!(!uf.union(NodeId(0), NodeId(1)));
        assert_eq!(uf.components(), 4);

        assert!(uf.union(NodeId(2), NodeId(3)));
        assert!(uf.union(NodeId(1), NodeId(2)));
        assert_eq!(uf.components(), 2);
        assert!(uf.connected(NodeId(0), NodeId(3)));
    }

    #[test]
    fn test_kruskal_edge_order() {
        let graph = graph_from(3, &[(0, 1, 3), (1, 2, 1), (0, 2, 2)]);
        let forest = kruskal(&graph);
        let weights: Vec<_> = forest.edges.iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![1, 2]);
        assert_eq!(forest.total_weight, 3);
    }
}
