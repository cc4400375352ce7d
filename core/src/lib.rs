//! Waypoint core: shortest paths and minimum spanning trees by relaxation
//!
//! This crate holds the algorithmic core of Waypoint. A [`Graph`] is built
//! from an edge list, then one of two engines grows a tree from a source
//! vertex by repeatedly finalizing the cheapest frontier vertex:
//!
//! - [`Dijkstra`] relaxes by cumulative path cost and yields a
//!   [`ShortestPathTree`] with per-vertex distances and reconstructable paths
//! - [`Prim`] relaxes by raw edge weight and yields a [`SpanningTree`] whose
//!   keys sum to the minimum spanning tree weight
//!
//! Both share one lazy-deletion frontier: improving a vertex pushes a new
//! entry and leaves the superseded one to be skipped when popped. Runs can be
//! recorded step by step with an [`ExecutionTracer`].
//!
//! ```
//! use waypoint_core::prelude::*;
//!
//! let mut graph = Graph::new(3);
//! graph.add_edge(NodeId(0), NodeId(1), 5, EdgeClass::Directed).unwrap();
//! graph.add_edge(NodeId(1), NodeId(2), 3, EdgeClass::Directed).unwrap();
//! graph.add_edge(NodeId(0), NodeId(2), 10, EdgeClass::Directed).unwrap();
//!
//! let tree = Dijkstra::directed().execute(&graph, NodeId(0)).unwrap();
//! assert_eq!(tree.distance(NodeId(2)).value(), Some(8));
//! assert_eq!(tree.path_to(NodeId(2)), Some(vec![NodeId(0), NodeId(1), NodeId(2)]));
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod execution;

pub use algorithm::{
    Algorithm, AlgorithmError, AlgorithmMetrics, Dijkstra, NodeId, PathReconstructor, Prim,
    ShortestPathTree, SpanningTree,
};
pub use data_structures::{Distance, EdgeClass, Graph, LabelCodec, Weight};
pub use execution::ExecutionTracer;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for building graphs and running the engines
pub mod prelude {
    pub use crate::algorithm::{
        kruskal, reconstruct_path, Algorithm, AlgorithmError, Dijkstra, NodeId, PathReconstructor,
        Prim, ShortestPathTree, SpanningTree,
    };
    pub use crate::data_structures::{Distance, EdgeClass, Graph, LabelCodec, LabelConfig, Weight};
    pub use crate::execution::ExecutionTracer;
}
