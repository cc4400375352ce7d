//! Spanning tree algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod mst;

pub use self::mst::{kruskal, KruskalForest, MSTError, Prim, SpanningTree, TreeEdge, UnionFind};
