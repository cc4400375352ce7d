//! Weighted adjacency-list graph with separate directed and undirected stores
//!
//! A [`Graph`] is built once with a fixed vertex count and then filled through
//! [`Graph::add_edge`]. Each edge lands in exactly one of two adjacency stores
//! selected by its [`EdgeClass`]: undirected edges are recorded on both
//! endpoints, directed edges only on their tail. The relaxation engines read
//! one store per run and never mutate the graph.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::cmp::Ordering;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize, Serializer};

use crate::algorithm::traits::{AlgorithmError, NodeId};

/// Integer edge weight. Negative values are accepted but give undefined results.
pub type Weight = i64;

/// Upper bound on the summed magnitude of all edge weights in one graph
///
/// Every simple path cost and every spanning tree total is bounded by this
/// sum, so keeping it below the [`Distance::INFINITY`] sentinel means no
/// finite result can overflow or be mistaken for "unreached".
pub const MAX_TOTAL_WEIGHT: u64 = (i64::MAX - 1) as u64;

/// Edge class selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeClass {
    /// Stored symmetrically on both endpoints
    Undirected,
    /// Stored once, on the tail vertex
    Directed,
}

impl EdgeClass {
    #[inline]
    pub fn is_directed(self) -> bool {
        matches!(self, EdgeClass::Directed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EdgeClass::Undirected => "undirected",
            EdgeClass::Directed => "directed",
        }
    }
}

impl Display for EdgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-known distance from the source, or the unreached sentinel
///
/// Ordering places every finite distance before [`Distance::INFINITY`], which
/// is what the frontier and the relaxation comparisons rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Distance(i64);

impl Distance {
    pub const ZERO: Distance = Distance(0);
    pub const INFINITY: Distance = Distance(i64::MAX);

    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self != Self::INFINITY
    }

    /// Finite value, `None` for the unreached sentinel
    #[inline]
    pub fn value(self) -> Option<i64> {
        self.is_finite().then_some(self.0)
    }

    /// Extends the distance by one edge; never wraps into or past the sentinel
    #[inline]
    pub fn extend(self, weight: Weight) -> Distance {
        if !self.is_finite() {
            return Self::INFINITY;
        }
        match self.0.checked_add(weight) {
            Some(sum) if sum != i64::MAX => Distance(sum),
            Some(_) | None if weight > 0 => Self::INFINITY,
            _ => Distance(i64::MIN),
        }
    }
}

impl From<Weight> for Distance {
    #[inline]
    fn from(weight: Weight) -> Self {
        Distance(weight.min(i64::MAX - 1))
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("inf"),
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// One adjacency entry: neighbor and connecting edge weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Adjacency {
    pub to: NodeId,
    pub weight: Weight,
}

/// Edge as inserted, preserved in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.from.cmp(&other.from))
            .then_with(|| self.to.cmp(&other.to))
    }
}

/// Adjacency-list graph over dense vertex indices `0..vertex_count`
#[derive(Debug, Clone)]
pub struct Graph {
    vertex_count: usize,

    /// Symmetric store: `{u, v, w}` appears on both `u` and `v`
    undirected: Vec<Vec<Adjacency>>,

    /// Tail-only store: `u -> v` appears on `u`
    directed: Vec<Vec<Adjacency>>,

    undirected_edges: Vec<Edge>,
    directed_edges: Vec<Edge>,

    /// Sum of `|weight|` over every inserted edge
    weight_magnitude: u64,
}

impl Graph {
    /// Creates an edgeless graph with `vertex_count` vertices
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            undirected: vec![Vec::new(); vertex_count],
            directed: vec![Vec::new(); vertex_count],
            undirected_edges: Vec::new(),
            directed_edges: Vec::new(),
            weight_magnitude: 0,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Iterates every vertex id
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.vertex_count).map(NodeId)
    }

    /// Fails with [`AlgorithmError::InvalidNode`] when `node` is out of range
    #[inline]
    pub fn check_node(&self, node: NodeId) -> Result<(), AlgorithmError> {
        if node.0 < self.vertex_count {
            Ok(())
        } else {
            Err(AlgorithmError::InvalidNode {
                node,
                vertex_count: self.vertex_count,
            })
        }
    }

    /// Appends an edge to the store selected by `class`
    ///
    /// Parallel edges and self-loops are kept as given. The weight sign is not
    /// checked; engines warn about negative weights but still run. Fails with
    /// [`AlgorithmError::InvalidGraph`] when the summed weight magnitude would
    /// exceed [`MAX_TOTAL_WEIGHT`].
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Weight,
        class: EdgeClass,
    ) -> Result<(), AlgorithmError> {
        self.check_node(from)?;
        self.check_node(to)?;
        let magnitude = self
            .weight_magnitude
            .checked_add(weight.unsigned_abs())
            .filter(|&m| m <= MAX_TOTAL_WEIGHT)
            .ok_or_else(|| {
                AlgorithmError::InvalidGraph(format!(
                    "edge {from} - {to} of weight {weight} pushes the total edge weight past {MAX_TOTAL_WEIGHT}"
                ))
            })?;
        self.weight_magnitude = magnitude;

        match class {
            EdgeClass::Directed => {
                self.directed[from.0].push(Adjacency { to, weight });
                self.directed_edges.push(Edge::new(from, to, weight));
            }
            EdgeClass::Undirected => {
                self.undirected[from.0].push(Adjacency { to, weight });
                self.undirected[to.0].push(Adjacency { to: from, weight });
                self.undirected_edges.push(Edge::new(from, to, weight));
            }
        }
        Ok(())
    }

    /// Ordered adjacency of `node` in the requested edge class
    ///
    /// # Panics
    /// Panics if `node` is out of range; callers validate ids up front.
    #[inline]
    pub fn neighbors(&self, node: NodeId, class: EdgeClass) -> &[Adjacency] {
        match class {
            EdgeClass::Undirected => &self.undirected[node.0],
            EdgeClass::Directed => &self.directed[node.0],
        }
    }

    /// Edges of one class in insertion order, each undirected edge once
    pub fn edges(&self, class: EdgeClass) -> &[Edge] {
        match class {
            EdgeClass::Undirected => &self.undirected_edges,
            EdgeClass::Directed => &self.directed_edges,
        }
    }

    #[inline]
    pub fn edge_count(&self, class: EdgeClass) -> usize {
        self.edges(class).len()
    }

    pub fn has_negative_weights(&self, class: EdgeClass) -> bool {
        self.edges(class).iter().any(|e| e.weight < 0)
    }

    /// Weight of the lightest `from -> to` edge in `class`, if any
    pub fn min_weight_between(&self, from: NodeId, to: NodeId, class: EdgeClass) -> Option<Weight> {
        self.neighbors(from, class)
            .iter()
            .filter(|adj| adj.to == to)
            .map(|adj| adj.weight)
            .min()
    }
}
