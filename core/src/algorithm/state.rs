//! Relaxation state shared by the shortest-path and spanning-tree engines
//!
//! Both engines grow a set of finalized vertices from a source by repeatedly
//! popping the cheapest frontier entry and relaxing its neighbors. They differ
//! only in the candidate value an edge offers its head vertex, which is
//! captured by [`RelaxationRule`]:
//!
//! - [`PathCost`]: settled distance plus edge weight (Dijkstra)
//! - [`EdgeKey`]: the raw edge weight (Prim)
//!
//! # Invariants
//! - Distances only decrease while a vertex is outside the explored set
//! - Once a vertex is explored its distance and parent never change
//! - The source has distance zero and no parent
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, trace};

use crate::algorithm::traits::{AlgorithmError, AlgorithmMetrics, AlgorithmProfiler, NodeId};
use crate::data_structures::graph::{Distance, EdgeClass, Graph, Weight};
use crate::data_structures::priority_queue::Frontier;
use crate::execution::tracer::{ExecutionTracer, TraceEvent};

/// Candidate value offered to a neighbor through one edge
pub trait RelaxationRule {
    /// Candidate for the head of an edge of `weight` leaving a vertex at `settled`
    fn candidate(&self, settled: Distance, weight: Weight) -> Distance;
}

/// Cumulative path cost: shortest-path tree relaxation
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCost;

impl RelaxationRule for PathCost {
    #[inline]
    fn candidate(&self, settled: Distance, weight: Weight) -> Distance {
        settled.extend(weight)
    }
}

/// Raw edge weight: minimum spanning tree relaxation
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeKey;

impl RelaxationRule for EdgeKey {
    #[inline]
    fn candidate(&self, _settled: Distance, weight: Weight) -> Distance {
        Distance::from(weight)
    }
}

/// Set of finalized vertices
#[derive(Debug, Clone)]
pub struct ExploredSet {
    flags: Vec<bool>,
    len: usize,
}

impl ExploredSet {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            flags: vec![false; vertex_count],
            len: 0,
        }
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.flags[node.0]
    }

    /// Returns `false` if `node` was already explored
    #[inline]
    pub fn insert(&mut self, node: NodeId) -> bool {
        let newly = !std::mem::replace(&mut self.flags[node.0], true);
        if newly {
            self.len += 1;
        }
        newly
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, &explored)| explored)
            .map(|(i, _)| NodeId(i))
    }
}

/// Vectors produced by one relaxation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxationOutcome {
    pub distances: Vec<Distance>,
    pub parents: Vec<Option<NodeId>>,
    pub metrics: AlgorithmMetrics,
}

/// Working state of one relaxation run
#[derive(Debug)]
pub struct RelaxationState {
    distances: Vec<Distance>,
    parents: Vec<Option<NodeId>>,
    explored: ExploredSet,
    frontier: Frontier,
    profiler: AlgorithmProfiler,
}

impl RelaxationState {
    /// Fresh state: everything unreached except `source` at zero
    pub fn new(vertex_count: usize, source: NodeId) -> Self {
        let mut distances = vec![Distance::INFINITY; vertex_count];
        distances[source.0] = Distance::ZERO;

        Self {
            distances,
            parents: vec![None; vertex_count],
            explored: ExploredSet::new(vertex_count),
            frontier: Frontier::with_capacity(vertex_count),
            profiler: AlgorithmProfiler::new(),
        }
    }

    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    pub fn parents(&self) -> &[Option<NodeId>] {
        &self.parents
    }

    pub fn explored(&self) -> &ExploredSet {
        &self.explored
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Checks the structural invariants that hold between steps
    pub fn verify_invariants(&self, source: NodeId) -> Result<(), AlgorithmError> {
        if self.distances[source.0] != Distance::ZERO || self.parents[source.0].is_some() {
            return Err(AlgorithmError::InvalidGraph(format!(
                "source {source} lost its zero distance or gained a parent"
            )));
        }
        for (i, (distance, parent)) in self.distances.iter().zip(&self.parents).enumerate() {
            let node = NodeId(i);
            if node != source && distance.is_finite() != parent.is_some() {
                return Err(AlgorithmError::InvalidGraph(format!(
                    "vertex {node} has distance {distance} but parent {parent:?}"
                )));
            }
        }
        Ok(())
    }

    fn push(&mut self, node: NodeId, distance: Distance, tracer: &mut Option<&mut ExecutionTracer>) {
        self.frontier.push(node, distance);
        self.profiler.record_push(self.frontier.len());
        if let Some(t) = tracer.as_deref_mut() {
            t.record(TraceEvent::Push { node, distance });
        }
    }

    fn into_outcome(mut self) -> RelaxationOutcome {
        self.profiler.stop();
        RelaxationOutcome {
            distances: self.distances,
            parents: self.parents,
            metrics: self.profiler.get_metrics(),
        }
    }
}

/// Runs lazy-deletion relaxation from `source` over the `class` adjacency
///
/// The frontier may hold several entries for one vertex; only the first one
/// popped is acted upon, later ones are recognized through the explored set
/// and skipped. `source` must already be validated against `graph`.
pub fn relax<R: RelaxationRule>(
    graph: &Graph,
    source: NodeId,
    class: EdgeClass,
    rule: &R,
    mut tracer: Option<&mut ExecutionTracer>,
) -> RelaxationOutcome {
    let mut state = RelaxationState::new(graph.vertex_count(), source);
    state.profiler.start();
    state.push(source, Distance::ZERO, &mut tracer);

    while let Some(entry) = state.frontier.pop() {
        let u = entry.node;
        state.profiler.record_step();

        if state.explored.contains(u) {
            state.profiler.record_stale_entry();
            trace!("stale entry ({}, {}) skipped", u, entry.distance);
            if let Some(t) = tracer.as_deref_mut() {
                t.record(TraceEvent::StaleSkip { node: u, distance: entry.distance });
            }
            continue;
        }

        if let Some(t) = tracer.as_deref_mut() {
            t.record(TraceEvent::Pop { node: u, distance: entry.distance });
        }

        let settled = state.distances[u.0];
        for adj in graph.neighbors(u, class) {
            let v = adj.to;
            // Self-loops never improve the vertex being finalized
            if v == u || state.explored.contains(v) {
                continue;
            }

            let candidate = rule.candidate(settled, adj.weight);
            let old = state.distances[v.0];
            if candidate < old {
                state.distances[v.0] = candidate;
                state.parents[v.0] = Some(u);
                state.profiler.record_relaxation();
                trace!("relaxed {} -> {}: {} -> {}", u, v, old, candidate);
                if let Some(t) = tracer.as_deref_mut() {
                    t.record(TraceEvent::Relax {
                        from: u,
                        to: v,
                        weight: adj.weight,
                        old,
                        new: candidate,
                    });
                }
                state.push(v, candidate, &mut tracer);
            }
        }

        state.explored.insert(u);
        state.profiler.record_node_exploration();
        if let Some(t) = tracer.as_deref_mut() {
            t.record(TraceEvent::Finalize { node: u, distance: settled });
        }
    }

    debug_assert!(state.verify_invariants(source).is_ok());
    debug!(
        "relaxation from {} over {} edges finalized {} of {} vertices",
        source,
        class,
        state.explored.len(),
        graph.vertex_count()
    );
    state.into_outcome()
}
