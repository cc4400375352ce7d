//! Core algorithm trait definitions for Waypoint
//!
//! This module establishes the shared vocabulary of the relaxation engines:
//! vertex identifiers, the error taxonomy, execution metrics and the
//! [`Algorithm`] trait both engines implement.
//!
//! # Key Design Principles
//! - Vertices are dense indices wrapped in [`NodeId`]
//! - Engines are stateless between runs; results own their vectors
//! - Tracing is opt-in and never changes the computed result
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::{self, Debug, Display};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::data_structures::graph::Graph;
use crate::execution::tracer::ExecutionTracer;

/// Node identifier ensuring type safety and preventing mixing with other numeric types
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Algorithm parameter description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub allowed_values: Vec<String>,
}

/// Comprehensive error types for algorithm operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid node: {node} (graph has {vertex_count} vertices)")]
    InvalidNode { node: NodeId, vertex_count: usize },

    #[error("Invalid graph state: {0}")]
    InvalidGraph(String),

    #[error("Algorithm not supported on given input: {0}")]
    NotSupported(String),
}

/// Algorithm execution metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    /// Frontier entries popped, live or stale
    pub steps_executed: usize,
    /// Vertices finalized
    pub nodes_explored: usize,
    /// Popped entries whose vertex was already finalized
    pub stale_entries_skipped: usize,
    /// Successful distance/key improvements
    pub relaxations: usize,
    pub frontier_pushes: usize,
    pub peak_frontier_len: usize,
    #[serde(with = "duration_micros")]
    pub execution_time: Duration,
}

mod duration_micros {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_micros() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_micros)
    }
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs
/// - Deterministic behavior for given inputs
/// - A traced run computes the same result as an untraced one
pub trait Algorithm: Debug + Send + Sync {
    /// Result produced by one run
    type Output;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g. pathfinding, spanning tree)
    fn category(&self) -> &'static str;

    fn description(&self) -> String;

    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with their current values
    fn parameters(&self) -> Vec<AlgorithmParameter> {
        Vec::new()
    }

    /// Sets algorithm parameter with validation
    fn set_parameter(&mut self, name: &str, _value: &str) -> Result<(), AlgorithmError> {
        Err(AlgorithmError::InvalidParameter {
            name: name.to_owned(),
            reason: format!("{} takes no parameters", self.name()),
        })
    }

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    /// Verifies the algorithm can run on `graph` from `source`
    fn is_compatible_with(&self, graph: &Graph, source: NodeId) -> Result<(), AlgorithmError> {
        graph.check_node(source)
    }

    /// Executes the algorithm, recording events into `tracer` when given
    fn execute_with_tracing(
        &self,
        graph: &Graph,
        source: NodeId,
        tracer: Option<&mut ExecutionTracer>,
    ) -> Result<Self::Output, AlgorithmError>;

    fn execute(&self, graph: &Graph, source: NodeId) -> Result<Self::Output, AlgorithmError> {
        self.execute_with_tracing(graph, source, None)
    }
}

/// Performance profiling for a single run
#[derive(Debug)]
pub struct AlgorithmProfiler {
    metrics: AlgorithmMetrics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self {
            metrics: AlgorithmMetrics::default(),
            start_time: None,
        }
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    #[inline]
    pub fn record_step(&mut self) {
        self.metrics.steps_executed += 1;
    }

    #[inline]
    pub fn record_node_exploration(&mut self) {
        self.metrics.nodes_explored += 1;
    }

    #[inline]
    pub fn record_stale_entry(&mut self) {
        self.metrics.stale_entries_skipped += 1;
    }

    #[inline]
    pub fn record_relaxation(&mut self) {
        self.metrics.relaxations += 1;
    }

    /// Records a frontier push and the frontier size after it
    #[inline]
    pub fn record_push(&mut self, frontier_len: usize) {
        self.metrics.frontier_pushes += 1;
        self.metrics.peak_frontier_len = self.metrics.peak_frontier_len.max(frontier_len);
    }

    pub fn get_metrics(&self) -> AlgorithmMetrics {
        self.metrics.clone()
    }
}

impl Default for AlgorithmProfiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_type_safety() {
        let node1 = NodeId(42);
        let node2 = NodeId(42);
        let node3 = NodeId(43);

        assert_eq!(node1, node2);
        assert_ne!(node1, node3);
        assert_eq!(node1.as_usize(), 42);
        assert_eq!(NodeId::from(7), NodeId(7));
    }

    #[test]
    fn test_profiler_tracks_peak_frontier() {
        let mut profiler = AlgorithmProfiler::new();
        profiler.record_push(1);
        profiler.record_push(3);
        profiler.record_push(2);
        profiler.record_stale_entry();

        let metrics = profiler.get_metrics();
        assert_eq!(metrics.frontier_pushes, 3);
        assert_eq!(metrics.peak_frontier_len, 3);
        assert_eq!(metrics.stale_entries_skipped, 1);
    }

    #[test]
    fn test_metrics_serialize_duration_as_micros() {
        let metrics = AlgorithmMetrics {
            execution_time: Duration::from_millis(2),
            ..AlgorithmMetrics::default()
        };
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["execution_time"], 2000);
    }

    #[test]
    fn test_error_messages() {
        let err = AlgorithmError::InvalidNode {
            node: NodeId(9),
            vertex_count: 4,
        };
        assert_eq!(err.to_string(), "Invalid node: #9 (graph has 4 vertices)");
    }
}
