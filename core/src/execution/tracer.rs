//! Execution tracing for relaxation runs
//!
//! An [`ExecutionTracer`] records every frontier push and pop, every stale
//! entry skipped, every successful relaxation and every finalization, tagged
//! with the step (pop count) at which it happened. A trace can be queried per
//! vertex or serialized to JSON and replayed by a learner step by step.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::algorithm::traits::NodeId;
use crate::data_structures::graph::{Distance, EdgeClass, Weight};

/// Single observable action of a relaxation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Entry pushed onto the frontier
    Push { node: NodeId, distance: Distance },

    /// Live entry popped; `node` is about to be scanned
    Pop { node: NodeId, distance: Distance },

    /// Popped entry whose vertex was already finalized
    StaleSkip { node: NodeId, distance: Distance },

    /// Distance (or key) of `to` lowered through the edge from `from`
    Relax {
        from: NodeId,
        to: NodeId,
        weight: Weight,
        old: Distance,
        new: Distance,
    },

    /// `node` entered the explored set
    Finalize { node: NodeId, distance: Distance },
}

impl TraceEvent {
    /// Vertex the event is about
    pub fn node(&self) -> NodeId {
        match *self {
            TraceEvent::Push { node, .. }
            | TraceEvent::Pop { node, .. }
            | TraceEvent::StaleSkip { node, .. }
            | TraceEvent::Finalize { node, .. } => node,
            TraceEvent::Relax { to, .. } => to,
        }
    }
}

/// Trace event stamped with its step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracePoint {
    /// Number of frontier pops before this event
    pub step: usize,
    #[serde(flatten)]
    pub event: TraceEvent,
}

/// Metadata describing the traced run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceMetadata {
    pub algorithm_name: String,
    pub source: NodeId,
    pub edge_class: EdgeClass,
    pub vertex_count: usize,
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("tracer has no active run")]
    NotStarted,

    #[error("trace serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Recorder for one engine run at a time
#[derive(Debug, Default)]
pub struct ExecutionTracer {
    metadata: Option<TraceMetadata>,
    points: Vec<TracePoint>,
    step: usize,

    /// Indices into `points` per vertex
    node_visits: HashMap<NodeId, Vec<usize>>,

    /// Upper bound on recorded points; `None` records everything
    capacity: Option<usize>,
    truncated: bool,
}

impl ExecutionTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracer that stops recording after `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Clears previous data and starts a new run
    pub fn begin(&mut self, metadata: TraceMetadata) {
        self.metadata = Some(metadata);
        self.points.clear();
        self.node_visits.clear();
        self.step = 0;
        self.truncated = false;
    }

    /// Records one event at the current step
    pub fn record(&mut self, event: TraceEvent) {
        if matches!(event, TraceEvent::Pop { .. } | TraceEvent::StaleSkip { .. }) {
            self.step += 1;
        }
        if self.capacity.is_some_and(|cap| self.points.len() >= cap) {
            self.truncated = true;
            return;
        }

        let index = self.points.len();
        self.node_visits.entry(event.node()).or_default().push(index);
        self.points.push(TracePoint {
            step: self.step,
            event,
        });
    }

    pub fn metadata(&self) -> Option<&TraceMetadata> {
        self.metadata.as_ref()
    }

    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    /// Total number of pops seen, including any not recorded past capacity
    pub fn step_count(&self) -> usize {
        self.step
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Events concerning `node`, in execution order
    pub fn events_for(&self, node: NodeId) -> impl Iterator<Item = &TracePoint> {
        self.node_visits
            .get(&node)
            .into_iter()
            .flatten()
            .map(|&i| &self.points[i])
    }

    /// Number of stale entries skipped in the recorded run
    pub fn stale_skips(&self) -> usize {
        self.points
            .iter()
            .filter(|p| matches!(p.event, TraceEvent::StaleSkip { .. }))
            .count()
    }

    /// Order in which vertices were finalized
    pub fn finalization_order(&self) -> Vec<NodeId> {
        self.points
            .iter()
            .filter_map(|p| match p.event {
                TraceEvent::Finalize { node, .. } => Some(node),
                _ => None,
            })
            .collect()
    }

    /// Serializable snapshot of the recorded run
    pub fn get_trace(&self) -> Result<ExecutionTrace<'_>, TraceError> {
        let metadata = self.metadata.as_ref().ok_or(TraceError::NotStarted)?;
        Ok(ExecutionTrace {
            metadata,
            truncated: self.truncated,
            steps: self.step,
            points: &self.points,
        })
    }

    pub fn to_json(&self) -> Result<String, TraceError> {
        Ok(serde_json::to_string_pretty(&self.get_trace()?)?)
    }
}

/// Borrowed, serializable view over a recorded run
#[derive(Debug, Serialize)]
pub struct ExecutionTrace<'a> {
    pub metadata: &'a TraceMetadata,
    pub truncated: bool,
    pub steps: usize,
    pub points: &'a [TracePoint],
}
