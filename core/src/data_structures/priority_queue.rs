//! Lazy-deletion frontier for relaxation algorithms
//!
//! [`Frontier`] is a binary min-heap of `(distance, node)` entries without a
//! decrease-key operation. Lowering a vertex's distance pushes a fresh entry
//! and leaves the old one in place; the old entry becomes stale and is skipped
//! by the caller when it surfaces, using the explored set.
//!
//! Entries with equal distance pop in ascending node order, so runs over the
//! same graph are reproducible.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::algorithm::traits::NodeId;
use crate::data_structures::graph::Distance;

/// One candidate entry in the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FrontierEntry {
    pub distance: Distance,
    pub node: NodeId,
}

/// Min-ordered multiset of candidate entries, duplicates allowed
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Pushes a candidate; older entries for `node` are left in place
    #[inline]
    pub fn push(&mut self, node: NodeId, distance: Distance) {
        self.heap.push(Reverse(FrontierEntry { distance, node }));
    }

    /// Removes and returns the entry with the smallest distance
    #[inline]
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    #[inline]
    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.heap.peek().map(|Reverse(entry)| entry)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
