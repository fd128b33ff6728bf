//! Min-ordered frontier shared by every search strategy.
//!
//! Strategies differ only in the priority key they hand to [`Frontier::push`];
//! the queue itself always pops the smallest key, breaking ties by insertion
//! order so identical queries expand nodes in an identical sequence.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use thiserror::Error;

use crate::graph::{Edge, NodeId};

/// Raised when popping from a drained frontier. The engine turns this into
/// [`crate::Error::NoPathFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("frontier is empty")]
pub struct EmptyFrontier;

/// Cost bookkeeping attached to a node when it is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    /// Accumulated distance from the start.
    pub cost: f64,
    /// Number of edges from the start.
    pub hops: u32,
    /// Travel time of the edges actually followed, in seconds. Reported
    /// only, never compared.
    pub travel_time_secs: f64,
}

impl Label {
    pub const START: Label = Label {
        cost: 0.0,
        hops: 0,
        travel_time_secs: 0.0,
    };

    /// Label after following `edge`.
    pub fn extend(self, edge: &Edge) -> Self {
        Self {
            cost: self.cost + edge.distance,
            hops: self.hops + 1,
            travel_time_secs: self.travel_time_secs + edge.travel_time_secs(),
        }
    }
}

/// Pending expansion popped from the frontier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierEntry {
    pub key: f64,
    pub seq: u64,
    pub node: NodeId,
    /// Label the node carried when this entry was pushed. If the node has
    /// since been relaxed to a better label, the entry is stale.
    pub label: Label,
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct QueueEntry(FrontierEntry);

impl QueueEntry {
    fn rank(&self) -> (FloatOrd, u64) {
        (FloatOrd(self.0.key), self.0.seq)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by key, then seq.
        other.rank().cmp(&self.rank())
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Query-local queue of discovered but unexpanded nodes.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<QueueEntry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number the next [`push`](Self::push) will be assigned.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Queue `node` under `key`. Returns the assigned sequence number.
    pub fn push(&mut self, key: f64, node: NodeId, label: Label) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueueEntry(FrontierEntry {
            key,
            seq,
            node,
            label,
        }));
        seq
    }

    /// Remove the entry with the smallest key (earliest insertion on ties).
    pub fn pop_min(&mut self) -> Result<FrontierEntry, EmptyFrontier> {
        self.heap.pop().map(|entry| entry.0).ok_or(EmptyFrontier)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
