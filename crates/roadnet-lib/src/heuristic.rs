//! Precomputed straight-line estimates toward a fixed set of destinations.
//!
//! The table is only consulted by A*. Every value must be an admissible
//! lower bound on the true remaining road distance; the loader checks sign
//! and finiteness but cannot verify admissibility against the graph.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::NodeId;

/// Designated destinations of the reference Taipei road data set, in the
/// column order of its heuristic file.
pub const DEFAULT_DESTINATIONS: [NodeId; 3] = [1079387396, 1737223506, 8513026827];

/// Immutable per-node lookup of estimates, one value per destination.
#[derive(Debug, Clone)]
pub struct HeuristicTable {
    destinations: Arc<[NodeId]>,
    estimates: Arc<HashMap<NodeId, Box<[f64]>>>,
}

impl HeuristicTable {
    /// Build a table from `(node, estimates)` rows.
    ///
    /// Each row must hold exactly one finite, non-negative value per
    /// destination. Later rows for the same node replace earlier ones.
    pub fn new<I>(destinations: Vec<NodeId>, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, Vec<f64>)>,
    {
        let mut seen = HashSet::new();
        if let Some(duplicate) = destinations.iter().find(|id| !seen.insert(**id)) {
            return Err(Error::malformed(format!(
                "destination {duplicate} listed more than once"
            )));
        }

        let width = destinations.len();
        let mut estimates = HashMap::new();
        for (node, values) in rows {
            if values.len() != width {
                return Err(Error::malformed(format!(
                    "heuristic row for node {node} has {} values, expected {width}",
                    values.len()
                )));
            }
            if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
                return Err(Error::malformed(format!(
                    "heuristic row for node {node} has invalid estimate {bad}"
                )));
            }
            estimates.insert(node, values.into_boxed_slice());
        }

        debug!(
            nodes = estimates.len(),
            destinations = width,
            "built heuristic table"
        );

        Ok(Self {
            destinations: destinations.into(),
            estimates: Arc::new(estimates),
        })
    }

    /// Table that estimates zero everywhere for the listed nodes. A* over
    /// such a table behaves exactly like uniform-cost search.
    pub fn zero<I>(destinations: Vec<NodeId>, nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let width = destinations.len();
        Self::new(
            destinations,
            nodes.into_iter().map(|node| (node, vec![0.0; width])),
        )
    }

    /// Estimated remaining distance from `node` to the destination in slot
    /// `destination_index`.
    pub fn estimate(&self, node: NodeId, destination_index: usize) -> Result<f64> {
        if destination_index >= self.destinations.len() {
            return Err(Error::UnknownDestination {
                index: destination_index,
                available: self.destinations.len(),
            });
        }
        self.estimates
            .get(&node)
            .map(|values| values[destination_index])
            .ok_or(Error::MissingHeuristic { node })
    }

    /// Slot of `destination` in the designated list.
    pub fn destination_index(&self, destination: NodeId) -> Option<usize> {
        self.destinations.iter().position(|id| *id == destination)
    }

    pub fn destinations(&self) -> &[NodeId] {
        &self.destinations
    }

    /// Number of nodes with an estimate row.
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }
}
