//! Route planning strategies implementing the Strategy pattern.
//!
//! All planners drive the same search loop in [`crate::path::search`]. A
//! planner decides two things only: the priority key a node is queued under,
//! and which of two labels for the same node is better.

use crate::error::{Error, Result};
use crate::frontier::Label;
use crate::graph::NodeId;
use crate::heuristic::HeuristicTable;

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Priority key for queueing `node` reached with `label`. `seq` is the
    /// insertion sequence the frontier will assign to the entry.
    fn priority(&self, node: NodeId, label: Label, seq: u64) -> Result<f64>;

    /// Whether `candidate` should replace `existing` as a node's best label.
    fn improves(&self, candidate: Label, existing: Label) -> bool;
}

/// Breadth-first search planner.
///
/// Nodes are expanded in discovery order and labels are compared by hop
/// count, so the returned path has the fewest edges. Its distance is
/// reported but not minimised.
#[derive(Debug, Clone, Default)]
pub struct BfsPlanner;

impl RoutePlanner for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn priority(&self, _node: NodeId, _label: Label, seq: u64) -> Result<f64> {
        Ok(seq as f64)
    }

    fn improves(&self, candidate: Label, existing: Label) -> bool {
        candidate.hops < existing.hops
    }
}

/// Uniform-cost (Dijkstra) planner keyed by accumulated distance.
#[derive(Debug, Clone, Default)]
pub struct UniformCostPlanner;

impl RoutePlanner for UniformCostPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Ucs
    }

    fn priority(&self, _node: NodeId, label: Label, _seq: u64) -> Result<f64> {
        Ok(label.cost)
    }

    fn improves(&self, candidate: Label, existing: Label) -> bool {
        candidate.cost < existing.cost
    }
}

/// A* planner keyed by accumulated distance plus the heuristic estimate
/// toward one designated destination.
#[derive(Debug, Clone)]
pub struct AStarPlanner<'a> {
    heuristics: &'a HeuristicTable,
    destination_index: usize,
}

impl<'a> AStarPlanner<'a> {
    /// Create a planner toward `goal`, which must be one of the table's
    /// designated destinations.
    pub fn new(heuristics: &'a HeuristicTable, goal: NodeId) -> Result<Self> {
        let destination_index =
            heuristics
                .destination_index(goal)
                .ok_or_else(|| Error::UnsupportedDestination {
                    node: goal,
                    supported: heuristics.destinations().to_vec(),
                })?;
        Ok(Self {
            heuristics,
            destination_index,
        })
    }

    pub fn destination_index(&self) -> usize {
        self.destination_index
    }
}

impl RoutePlanner for AStarPlanner<'_> {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn priority(&self, node: NodeId, label: Label, _seq: u64) -> Result<f64> {
        let estimate = self.heuristics.estimate(node, self.destination_index)?;
        Ok(label.cost + estimate)
    }

    fn improves(&self, candidate: Label, existing: Label) -> bool {
        candidate.cost < existing.cost
    }
}

/// Select the planner for `algorithm`.
///
/// A* needs a heuristic table whose destination list contains `goal`; the
/// check happens here so configuration errors surface before any traversal.
pub fn select_planner<'a>(
    algorithm: RouteAlgorithm,
    heuristics: Option<&'a HeuristicTable>,
    goal: NodeId,
) -> Result<Box<dyn RoutePlanner + 'a>> {
    match algorithm {
        RouteAlgorithm::Bfs => Ok(Box::new(BfsPlanner)),
        RouteAlgorithm::Ucs => Ok(Box::new(UniformCostPlanner)),
        RouteAlgorithm::AStar => {
            let table = heuristics.ok_or(Error::HeuristicsUnavailable)?;
            Ok(Box::new(AStarPlanner::new(table, goal)?))
        }
    }
}
