//! Route planning over a loaded road network.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search strategies (BFS, UCS, A*)
//! - [`RouteRequest`] - A single start/goal query with optional limits
//! - [`RoutePlan`] - Planned route result
//! - [`RoutingEngine`] - Owns the graph and heuristics and answers queries
//!
//! # Strategy Pattern
//!
//! Each algorithm is a [`RoutePlanner`] that supplies the frontier priority
//! and the label comparison; the traversal loop itself is shared.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//!
//! use roadnet_lib::{load_network, DatasetPaths, RouteAlgorithm, RoutingEngine};
//!
//! let network = load_network(&DatasetPaths::in_dir(Path::new("data")), &Default::default())?;
//! let engine = RoutingEngine::from(network);
//! let plan = engine.route(RouteAlgorithm::AStar, 2270143902, 1079387396)?;
//! println!("{} nodes, {:.3} m", plan.steps.len(), plan.total_cost);
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, BfsPlanner, RoutePlanner, UniformCostPlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::heuristic::HeuristicTable;
use crate::loader::Network;
use crate::path::{search, SearchLimits};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (fewest hops).
    Bfs,
    /// Uniform-cost search (shortest distance).
    Ucs,
    /// A* search guided by a designated-destination heuristic.
    #[serde(rename = "a-star")]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::Ucs => "ucs",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "bfs" => Ok(RouteAlgorithm::Bfs),
            "ucs" | "dijkstra" => Ok(RouteAlgorithm::Ucs),
            "a-star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: NodeId,
    pub goal: NodeId,
    pub algorithm: RouteAlgorithm,
    pub limits: SearchLimits,
}

impl RouteRequest {
    pub fn new(algorithm: RouteAlgorithm, start: NodeId, goal: NodeId) -> Self {
        Self {
            start,
            goal,
            algorithm,
            limits: SearchLimits::default(),
        }
    }

    /// Convenience constructor for BFS routes.
    pub fn bfs(start: NodeId, goal: NodeId) -> Self {
        Self::new(RouteAlgorithm::Bfs, start, goal)
    }

    /// Convenience constructor for uniform-cost routes.
    pub fn ucs(start: NodeId, goal: NodeId) -> Self {
        Self::new(RouteAlgorithm::Ucs, start, goal)
    }

    /// Convenience constructor for A* routes.
    pub fn a_star(start: NodeId, goal: NodeId) -> Self {
        Self::new(RouteAlgorithm::AStar, start, goal)
    }

    /// Cap the number of node expansions.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.limits.max_expansions = Some(limit);
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: NodeId,
    pub goal: NodeId,
    pub steps: Vec<NodeId>,
    /// Sum of edge distances along `steps`.
    pub total_cost: f64,
    /// Number of label updates performed during the search.
    pub visited: usize,
    /// Driving time along `steps` at posted speed limits.
    pub travel_time_secs: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Answers start/goal queries against an immutable graph and optional
/// heuristic table. Queries never mutate the engine, so it can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    graph: Graph,
    heuristics: Option<HeuristicTable>,
}

impl RoutingEngine {
    /// Engine without heuristics; A* queries fail with
    /// [`crate::Error::HeuristicsUnavailable`].
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            heuristics: None,
        }
    }

    /// Attach the heuristic table used by A*.
    pub fn with_heuristics(mut self, heuristics: HeuristicTable) -> Self {
        self.heuristics = Some(heuristics);
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn heuristics(&self) -> Option<&HeuristicTable> {
        self.heuristics.as_ref()
    }

    /// Route from `start` to `goal` without limits.
    pub fn route(
        &self,
        algorithm: RouteAlgorithm,
        start: NodeId,
        goal: NodeId,
    ) -> Result<RoutePlan> {
        self.plan(&RouteRequest::new(algorithm, start, goal))
    }

    /// Compute a route for `request`.
    ///
    /// Either a complete path is returned or a typed error; there are no
    /// partial results and no retries.
    pub fn plan(&self, request: &RouteRequest) -> Result<RoutePlan> {
        let planner = select_planner(request.algorithm, self.heuristics.as_ref(), request.goal)?;
        let outcome = search(
            &self.graph,
            planner.as_ref(),
            request.start,
            request.goal,
            &request.limits,
        )?;

        Ok(RoutePlan {
            algorithm: request.algorithm,
            start: request.start,
            goal: request.goal,
            steps: outcome.path,
            total_cost: outcome.cost,
            visited: outcome.visited,
            travel_time_secs: outcome.travel_time_secs,
        })
    }
}

impl From<Network> for RoutingEngine {
    fn from(network: Network) -> Self {
        let engine = RoutingEngine::new(network.graph);
        match network.heuristics {
            Some(table) => engine.with_heuristics(table),
            None => engine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_plan_hop_count() {
        let plan = RoutePlan {
            algorithm: RouteAlgorithm::Bfs,
            start: 1,
            goal: 3,
            steps: vec![1, 2, 3],
            total_cost: 2.0,
            visited: 2,
            travel_time_secs: 0.0,
        };
        assert_eq!(plan.hop_count(), 2);
    }

    #[test]
    fn route_plan_empty_hop_count() {
        let plan = RoutePlan {
            algorithm: RouteAlgorithm::Ucs,
            start: 1,
            goal: 1,
            steps: vec![1],
            total_cost: 0.0,
            visited: 0,
            travel_time_secs: 0.0,
        };
        assert_eq!(plan.hop_count(), 0);
    }

    #[test]
    fn algorithm_parses_aliases() {
        assert_eq!("dijkstra".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::Ucs));
        assert_eq!("A*".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::AStar));
        assert!("greedy".parse::<RouteAlgorithm>().is_err());
    }

    #[test]
    fn algorithm_display_round_trips_through_parse() {
        for algorithm in [RouteAlgorithm::Bfs, RouteAlgorithm::Ucs, RouteAlgorithm::AStar] {
            assert_eq!(algorithm.to_string().parse::<RouteAlgorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn request_builder_sets_limit() {
        let request = RouteRequest::ucs(1, 2).with_max_expansions(10);
        assert_eq!(request.limits.max_expansions, Some(10));
        assert_eq!(request.algorithm, RouteAlgorithm::Ucs);
    }
}
