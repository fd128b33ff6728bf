use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::frontier::{EmptyFrontier, Frontier, Label};
use crate::graph::{Graph, NodeId};
use crate::routing::RoutePlanner;

/// Caps applied to a single search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of node expansions before the search gives up with
    /// [`Error::SearchAborted`]. `None` runs to success or exhaustion.
    pub max_expansions: Option<usize>,
}

/// Best label recorded for a node and the node it was reached from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settled {
    pub label: Label,
    pub predecessor: Option<NodeId>,
}

/// Per-query traversal state. Created at query start, dropped at query end.
#[derive(Debug)]
pub struct SettledSet {
    entries: HashMap<NodeId, Settled>,
}

impl SettledSet {
    /// Seed the set with `start` at zero cost and no predecessor.
    pub fn new(start: NodeId) -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            start,
            Settled {
                label: Label::START,
                predecessor: None,
            },
        );
        Self { entries }
    }

    pub fn get(&self, node: NodeId) -> Option<Settled> {
        self.entries.get(&node).copied()
    }

    /// Record `label` as the best known label of `node`, reached from
    /// `predecessor`.
    pub fn record(&mut self, node: NodeId, label: Label, predecessor: NodeId) {
        self.entries.insert(
            node,
            Settled {
                label,
                predecessor: Some(predecessor),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follow predecessor links from `goal` back to `start` and return the
    /// path in travel order.
    pub fn reconstruct_path(&self, start: NodeId, goal: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(node) = current {
            path.push(node);
            if node == start || path.len() > self.entries.len() {
                break;
            }
            current = self.entries.get(&node).and_then(|entry| entry.predecessor);
        }
        path.reverse();
        path
    }
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub path: Vec<NodeId>,
    pub cost: f64,
    /// Travel time summed over the edges of `path`.
    pub travel_time_secs: f64,
    /// Number of label updates (relaxations) performed.
    pub visited: usize,
    /// Number of nodes popped and expanded.
    pub expansions: usize,
}

/// Run a single-source search from `start` to `goal` using `planner` to
/// order the frontier.
///
/// The destination is accepted when it is popped, not when it is first
/// discovered, so UCS and A* return optimal costs. Entries whose label has
/// since been improved are skipped when popped.
pub fn search(
    graph: &Graph,
    planner: &dyn RoutePlanner,
    start: NodeId,
    goal: NodeId,
    limits: &SearchLimits,
) -> Result<SearchOutcome> {
    if start == goal {
        return Ok(SearchOutcome {
            path: vec![start],
            cost: 0.0,
            travel_time_secs: 0.0,
            visited: 0,
            expansions: 0,
        });
    }

    let mut settled = SettledSet::new(start);
    let mut frontier = Frontier::new();
    let start_key = planner.priority(start, Label::START, frontier.next_seq())?;
    frontier.push(start_key, start, Label::START);

    let mut visited = 0usize;
    let mut expansions = 0usize;

    loop {
        let entry = match frontier.pop_min() {
            Ok(entry) => entry,
            Err(EmptyFrontier) => {
                debug!(
                    algorithm = %planner.algorithm(),
                    start,
                    goal,
                    visited,
                    expansions,
                    "frontier exhausted"
                );
                return Err(Error::NoPathFound { start, goal });
            }
        };

        let Some(current) = settled.get(entry.node) else {
            continue;
        };
        if planner.improves(current.label, entry.label) {
            continue;
        }

        if entry.node == goal {
            let path = settled.reconstruct_path(start, goal);
            debug!(
                algorithm = %planner.algorithm(),
                start,
                goal,
                hops = path.len().saturating_sub(1),
                cost = current.label.cost,
                visited,
                expansions,
                "route found"
            );
            return Ok(SearchOutcome {
                path,
                cost: current.label.cost,
                travel_time_secs: current.label.travel_time_secs,
                visited,
                expansions,
            });
        }

        if let Some(limit) = limits.max_expansions {
            if expansions >= limit {
                warn!(
                    algorithm = %planner.algorithm(),
                    start,
                    goal,
                    limit,
                    "search aborted at expansion cap"
                );
                return Err(Error::SearchAborted { limit });
            }
        }
        expansions += 1;

        for edge in graph.edges_from(entry.node) {
            let next = edge.target;
            let candidate = current.label.extend(edge);
            let improved = match settled.get(next) {
                Some(existing) => planner.improves(candidate, existing.label),
                None => true,
            };
            if !improved {
                continue;
            }

            settled.record(next, candidate, entry.node);
            visited += 1;
            let key = planner.priority(next, candidate, frontier.next_seq())?;
            frontier.push(key, next, candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, GraphBuildOptions};
    use crate::routing::{BfsPlanner, UniformCostPlanner};

    fn graph(edges: &[(NodeId, NodeId, f64)]) -> Graph {
        Graph::from_edges(
            edges.iter().map(|&(source, target, distance)| Edge {
                source,
                target,
                distance,
                speed_limit: 40.0,
            }),
            &GraphBuildOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn reconstruct_path_follows_predecessors() {
        let edge = Edge {
            source: 1,
            target: 2,
            distance: 1.0,
            speed_limit: 40.0,
        };
        let mut settled = SettledSet::new(1);
        settled.record(2, Label::START.extend(&edge), 1);
        settled.record(3, Label::START.extend(&edge).extend(&edge), 2);
        assert_eq!(settled.reconstruct_path(1, 3), vec![1, 2, 3]);
        assert_eq!(settled.len(), 3);
    }

    #[test]
    fn start_equals_goal_short_circuits() {
        let g = graph(&[(1, 2, 1.0)]);
        let outcome = search(&g, &UniformCostPlanner, 1, 1, &SearchLimits::default()).unwrap();
        assert_eq!(outcome.path, vec![1]);
        assert_eq!(outcome.cost, 0.0);
        assert_eq!(outcome.visited, 0);
    }

    #[test]
    fn relaxation_repushes_cheaper_route() {
        let g = graph(&[(1, 2, 1.0), (1, 3, 5.0), (2, 3, 1.0)]);
        let outcome = search(&g, &UniformCostPlanner, 1, 3, &SearchLimits::default()).unwrap();
        assert_eq!(outcome.path, vec![1, 2, 3]);
        assert_eq!(outcome.cost, 2.0);
        // 2 and 3 discovered from 1, then 3 improved through 2.
        assert_eq!(outcome.visited, 3);
    }

    #[test]
    fn bfs_keeps_first_discovery() {
        let g = graph(&[(1, 2, 1.0), (1, 3, 5.0), (2, 3, 1.0)]);
        let outcome = search(&g, &BfsPlanner, 1, 3, &SearchLimits::default()).unwrap();
        assert_eq!(outcome.path, vec![1, 3]);
        assert_eq!(outcome.cost, 5.0);
        assert_eq!(outcome.visited, 2);
    }

    #[test]
    fn bfs_travel_time_follows_the_parallel_edge_taken() {
        let slow = Edge {
            source: 1,
            target: 2,
            distance: 10.0,
            speed_limit: 36.0,
        };
        let fast = Edge {
            distance: 1.0,
            ..slow
        };
        let g = Graph::from_edges([slow, fast], &GraphBuildOptions::default()).unwrap();
        let outcome = search(&g, &BfsPlanner, 1, 2, &SearchLimits::default()).unwrap();
        assert_eq!(outcome.cost, 10.0);
        assert!((outcome.travel_time_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn exhausted_frontier_is_no_path() {
        let g = graph(&[(1, 2, 1.0), (3, 4, 1.0)]);
        let err = search(&g, &BfsPlanner, 1, 4, &SearchLimits::default()).unwrap_err();
        assert!(matches!(err, Error::NoPathFound { start: 1, goal: 4 }));
    }

    #[test]
    fn cycles_terminate() {
        let g = graph(&[(1, 2, 0.0), (2, 1, 0.0), (2, 3, 1.0), (3, 2, 1.0)]);
        let err = search(&g, &UniformCostPlanner, 1, 9, &SearchLimits::default()).unwrap_err();
        assert!(matches!(err, Error::NoPathFound { .. }));
    }

    #[test]
    fn expansion_cap_aborts_search() {
        let g = graph(&[(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)]);
        let limits = SearchLimits {
            max_expansions: Some(2),
        };
        let err = search(&g, &UniformCostPlanner, 1, 4, &limits).unwrap_err();
        assert!(matches!(err, Error::SearchAborted { limit: 2 }));
    }
}
