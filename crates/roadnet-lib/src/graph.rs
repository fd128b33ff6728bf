use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Numeric identifier for a road intersection.
pub type NodeId = i64;

/// Metres per second in one kilometre per hour.
const KMH_TO_MS: f64 = 1.0 / 3.6;

/// Directed road segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Traversal cost in metres. Never negative.
    pub distance: f64,
    /// Posted speed limit in km/h. Always positive.
    pub speed_limit: f64,
}

impl Edge {
    /// Seconds needed to drive this segment at its speed limit.
    pub fn travel_time_secs(&self) -> f64 {
        self.distance / (self.speed_limit * KMH_TO_MS)
    }

    fn validate(&self) -> Result<()> {
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(Error::malformed(format!(
                "edge {} -> {} has invalid distance {}",
                self.source, self.target, self.distance
            )));
        }
        if !self.speed_limit.is_finite() || self.speed_limit <= 0.0 {
            return Err(Error::malformed(format!(
                "edge {} -> {} has non-positive speed limit {}",
                self.source, self.target, self.speed_limit
            )));
        }
        Ok(())
    }
}

/// Options controlling how a [`Graph`] is assembled from an edge stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuildOptions {
    /// Reject input whose edges are not contiguous by source node. When
    /// `false` (the default) edges are grouped by key and input order only
    /// affects the order of each node's adjacency list.
    pub require_grouped: bool,
}

/// Immutable adjacency representation of the road network.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
    nodes: Arc<HashSet<NodeId>>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph from directed edges, validating every record.
    ///
    /// Construction is all-or-nothing: the first invalid edge aborts the
    /// build and no graph is returned.
    pub fn from_edges<I>(edges: I, options: &GraphBuildOptions) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut adjacency: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        let mut nodes: HashSet<NodeId> = HashSet::new();
        let mut finished_groups: HashSet<NodeId> = HashSet::new();
        let mut current_group: Option<NodeId> = None;
        let mut edge_count = 0usize;

        for edge in edges {
            edge.validate()?;

            if options.require_grouped && current_group != Some(edge.source) {
                if finished_groups.contains(&edge.source) {
                    return Err(Error::malformed(format!(
                        "edges for start node {} are not contiguous",
                        edge.source
                    )));
                }
                if let Some(previous) = current_group.replace(edge.source) {
                    finished_groups.insert(previous);
                }
            }

            nodes.insert(edge.source);
            nodes.insert(edge.target);
            adjacency.entry(edge.source).or_default().push(edge);
            edge_count += 1;
        }

        debug!(
            nodes = nodes.len(),
            edges = edge_count,
            sources = adjacency.len(),
            "built road graph"
        );

        Ok(Self {
            adjacency: Arc::new(adjacency),
            nodes: Arc::new(nodes),
            edge_count,
        })
    }

    /// Outgoing edges of `node` in input order. Unknown nodes and sinks
    /// yield an empty slice.
    pub fn edges_from(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `node` appears anywhere in the graph, as a source or a target.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// A node with no outgoing edges is a dead end.
    pub fn is_sink(&self, node: NodeId) -> bool {
        self.edges_from(node).is_empty()
    }

    /// Number of distinct nodes, sinks included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: NodeId, target: NodeId, distance: f64) -> Edge {
        Edge {
            source,
            target,
            distance,
            speed_limit: 50.0,
        }
    }

    #[test]
    fn keeps_last_group_of_the_stream() {
        let edges = vec![edge(1, 2, 1.0), edge(2, 3, 1.0), edge(3, 1, 1.0), edge(3, 4, 2.0)];
        let graph = Graph::from_edges(edges, &GraphBuildOptions::default()).unwrap();

        let targets: Vec<_> = graph.edges_from(3).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![1, 4]);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn interleaved_sources_are_merged_by_default() {
        let edges = vec![edge(1, 2, 1.0), edge(2, 3, 1.0), edge(1, 3, 4.0)];
        let graph = Graph::from_edges(edges, &GraphBuildOptions::default()).unwrap();

        let targets: Vec<_> = graph.edges_from(1).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![2, 3]);
    }

    #[test]
    fn interleaved_sources_fail_when_grouping_is_required() {
        let edges = vec![edge(1, 2, 1.0), edge(2, 3, 1.0), edge(1, 3, 4.0)];
        let options = GraphBuildOptions {
            require_grouped: true,
        };
        let err = Graph::from_edges(edges, &options).unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
        assert!(err.to_string().contains("not contiguous"));
    }

    #[test]
    fn grouped_input_passes_strict_mode() {
        let edges = vec![edge(1, 2, 1.0), edge(1, 3, 1.0), edge(2, 3, 1.0)];
        let options = GraphBuildOptions {
            require_grouped: true,
        };
        let graph = Graph::from_edges(edges, &options).unwrap();
        assert_eq!(graph.edges_from(1).len(), 2);
    }

    #[test]
    fn negative_distance_is_rejected() {
        let err = Graph::from_edges(vec![edge(1, 2, -0.5)], &GraphBuildOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput { .. }));
    }

    #[test]
    fn zero_speed_limit_is_rejected() {
        let bad = Edge {
            speed_limit: 0.0,
            ..edge(1, 2, 1.0)
        };
        let err = Graph::from_edges(vec![bad], &GraphBuildOptions::default()).unwrap_err();
        assert!(err.to_string().contains("speed limit"));
    }

    #[test]
    fn sinks_and_unknown_nodes_have_no_edges() {
        let graph = Graph::from_edges(vec![edge(1, 2, 1.0)], &GraphBuildOptions::default())
            .unwrap();
        assert!(graph.edges_from(2).is_empty());
        assert!(graph.edges_from(99).is_empty());
        assert!(graph.is_sink(2));
        assert!(graph.contains_node(2));
        assert!(!graph.contains_node(99));
    }

    #[test]
    fn membership_covers_sources_and_sink_targets() {
        let graph = Graph::from_edges(
            vec![edge(1, 2, 3.0), edge(1, 2, 1.5), edge(2, 3, 1.0)],
            &GraphBuildOptions::default(),
        )
        .unwrap();
        assert_eq!(graph.node_count(), 3);
        assert!([1, 2, 3].iter().all(|&node| graph.contains_node(node)));
        assert!(graph.is_sink(3));
    }

    #[test]
    fn travel_time_uses_kmh() {
        let e = Edge {
            source: 1,
            target: 2,
            distance: 1000.0,
            speed_limit: 36.0,
        };
        assert!((e.travel_time_secs() - 100.0).abs() < 1e-9);
    }
}
