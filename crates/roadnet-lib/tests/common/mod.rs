//! Common test utilities and fixture helpers.
//!
//! The fixture network under `docs/fixtures` is a 4x4 grid of intersections
//! (ids 101..=116, 100 m spacing) with a disconnected `900 -> 901` segment.
//! Its heuristic table targets 116, 104 and 113 with floored straight-line
//! distances.

use std::path::PathBuf;

use roadnet_lib::{
    load_network, DatasetPaths, Edge, Graph, GraphBuildOptions, NodeId, RoutePlan, RoutingEngine,
};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Engine over the fixture network with its heuristic table attached.
#[allow(dead_code)]
pub fn fixture_engine() -> RoutingEngine {
    let paths = DatasetPaths::in_dir(&fixtures_dir());
    let network = load_network(&paths, &GraphBuildOptions::default()).expect("fixture loads");
    RoutingEngine::from(network)
}

/// Build a graph from `(source, target, distance)` triples.
#[allow(dead_code)]
pub fn graph_from(edges: &[(NodeId, NodeId, f64)]) -> Graph {
    Graph::from_edges(
        edges.iter().map(|&(source, target, distance)| Edge {
            source,
            target,
            distance,
            speed_limit: 50.0,
        }),
        &GraphBuildOptions::default(),
    )
    .expect("valid edges")
}

/// Assert that consecutive steps are joined by graph edges whose distances
/// add up to the reported total.
#[allow(dead_code)]
pub fn assert_path_consistent(graph: &Graph, plan: &RoutePlan) {
    assert_eq!(plan.steps.first(), Some(&plan.start));
    assert_eq!(plan.steps.last(), Some(&plan.goal));

    let mut total = 0.0;
    for pair in plan.steps.windows(2) {
        let edge = graph
            .edges_from(pair[0])
            .iter()
            .find(|edge| edge.target == pair[1])
            .unwrap_or_else(|| panic!("no edge {} -> {}", pair[0], pair[1]));
        total += edge.distance;
    }
    assert!(
        (total - plan.total_cost).abs() < 1e-6,
        "edge sum {total} != reported {}",
        plan.total_cost
    );
}
