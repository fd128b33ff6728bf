use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use roadnet_lib::{
    Edge, Graph, GraphBuildOptions, HeuristicTable, NodeId, RouteRequest, RoutingEngine,
};
use std::hint::black_box;

const SIDE: i64 = 120;
const SPACING: f64 = 100.0;

fn node(row: i64, col: i64) -> NodeId {
    row * SIDE + col
}

fn grid_edges() -> Vec<Edge> {
    let mut edges = Vec::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            for (dr, dc) in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
                let (r, c) = (row + dr, col + dc);
                if (0..SIDE).contains(&r) && (0..SIDE).contains(&c) {
                    // Deterministic detour factor keeps costs non-uniform.
                    let factor = 1.0 + ((row * 7 + col * 13) % 5) as f64 * 0.1;
                    edges.push(Edge {
                        source: node(row, col),
                        target: node(r, c),
                        distance: SPACING * factor,
                        speed_limit: 50.0,
                    });
                }
            }
        }
    }
    edges
}

static ENGINE: Lazy<RoutingEngine> = Lazy::new(|| {
    let graph = Graph::from_edges(grid_edges(), &GraphBuildOptions::default()).expect("grid");
    let goal = node(SIDE - 1, SIDE - 1);
    let rows = (0..SIDE).flat_map(|row| {
        (0..SIDE).map(move |col| {
            let dr = (SIDE - 1 - row) as f64 * SPACING;
            let dc = (SIDE - 1 - col) as f64 * SPACING;
            (node(row, col), vec![(dr * dr + dc * dc).sqrt()])
        })
    });
    let heuristics = HeuristicTable::new(vec![goal], rows).expect("heuristics");
    RoutingEngine::new(graph).with_heuristics(heuristics)
});
static BFS_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::bfs(0, node(SIDE - 1, SIDE - 1)));
static UCS_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::ucs(0, node(SIDE - 1, SIDE - 1)));
static ASTAR_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::a_star(0, node(SIDE - 1, SIDE - 1)));

fn benchmark_pathfinding(c: &mut Criterion) {
    let engine = &*ENGINE;

    c.bench_function("bfs_grid_corner_to_corner", |b| {
        let request = &*BFS_REQUEST;
        b.iter(|| {
            let plan = engine.plan(request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("ucs_grid_corner_to_corner", |b| {
        let request = &*UCS_REQUEST;
        b.iter(|| {
            let plan = engine.plan(request).expect("route exists");
            black_box(plan.total_cost)
        });
    });

    c.bench_function("astar_grid_corner_to_corner", |b| {
        let request = &*ASTAR_REQUEST;
        b.iter(|| {
            let plan = engine.plan(request).expect("route exists");
            black_box(plan.visited)
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
