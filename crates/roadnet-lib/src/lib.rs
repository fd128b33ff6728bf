//! Road-network routing library entry points.
//!
//! This crate loads a directed, weighted road network and an optional table
//! of destination heuristics, then answers single start/goal queries with
//! breadth-first, uniform-cost or A* search. Higher-level consumers (the
//! CLI) should only depend on the items exported here.
//!

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod loader;
pub mod path;
pub mod routing;

pub use dataset::{default_data_dir, resolve_dataset, DatasetPaths};
pub use error::{Error, Result};
pub use frontier::{EmptyFrontier, Frontier, FrontierEntry, Label};
pub use graph::{Edge, Graph, GraphBuildOptions, NodeId};
pub use heuristic::{HeuristicTable, DEFAULT_DESTINATIONS};
pub use loader::{load_graph, load_heuristics, load_network, read_edges, read_heuristics, Network};
pub use path::{search, SearchLimits, SearchOutcome, Settled, SettledSet};
pub use routing::{RouteAlgorithm, RoutePlan, RouteRequest, RoutingEngine};
