// Module exports for CLI subcommands.
//
// Each module handles a specific CLI subcommand. main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod route;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use roadnet_lib::{load_network, resolve_dataset, GraphBuildOptions, RoutingEngine};

/// Resolve the dataset and build a routing engine over it.
pub fn load_engine(data_dir: Option<&Path>, options: &GraphBuildOptions) -> Result<RoutingEngine> {
    let paths = resolve_dataset(data_dir).context("failed to locate the road network dataset")?;
    let network = load_network(&paths, options)
        .with_context(|| format!("failed to load road network from {}", paths.edges.display()))?;
    Ok(RoutingEngine::from(network))
}
