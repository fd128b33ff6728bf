//! Route command handler for computing paths between intersections.

use std::io::Write;

use anyhow::{Context, Result};
use roadnet_lib::{NodeId, RouteAlgorithm, RouteRequest, RoutingEngine, DEFAULT_DESTINATIONS};

use crate::output::{render_plan, OutputFormat};

/// Start node of the reference query.
pub const DEFAULT_START: NodeId = 2270143902;

/// Goal node of the reference query, the first designated destination.
pub const DEFAULT_GOAL: NodeId = DEFAULT_DESTINATIONS[0];

/// Arguments for the route commands.
#[derive(Debug, Clone, Copy)]
pub struct RouteCommandArgs {
    /// Starting node id.
    pub from: NodeId,
    /// Destination node id.
    pub to: NodeId,
    /// Algorithm to use when planning the route.
    pub algorithm: RouteAlgorithm,
    /// Give up after this many node expansions.
    pub max_expansions: Option<usize>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let request = RouteRequest::new(self.algorithm, self.from, self.to);
        match self.max_expansions {
            Some(limit) => request.with_max_expansions(limit),
            None => request,
        }
    }
}

/// Handle a route subcommand, writing the plan to `out`.
pub fn handle_route_command<W: Write>(
    engine: &RoutingEngine,
    args: &RouteCommandArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let plan = engine.plan(&args.to_request()).with_context(|| {
        format!(
            "failed to compute {} route from {} to {}",
            args.algorithm, args.from, args.to
        )
    })?;
    tracing::debug!(hops = plan.hop_count(), "rendering route");
    render_plan(out, &plan, format)
}
