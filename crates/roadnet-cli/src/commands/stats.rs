//! Stats command handler reporting the size of the loaded network.

use std::io::Write;

use anyhow::Result;
use roadnet_lib::RoutingEngine;

use crate::output::{render_stats, OutputFormat};

/// Handle the stats subcommand.
pub fn handle_stats_command<W: Write>(
    engine: &RoutingEngine,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    render_stats(out, engine.graph(), engine.heuristics(), format)
}
