//! Output formatting for route plans and network statistics.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use roadnet_lib::{Graph, HeuristicTable, RoutePlan};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary lines.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Render a route plan.
pub fn render_plan<W: Write>(out: &mut W, plan: &RoutePlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, plan)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "Route from {} to {} (algorithm: {}):",
                plan.start, plan.goal, plan.algorithm
            )?;
            writeln!(out, "The number of path nodes: {}", plan.steps.len())?;
            writeln!(out, "Total distance of path: {:.3}", plan.total_cost)?;
            writeln!(out, "The number of visited nodes: {}", plan.visited)?;
            writeln!(
                out,
                "Estimated travel time: {:.1} s",
                plan.travel_time_secs
            )?;
        }
    }
    Ok(())
}

/// Render the size of the loaded network.
pub fn render_stats<W: Write>(
    out: &mut W,
    graph: &Graph,
    heuristics: Option<&HeuristicTable>,
    format: OutputFormat,
) -> Result<()> {
    let destinations = heuristics.map(|table| table.destinations().to_vec());
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "nodes": graph.node_count(),
                "edges": graph.edge_count(),
                "heuristic_rows": heuristics.map_or(0, HeuristicTable::len),
                "destinations": destinations.unwrap_or_default(),
            });
            serde_json::to_writer_pretty(&mut *out, &value)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Nodes: {}", graph.node_count())?;
            writeln!(out, "Edges: {}", graph.edge_count())?;
            match destinations {
                Some(ids) => writeln!(
                    out,
                    "Heuristic destinations: {}",
                    ids.iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )?,
                None => writeln!(out, "Heuristic destinations: none loaded")?,
            }
        }
    }
    Ok(())
}
