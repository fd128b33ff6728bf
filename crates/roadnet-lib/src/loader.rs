//! CSV loaders for the edge list and the heuristic table.
//!
//! Edge files carry the columns `start`, `end`, `distance` and
//! `speed limit`. Heuristic files carry a `node` column followed by one
//! column per designated destination, each named by the destination's node
//! id.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::dataset::DatasetPaths;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, GraphBuildOptions, NodeId};
use crate::heuristic::HeuristicTable;

/// Graph plus the optional heuristic table loaded alongside it.
#[derive(Debug, Clone)]
pub struct Network {
    pub graph: Graph,
    pub heuristics: Option<HeuristicTable>,
}

/// Load the edge file and, when present, the heuristic file.
pub fn load_network(paths: &DatasetPaths, options: &GraphBuildOptions) -> Result<Network> {
    let graph = load_graph(&paths.edges, options)?;
    let heuristics = match &paths.heuristics {
        Some(path) => Some(load_heuristics(path)?),
        None => None,
    };

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        heuristic_rows = heuristics.as_ref().map_or(0, HeuristicTable::len),
        "road network loaded"
    );

    Ok(Network { graph, heuristics })
}

/// Load and validate a graph from an edge CSV file.
pub fn load_graph(path: &Path, options: &GraphBuildOptions) -> Result<Graph> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), "loading edges");
    let file = fs::File::open(path)?;
    Graph::from_edges(read_edges(file)?, options)
}

/// Parse edge records from any reader.
pub fn read_edges<R: Read>(reader: R) -> Result<Vec<Edge>> {
    let mut csv_reader = build_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let start_col = find_column(&headers, &["start", "from", "source"])?;
    let end_col = find_column(&headers, &["end", "to", "target"])?;
    let distance_col = find_column(&headers, &["distance"])?;
    let speed_col = find_column(&headers, &["speed limit", "speed_limit", "speedlimit"])?;

    let mut edges = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        check_width(&record, &headers)?;
        edges.push(Edge {
            source: parse_field(&record, start_col, "start")?,
            target: parse_field(&record, end_col, "end")?,
            distance: parse_field(&record, distance_col, "distance")?,
            speed_limit: parse_field(&record, speed_col, "speed limit")?,
        });
    }
    Ok(edges)
}

/// Load a heuristic table from a CSV file.
pub fn load_heuristics(path: &Path) -> Result<HeuristicTable> {
    debug!(path = %path.display(), "loading heuristics");
    let file = fs::File::open(path)?;
    read_heuristics(file)
}

/// Parse a heuristic table from any reader. Destinations are taken from
/// the header, in column order.
pub fn read_heuristics<R: Read>(reader: R) -> Result<HeuristicTable> {
    let mut csv_reader = build_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let node_col = find_column(&headers, &["node"])?;

    let mut destination_cols = Vec::new();
    let mut destinations = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if index == node_col {
            continue;
        }
        let id = header.parse::<NodeId>().map_err(|_| {
            Error::malformed(format!(
                "heuristic column '{header}' is not a destination node id"
            ))
        })?;
        destination_cols.push((index, header.to_string()));
        destinations.push(id);
    }

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        check_width(&record, &headers)?;
        let node: NodeId = parse_field(&record, node_col, "node")?;
        let values = destination_cols
            .iter()
            .map(|(col, column)| parse_field::<f64>(&record, *col, column))
            .collect::<Result<Vec<_>>>()?;
        rows.push((node, values));
    }

    HeuristicTable::new(destinations, rows)
}

// Ragged rows are reported by `check_width` instead of the csv crate.
fn build_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn check_width(record: &StringRecord, headers: &StringRecord) -> Result<()> {
    if record.len() == headers.len() {
        return Ok(());
    }
    let line = record.position().map_or(0, |pos| pos.line());
    Err(Error::malformed(format!(
        "line {line}: expected {} fields, found {}",
        headers.len(),
        record.len()
    )))
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Result<usize> {
    let normalize = |s: &str| s.trim().to_ascii_lowercase();
    headers
        .iter()
        .position(|header| names.iter().any(|name| normalize(header) == *name))
        .ok_or_else(|| {
            Error::malformed(format!(
                "missing required column '{}'. Available: {}",
                names[0],
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
}

fn parse_field<T: FromStr>(record: &StringRecord, index: usize, column: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let line = record.position().map_or(0, |pos| pos.line());
    let raw = record.get(index).ok_or_else(|| {
        Error::malformed(format!("line {line}: missing value for '{column}'"))
    })?;
    raw.parse::<T>().map_err(|err| {
        Error::malformed(format!(
            "line {line}: invalid {column} value '{raw}': {err}"
        ))
    })
}
