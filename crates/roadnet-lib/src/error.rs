use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the roadnet library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Edge or heuristic input violated a structural rule. The store being
    /// built is discarded.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// A heuristic lookup named a destination slot the table does not have.
    #[error("unknown destination index {index} (table has {available} destinations)")]
    UnknownDestination { index: usize, available: usize },

    /// A node reached during A* has no heuristic row.
    #[error("no heuristic entry for node {node}")]
    MissingHeuristic { node: NodeId },

    /// A* was asked to route toward a node outside the designated set.
    #[error("A* cannot route to node {node}{}", format_destinations(.supported))]
    UnsupportedDestination { node: NodeId, supported: Vec<NodeId> },

    /// A* was requested but no heuristic table was attached to the engine.
    #[error("A* requires a heuristic table but none was loaded")]
    HeuristicsUnavailable,

    /// The frontier ran dry before the destination was settled.
    #[error("no path found between {start} and {goal}")]
    NoPathFound { start: NodeId, goal: NodeId },

    /// The search hit the caller's expansion cap.
    #[error("search aborted after {limit} expansions")]
    SearchAborted { limit: usize },

    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset")]
    ProjectDirsUnavailable,

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedInput {
            message: message.into(),
        }
    }
}

fn format_destinations(supported: &[NodeId]) -> String {
    if supported.is_empty() {
        String::new()
    } else if supported.len() == 1 {
        format!("; the only supported destination is {}", supported[0])
    } else {
        format!(
            "; supported destinations: {}",
            supported
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
