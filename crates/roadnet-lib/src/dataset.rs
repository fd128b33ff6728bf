use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename of the edge list.
pub const EDGES_FILENAME: &str = "edges.csv";

/// Default filename of the heuristic table.
pub const HEURISTICS_FILENAME: &str = "heuristic.csv";

/// Environment variable overriding the dataset directory.
pub const DATA_DIR_ENV: &str = "ROADNET_DATA_DIR";

/// Paths to dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// Path to the edge CSV file.
    pub edges: PathBuf,
    /// Path to the heuristic CSV file, if it exists.
    pub heuristics: Option<PathBuf>,
}

impl DatasetPaths {
    /// Paths for the default file names inside `dir`. The heuristic file is
    /// only recorded when it exists.
    pub fn in_dir(dir: &Path) -> Self {
        let heuristics = dir.join(HEURISTICS_FILENAME);
        Self {
            edges: dir.join(EDGES_FILENAME),
            heuristics: heuristics.exists().then_some(heuristics),
        }
    }
}

/// Resolve the default dataset directory using platform-specific project
/// directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "roadnet", "roadnet").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Locate the dataset.
///
/// Resolution order: the explicit `data_dir`, then `ROADNET_DATA_DIR`,
/// then the platform data directory. The edge file must exist.
pub fn resolve_dataset(data_dir: Option<&Path>) -> Result<DatasetPaths> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => match env::var_os(DATA_DIR_ENV) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => default_data_dir()?,
        },
    };

    let paths = DatasetPaths::in_dir(&dir);
    if !paths.edges.exists() {
        return Err(Error::DatasetNotFound { path: paths.edges });
    }

    debug!(
        edges = %paths.edges.display(),
        heuristics = ?paths.heuristics,
        "resolved dataset"
    );
    Ok(paths)
}
