//! Result Collection Errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while collecting benchmark results
///
/// Every variant is fatal: a partially collected table is never rendered.
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("failed to walk results folder: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bench estimate '{}' is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bench estimate '{}' does not contain a float 'mean.point_estimate'", path.display())]
    MissingEstimate { path: PathBuf },

    #[error("'{}' parameter part is not an integer", path.display())]
    NonIntegerParameter { path: PathBuf },

    #[error("bench '{name}' with param '{param}' seen twice")]
    DuplicateMeasurement { name: String, param: u64 },
}

impl ResultsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResultsError::Io {
            path: path.into(),
            source,
        }
    }
}
