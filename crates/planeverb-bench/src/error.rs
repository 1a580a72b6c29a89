use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing benchmark baselines.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to access baseline {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("baseline {path} JSON error: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
