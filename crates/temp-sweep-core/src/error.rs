use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("metadata unavailable for {path}: {source}")]
    MetricsUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Audit log error: {0}")]
    Json(#[from] serde_json::Error),
}
