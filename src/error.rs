//! Error types for Dockerizer

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Dockerizer operations
pub type Result<T> = std::result::Result<T, DockerizerError>;

/// Dockerizer error types
///
/// A compose command that runs but exits non-zero is not an error; it is
/// reported through `ExecutionResult::succeeded`.
#[derive(Error, Debug)]
pub enum DockerizerError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot use directory {}: {source}", .path.display())]
    DirectoryChange {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
