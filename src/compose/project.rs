//! Compose project directory
//!
//! The directory is passed to every spawned command rather than made the
//! process working directory, so several projects can be driven from one
//! process.

use crate::error::{DockerizerError, Result};
use std::path::{Path, PathBuf};

/// Default compose file names, in lookup order
pub const DEFAULT_COMPOSE_FILES: &[&str] = &[
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

/// A validated project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDir {
    path: PathBuf,
}

impl ProjectDir {
    /// Resolve and validate a project directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resolved = path
            .canonicalize()
            .map_err(|source| DockerizerError::DirectoryChange {
                path: path.to_path_buf(),
                source,
            })?;

        if !resolved.is_dir() {
            return Err(DockerizerError::NotADirectory(resolved));
        }

        Ok(Self { path: resolved })
    }

    /// Absolute path of the directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Find the compose file the tool will pick up, if any
    pub fn compose_file(&self) -> Option<PathBuf> {
        find_compose_file(&self.path)
    }
}

/// Find compose file in directory
pub fn find_compose_file(dir: &Path) -> Option<PathBuf> {
    DEFAULT_COMPOSE_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
