//! Domain-specific errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No workspace folder open.")]
    NoWorkspace,
    #[error("Workspace path {} is not a directory.", path.display())]
    WorkspaceNotADirectory { path: PathBuf },
    #[error("bookmark index {index} out of range for {len} bookmarks")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failure to persist the bookmark set.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create bookmark directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize bookmarks")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write bookmarks to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
