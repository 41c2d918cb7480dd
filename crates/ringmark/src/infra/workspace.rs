//! Workspace root resolution.

use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;

/// Resolve the workspace root for a command.
///
/// An explicit root wins. Otherwise the git work tree enclosing `cwd` is used.
pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf, DomainError> {
    if let Some(root) = explicit {
        if root.is_dir() {
            return Ok(root.to_path_buf());
        }
        return Err(DomainError::WorkspaceNotADirectory {
            path: root.to_path_buf(),
        });
    }

    match discover_work_tree(cwd) {
        Some(root) => {
            tracing::debug!(root = %root.display(), "discovered workspace from git");
            Ok(root)
        }
        None => Err(DomainError::NoWorkspace),
    }
}

/// Locate the work tree of the git repository containing `path`, if any.
pub fn discover_work_tree(path: &Path) -> Option<PathBuf> {
    let repo = gix::discover(path).ok()?;
    repo.work_dir().map(Path::to_path_buf)
}
