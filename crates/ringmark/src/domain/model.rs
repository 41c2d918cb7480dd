//! Domain models for bookmarks and cursor positions.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A saved `(file, line, character)` location inside the workspace.
///
/// Field order matters: the derived [`Ord`] compares `file`, then `line`, then `character`, which is
/// the navigation order. Equality over all three fields is the deduplication rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bookmark {
    pub file: String,
    pub line: u32,
    /// Entries written before the column was tracked read as column zero.
    #[serde(default)]
    pub character: u32,
}

impl Bookmark {
    pub fn new(file: impl Into<String>, line: u32, character: u32) -> Self {
        Self {
            file: file.into(),
            line,
            character,
        }
    }

    /// Whether the cursor sits exactly on this bookmark.
    pub fn is_at(&self, position: &Position) -> bool {
        self.key() == position.key()
    }

    /// Compare this bookmark against a cursor position using the navigation order.
    pub fn cmp_position(&self, position: &Position) -> Ordering {
        self.key().cmp(&position.key())
    }

    /// Base name of the bookmarked file, falling back to the full path.
    pub fn file_name(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }

    fn key(&self) -> (&str, u32, u32) {
        (&self.file, self.line, self.character)
    }
}

impl From<Position> for Bookmark {
    fn from(position: Position) -> Self {
        Self {
            file: position.file,
            line: position.line,
            character: position.character,
        }
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.character)
    }
}

/// Current cursor location reported by the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: String,
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(file: impl Into<String>, line: u32, character: u32) -> Self {
        Self {
            file: file.into(),
            line,
            character,
        }
    }

    fn key(&self) -> (&str, u32, u32) {
        (&self.file, self.line, self.character)
    }
}
