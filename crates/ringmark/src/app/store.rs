//! Bookmark persistence and set mutation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::domain::errors::StoreError;
use crate::domain::model::{Bookmark, Position};

/// Outcome of [`Bookmarks::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// The bookmark set in storage order.
///
/// Storage order carries no meaning; navigation derives its own order. The set never holds two
/// entries with the same `(file, line, character)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bookmarks {
    items: Vec<Bookmark>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Bookmark] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.items.get(index)
    }

    /// Index of the bookmark sitting exactly at `position`.
    pub fn position_of(&self, position: &Position) -> Option<usize> {
        self.items.iter().position(|item| item.is_at(position))
    }

    /// Append a bookmark at `position` unless one already exists there. Returns `true` when the set
    /// changed.
    pub fn add(&mut self, position: Position) -> bool {
        self.insert(Bookmark::from(position))
    }

    fn insert(&mut self, bookmark: Bookmark) -> bool {
        if self.items.contains(&bookmark) {
            return false;
        }
        self.items.push(bookmark);
        true
    }

    /// Remove and return the bookmark at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds. Indices must come from a listing of this same set.
    pub fn remove(&mut self, index: usize) -> Bookmark {
        self.items.remove(index)
    }

    /// Remove the bookmark at `position` if present, otherwise add one.
    pub fn toggle(&mut self, position: Position) -> Toggled {
        match self.position_of(&position) {
            Some(index) => {
                self.items.remove(index);
                Toggled::Removed
            }
            None => {
                self.items.push(Bookmark::from(position));
                Toggled::Added
            }
        }
    }
}

/// Collapses repeated entries, keeping the first occurrence in storage order.
impl From<Vec<Bookmark>> for Bookmarks {
    fn from(items: Vec<Bookmark>) -> Self {
        let mut bookmarks = Self::new();
        for item in items {
            bookmarks.insert(item);
        }
        bookmarks
    }
}

impl IntoIterator for Bookmarks {
    type Item = Bookmark;
    type IntoIter = std::vec::IntoIter<Bookmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Reads and writes the bookmark file of a single workspace.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    path: PathBuf,
}

impl BookmarkStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for `root`, placing the file at `root/<directory>/<file>`.
    pub fn for_workspace(root: &Path, directory: &str, file: &str) -> Self {
        Self::new(root.join(directory).join(file))
    }

    /// Location of the persisted bookmark file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted set. A missing or unreadable file yields an empty set.
    pub fn load(&self) -> Bookmarks {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no bookmark file yet");
                return Bookmarks::new();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read bookmarks");
                return Bookmarks::new();
            }
        };

        match serde_json::from_str::<Vec<Bookmark>>(&data) {
            Ok(items) => {
                let found = items.len();
                let bookmarks = Bookmarks::from(items);
                if bookmarks.len() < found {
                    tracing::debug!(
                        path = %self.path.display(),
                        dropped = found - bookmarks.len(),
                        "collapsed duplicate bookmarks"
                    );
                }
                bookmarks
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring malformed bookmark file");
                Bookmarks::new()
            }
        }
    }

    /// Replace the persisted set with `bookmarks`.
    ///
    /// The file is written to a temporary sibling and renamed into place, so readers see either the
    /// old or the new contents.
    pub fn save(&self, bookmarks: &Bookmarks) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut data = serde_json::to_string_pretty(bookmarks)?;
        data.push('\n');

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(data.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|err| write_err(err.error))?;

        tracing::debug!(path = %self.path.display(), count = bookmarks.len(), "saved bookmarks");
        Ok(())
    }

    /// Persist an empty set and return it.
    pub fn clear(&self) -> Result<Bookmarks, StoreError> {
        let empty = Bookmarks::new();
        self.save(&empty)?;
        Ok(empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> BookmarkStore {
        BookmarkStore::for_workspace(dir, ".vscode", "bookmarks.json")
    }

    #[test]
    fn load_returns_empty_when_file_missing() {
        let temp = tempfile::tempdir().unwrap();
        assert!(store_in(temp.path()).load().is_empty());
    }

    #[test]
    fn load_returns_empty_when_file_malformed() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_empty());

        fs::write(store.path(), r#"[{ "file": "/a.rs", "line": -1 }]"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_preserves_storage_order_and_accepts_compact_json() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"[{"file":"/b.rs","line":2,"character":1},{"file":"/a.rs","line":0,"extra":true}]"#,
        )
        .unwrap();

        let loaded = store.load();
        assert_eq!(
            loaded.items(),
            &[Bookmark::new("/b.rs", 2, 1), Bookmark::new("/a.rs", 0, 0)]
        );
    }

    #[test]
    fn load_collapses_duplicate_entries() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"[
  { "file": "/A", "line": 1 },
  { "file": "/B", "line": 0, "character": 0 },
  { "file": "/A", "line": 1, "character": 0 },
  { "file": "/B", "line": 0, "character": 0 }
]"#,
        )
        .unwrap();

        let loaded = store.load();
        assert_eq!(
            loaded.items(),
            &[Bookmark::new("/A", 1, 0), Bookmark::new("/B", 0, 0)]
        );
    }

    #[test]
    fn toggle_after_legacy_duplicate_really_removes() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"[{"file":"/A","line":1},{"file":"/A","line":1,"character":0}]"#,
        )
        .unwrap();

        let mut bookmarks = store.load();
        assert_eq!(bookmarks.toggle(Position::new("/A", 1, 0)), Toggled::Removed);
        assert!(bookmarks.position_of(&Position::new("/A", 1, 0)).is_none());
        assert!(bookmarks.is_empty());
    }

    #[test]
    fn from_vec_keeps_first_occurrence_order() {
        let bookmarks = Bookmarks::from(vec![
            Bookmark::new("/b.rs", 2, 0),
            Bookmark::new("/a.rs", 1, 0),
            Bookmark::new("/b.rs", 2, 0),
        ]);
        assert_eq!(
            bookmarks.items(),
            &[Bookmark::new("/b.rs", 2, 0), Bookmark::new("/a.rs", 1, 0)]
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        let bookmarks = Bookmarks::from(vec![
            Bookmark::new("/z.rs", 9, 3),
            Bookmark::new("/a.rs", 1, 0),
        ]);

        store.save(&bookmarks).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load(), bookmarks);
    }

    #[test]
    fn save_reports_unwritable_location() {
        let temp = tempfile::tempdir().unwrap();
        // A regular file where the bookmark directory should go.
        fs::write(temp.path().join(".vscode"), "occupied").unwrap();
        let store = store_in(temp.path());

        let result = store.save(&Bookmarks::from(vec![Bookmark::new("/a.rs", 0, 0)]));
        assert!(matches!(result, Err(StoreError::CreateDir { .. })));
        assert!(store.load().is_empty());
    }

    #[test]
    fn clear_persists_empty_set() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store
            .save(&Bookmarks::from(vec![Bookmark::new("/a.rs", 0, 0)]))
            .unwrap();

        let cleared = store.clear().unwrap();
        assert!(cleared.is_empty());
        assert!(store.load().is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap().trim(), "[]");
    }

    #[test]
    fn add_ignores_duplicate_positions() {
        let mut bookmarks = Bookmarks::new();
        assert!(bookmarks.add(Position::new("/a.rs", 1, 0)));
        assert!(bookmarks.add(Position::new("/a.rs", 1, 1)));
        assert!(!bookmarks.add(Position::new("/a.rs", 1, 0)));
        assert_eq!(bookmarks.len(), 2);
    }

    #[test]
    fn toggle_twice_restores_original_set() {
        let mut bookmarks = Bookmarks::from(vec![Bookmark::new("/b.rs", 0, 0)]);
        let original = bookmarks.clone();

        assert_eq!(
            bookmarks.toggle(Position::new("/a.rs", 1, 0)),
            Toggled::Added
        );
        assert_eq!(bookmarks.len(), 2);
        assert_eq!(
            bookmarks.toggle(Position::new("/a.rs", 1, 0)),
            Toggled::Removed
        );
        assert_eq!(bookmarks, original);
    }

    #[test]
    fn toggle_removes_existing_bookmark() {
        let mut bookmarks = Bookmarks::from(vec![
            Bookmark::new("/a.rs", 1, 0),
            Bookmark::new("/a.rs", 5, 0),
        ]);
        assert_eq!(
            bookmarks.toggle(Position::new("/a.rs", 1, 0)),
            Toggled::Removed
        );
        assert_eq!(bookmarks.items(), &[Bookmark::new("/a.rs", 5, 0)]);
    }

    #[test]
    fn remove_returns_entry_at_index() {
        let mut bookmarks = Bookmarks::from(vec![
            Bookmark::new("/a.rs", 1, 0),
            Bookmark::new("/b.rs", 2, 0),
        ]);
        assert_eq!(bookmarks.remove(1), Bookmark::new("/b.rs", 2, 0));
        assert_eq!(bookmarks.len(), 1);
    }

    #[test]
    #[should_panic]
    fn remove_out_of_bounds_panics() {
        Bookmarks::new().remove(0);
    }
}
