//! User-facing bookmark commands.
//!
//! Every command loads the set fresh, applies one mutation or navigation step, and saves when the
//! set changed. Editor state comes in through [`CursorProvider`] and [`Picker`].

use anyhow::Result;

use crate::app::navigator;
use crate::app::store::{BookmarkStore, Bookmarks, Toggled};
use crate::domain::errors::{DomainError, StoreError};
use crate::domain::model::{Bookmark, Position};
use crate::infra::config::Config;

/// Source of the current cursor position and target of jumps.
pub trait CursorProvider {
    /// The current position, or `None` when no document is active.
    fn position(&self) -> Option<Position>;

    /// Move the cursor to `bookmark`.
    fn jump_to(&mut self, bookmark: &Bookmark) -> Result<()>;
}

/// Lets the user choose one entry from a list.
pub trait Picker {
    /// Returns the chosen index, or `None` when the user cancels.
    fn pick(&mut self, items: &[PickItem]) -> Result<Option<usize>>;
}

/// One row in a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// Message for the host to display after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            text: text.into(),
        }
    }

    fn save_failed(err: &StoreError) -> Self {
        Self {
            level: StatusLevel::Error,
            text: format!("Failed to save bookmarks: {}", error_chain(err)),
        }
    }
}

/// Runs bookmark commands against one workspace store.
#[derive(Debug, Clone)]
pub struct BookmarkCommands {
    store: BookmarkStore,
    full_path: bool,
}

impl BookmarkCommands {
    pub fn new(store: BookmarkStore) -> Self {
        Self {
            store,
            full_path: true,
        }
    }

    /// Build commands for `root` using the configured store location and display settings.
    pub fn from_config(root: &std::path::Path, config: &Config) -> Self {
        let store =
            BookmarkStore::for_workspace(root, config.store.directory(), config.store.file());
        Self {
            store,
            full_path: config.display.full_path(),
        }
    }

    pub fn store(&self) -> &BookmarkStore {
        &self.store
    }

    /// Bookmark the current position. Adding an existing bookmark is a silent no-op.
    pub fn add(&self, cursor: &dyn CursorProvider) -> Option<Status> {
        let position = cursor.position()?;
        let mut bookmarks = self.store.load();
        if !bookmarks.add(position) {
            return None;
        }
        Some(self.persist(&bookmarks, "Bookmark saved."))
    }

    /// Let the user pick a bookmark and jump to it.
    pub fn goto(
        &self,
        picker: &mut dyn Picker,
        cursor: &mut dyn CursorProvider,
    ) -> Result<Option<Status>> {
        let bookmarks = self.store.load();
        if bookmarks.is_empty() {
            return Ok(Some(Status::info("No bookmarks found.")));
        }

        let Some(index) = self.pick(picker, &bookmarks)? else {
            return Ok(None);
        };
        let target = &bookmarks.items()[index];
        cursor.jump_to(target)?;
        Ok(None)
    }

    /// Let the user pick a bookmark and delete it.
    pub fn delete(&self, picker: &mut dyn Picker) -> Result<Option<Status>> {
        let mut bookmarks = self.store.load();
        if bookmarks.is_empty() {
            return Ok(Some(Status::info("No bookmarks to delete.")));
        }

        let Some(index) = self.pick(picker, &bookmarks)? else {
            return Ok(None);
        };
        let removed = bookmarks.remove(index);
        tracing::debug!(bookmark = %removed, "deleting bookmark");
        Ok(Some(self.persist(&bookmarks, "Bookmark deleted.")))
    }

    /// Remove every bookmark in the workspace.
    pub fn delete_all(&self) -> Status {
        match self.store.clear() {
            Ok(_) => Status::success("All bookmarks deleted."),
            Err(err) => {
                tracing::error!(path = %self.store.path().display(), error = %error_chain(&err), "failed to save bookmarks");
                Status::save_failed(&err)
            }
        }
    }

    /// Jump to the next bookmark in navigation order.
    pub fn next(&self, cursor: &mut dyn CursorProvider) -> Result<Option<Status>> {
        self.step(cursor, navigator::next)
    }

    /// Jump to the previous bookmark in navigation order.
    pub fn previous(&self, cursor: &mut dyn CursorProvider) -> Result<Option<Status>> {
        self.step(cursor, navigator::previous)
    }

    /// Add a bookmark at the current position, or remove the one already there.
    pub fn toggle(&self, cursor: &dyn CursorProvider) -> Option<Status> {
        let position = cursor.position()?;
        let mut bookmarks = self.store.load();
        let message = match bookmarks.toggle(position) {
            Toggled::Added => "Bookmark added.",
            Toggled::Removed => "Bookmark removed.",
        };
        Some(self.persist(&bookmarks, message))
    }

    /// All bookmarks in navigation order.
    pub fn list(&self) -> Vec<Bookmark> {
        navigator::sort(self.store.load().items())
    }

    /// Picker rows for `bookmarks`, in storage order.
    pub fn pick_items(&self, bookmarks: &Bookmarks) -> Vec<PickItem> {
        bookmarks
            .items()
            .iter()
            .map(|bookmark| PickItem {
                label: bookmark.file_name().to_owned(),
                description: if self.full_path {
                    format!("{} - line {}", bookmark.file, bookmark.line + 1)
                } else {
                    format!("line {}", bookmark.line + 1)
                },
            })
            .collect()
    }

    fn pick(&self, picker: &mut dyn Picker, bookmarks: &Bookmarks) -> Result<Option<usize>> {
        let items = self.pick_items(bookmarks);
        match picker.pick(&items)? {
            Some(index) if index >= bookmarks.len() => Err(DomainError::IndexOutOfRange {
                index,
                len: bookmarks.len(),
            }
            .into()),
            other => Ok(other),
        }
    }

    fn step(
        &self,
        cursor: &mut dyn CursorProvider,
        direction: fn(&[Bookmark], &Position) -> Option<Bookmark>,
    ) -> Result<Option<Status>> {
        let bookmarks = self.store.load();
        if bookmarks.is_empty() {
            return Ok(Some(Status::info("No bookmarks found.")));
        }

        let Some(position) = cursor.position() else {
            return Ok(None);
        };
        if let Some(target) = direction(bookmarks.items(), &position) {
            cursor.jump_to(&target)?;
        }
        Ok(None)
    }

    fn persist(&self, bookmarks: &Bookmarks, message: &str) -> Status {
        match self.store.save(bookmarks) {
            Ok(()) => Status::success(message),
            Err(err) => {
                tracing::error!(path = %self.store.path().display(), error = %error_chain(&err), "failed to save bookmarks");
                Status::save_failed(&err)
            }
        }
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
