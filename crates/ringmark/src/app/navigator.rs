//! Ring navigation over the bookmark set.
//!
//! Navigation order is [`Bookmark`]'s [`Ord`]: file path, then line, then character. When the cursor
//! sits exactly on a bookmark, `next`/`previous` step to its neighbour and wrap around the ends.
//! Anywhere else they jump to the nearest bookmark in that direction, again wrapping when nothing
//! lies beyond the cursor.

use std::cmp::Ordering;

use crate::domain::model::{Bookmark, Position};

/// Return the bookmarks in navigation order. The input is left untouched.
///
/// Identical entries appear once, so stepping from an exact match always leaves that position.
pub fn sort(bookmarks: &[Bookmark]) -> Vec<Bookmark> {
    let mut sorted = bookmarks.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
}

/// Bookmark to visit after `position`. `None` only when `bookmarks` is empty.
pub fn next(bookmarks: &[Bookmark], position: &Position) -> Option<Bookmark> {
    let sorted = sort(bookmarks);
    let index = next_index(&sorted, position)?;
    sorted.into_iter().nth(index)
}

/// Bookmark to visit before `position`. `None` only when `bookmarks` is empty.
pub fn previous(bookmarks: &[Bookmark], position: &Position) -> Option<Bookmark> {
    let sorted = sort(bookmarks);
    let index = previous_index(&sorted, position)?;
    sorted.into_iter().nth(index)
}

fn next_index(sorted: &[Bookmark], position: &Position) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }

    if let Some(index) = sorted.iter().position(|item| item.is_at(position)) {
        return Some((index + 1) % sorted.len());
    }

    let after = sorted
        .iter()
        .position(|item| item.cmp_position(position) == Ordering::Greater);
    Some(after.unwrap_or(0))
}

fn previous_index(sorted: &[Bookmark], position: &Position) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }

    let len = sorted.len();
    if let Some(index) = sorted.iter().position(|item| item.is_at(position)) {
        return Some((index + len - 1) % len);
    }

    let before = sorted
        .iter()
        .rposition(|item| item.cmp_position(position) == Ordering::Less);
    Some(before.unwrap_or(len - 1))
}
