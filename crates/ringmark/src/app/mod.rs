//! Application layer: bookmark store, ring navigation, and the user commands built on them.

pub mod commands;
pub mod navigator;
pub mod store;
