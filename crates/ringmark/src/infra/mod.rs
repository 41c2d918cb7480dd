//! Infrastructure adapters for config, logging, workspace discovery, and terminal input.

pub mod config;
pub mod logging;
pub mod picker;
pub mod workspace;
