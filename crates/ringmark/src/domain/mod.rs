//! Core types shared by the store, navigator, and command layer.

pub mod errors;
pub mod model;
