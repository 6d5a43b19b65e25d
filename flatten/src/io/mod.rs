//! I/O helpers for the flattening pipeline.

pub mod aggregate;
pub mod config;
pub mod prompt;
pub mod reader;
pub mod walker;
