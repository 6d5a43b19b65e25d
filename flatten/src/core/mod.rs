//! Deterministic, pure logic shared by the flattener.
//!
//! Core modules must be free of I/O side effects. They operate on paths and
//! strings in memory and return deterministic outputs suitable for tests.

pub mod render;
pub mod selector;
