//! Flatten a source tree into one delimited text artifact.
//!
//! The pipeline walks a root directory, keeps files whose extension is
//! allowed, and writes each one between START/END markers in sorted path
//! order. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (selection rules, block framing).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (traversal, decoding, writing,
//!   prompting).
//!
//! [`run`] coordinates the two into a single flattening pass; [`config`]
//! holds the exclusion rules passed explicitly through it.

pub mod config;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
