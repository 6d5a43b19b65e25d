//! Stable exit codes for the `flatten` binary.

/// Artifact written, or the overwrite prompt was declined.
pub const OK: i32 = 0;
/// Unexpected error (bad config, unwritable destination, ...).
pub const FAILED: i32 = 1;
/// Cancelled by Ctrl+C; any prior artifact is left untouched.
///
/// Follows the shell convention of `128 + SIGINT` so scripts can tell a
/// cancelled run from a completed one. `Operation cancelled by user.` is
/// still printed and no error is reported.
pub const INTERRUPTED: i32 = 130;
