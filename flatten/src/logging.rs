//! Development-time tracing for debugging the flattener.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics via `RUST_LOG`, output to stderr.
//!   Never written into the artifact.
//!
//! - **Progress (`main`)**: Banner, running counts and summary on stdout.
//!   Always shown, unaffected by `RUST_LOG`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG`; invalid directives are ignored and the level defaults to
/// `warn`, so skipped directories and unreadable files still surface.
///
/// # Example
/// ```bash
/// RUST_LOG=flatten=debug flatten --yes
/// ```
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .compact(),
        )
        .init();
}
