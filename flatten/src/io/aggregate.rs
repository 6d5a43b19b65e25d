//! Serializing selected files into the aggregate artifact stream.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::render::{render_block, render_header};
use crate::io::reader::{ReadFailure, read_text};
use crate::io::walker::FileCandidate;

/// A running count is reported after every this many processed files.
pub const PROGRESS_INTERVAL: usize = 10;

/// Observability callbacks; never affect the artifact bytes.
#[derive(Debug)]
pub enum WriteEvent<'a> {
    Progress {
        processed: usize,
    },
    Skipped {
        relative_path: &'a str,
        failure: &'a ReadFailure,
    },
}

/// Whether the writer reached the end of the file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Completed,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteStats {
    pub processed: usize,
    pub skipped: usize,
    pub status: WriteStatus,
}

/// Write the header and one framed block per file, in the given order.
///
/// Files that cannot be read still get a block carrying sentinel content and
/// are counted as skipped. Only failures writing to `out` are returned as
/// errors. `interrupt` is polled between files.
pub fn write_aggregate<W: Write>(
    out: &mut W,
    files: &[FileCandidate],
    interrupt: &AtomicBool,
    mut on_event: impl FnMut(WriteEvent<'_>),
) -> Result<WriteStats> {
    out.write_all(render_header().as_bytes())
        .context("write artifact header")?;

    let mut stats = WriteStats {
        processed: 0,
        skipped: 0,
        status: WriteStatus::Completed,
    };

    for file in files {
        if interrupt.load(Ordering::Relaxed) {
            debug!(
                processed = stats.processed,
                skipped = stats.skipped,
                "interrupt observed; stopping"
            );
            stats.status = WriteStatus::Interrupted;
            break;
        }

        match read_text(&file.absolute_path) {
            Ok(decoded) => {
                write_block(out, &file.relative_path, &decoded.content)?;
                stats.processed += 1;
                if stats.processed % PROGRESS_INTERVAL == 0 {
                    on_event(WriteEvent::Progress {
                        processed: stats.processed,
                    });
                }
            }
            Err(failure) => {
                warn!(path = %file.relative_path, error = %failure, "writing sentinel block");
                write_block(out, &file.relative_path, &failure.sentinel())?;
                stats.skipped += 1;
                on_event(WriteEvent::Skipped {
                    relative_path: &file.relative_path,
                    failure: &failure,
                });
            }
        }
    }

    out.flush().context("flush artifact")?;
    Ok(stats)
}

fn write_block<W: Write>(out: &mut W, relative_path: &str, content: &str) -> Result<()> {
    out.write_all(render_block(relative_path, content).as_bytes())
        .with_context(|| format!("write block for {relative_path}"))
}
