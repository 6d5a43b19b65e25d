//! Orchestration for a single flattening run: walk, select, sort, write.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::FlattenConfig;
use crate::core::selector::is_selected;
use crate::io::aggregate::{WriteEvent, WriteStatus, write_aggregate};
use crate::io::walker::{FileCandidate, walk};

/// Canonical paths for a run rooted at `root`.
#[derive(Debug, Clone)]
pub struct FlattenPaths {
    pub root: PathBuf,
    pub output_path: PathBuf,
    /// Artifact is staged here and renamed over `output_path` on success.
    pub temp_path: PathBuf,
}

impl FlattenPaths {
    pub fn new(root: impl Into<PathBuf>, config: &FlattenConfig) -> Self {
        let root = root.into();
        Self {
            output_path: root.join(&config.output_file),
            temp_path: root.join(format!("{}.tmp", config.output_file)),
            root,
        }
    }

    /// True for the artifact and its staging file, which must never be
    /// ingested as input.
    pub fn is_own_output(&self, path: &Path) -> bool {
        path == self.output_path || path == self.temp_path
    }
}

/// Totals for a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenSummary {
    pub found: usize,
    pub processed: usize,
    pub skipped: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlattenOutcome {
    Completed(FlattenSummary),
    /// Stopped by an interrupt; any prior artifact is left untouched.
    Interrupted,
}

/// Walk the root and return the selected files sorted by relative path.
pub fn collect_files(paths: &FlattenPaths, config: &FlattenConfig) -> Vec<FileCandidate> {
    let mut files: Vec<FileCandidate> = walk(&paths.root, config)
        .into_iter()
        .filter(|candidate| !paths.is_own_output(&candidate.absolute_path))
        .filter(|candidate| is_selected(&candidate.absolute_path, config))
        .collect();
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    debug!(count = files.len(), "files selected");
    files
}

/// Write `files` to the artifact, replacing it only if the run completes.
pub fn write_artifact(
    paths: &FlattenPaths,
    files: &[FileCandidate],
    interrupt: &AtomicBool,
    on_event: impl FnMut(WriteEvent<'_>),
) -> Result<FlattenOutcome> {
    let result = write_staged(paths, files, interrupt, on_event);
    match result {
        Ok(FlattenOutcome::Completed(summary)) => {
            fs::rename(&paths.temp_path, &paths.output_path).with_context(|| {
                format!(
                    "replace {} with {}",
                    paths.output_path.display(),
                    paths.temp_path.display()
                )
            })?;
            info!(
                output = %paths.output_path.display(),
                processed = summary.processed,
                skipped = summary.skipped,
                "artifact written"
            );
            Ok(FlattenOutcome::Completed(summary))
        }
        other => {
            discard_temp(&paths.temp_path);
            other
        }
    }
}

/// Collect and write in one call.
pub fn flatten_codebase(
    paths: &FlattenPaths,
    config: &FlattenConfig,
    interrupt: &AtomicBool,
    on_event: impl FnMut(WriteEvent<'_>),
) -> Result<FlattenOutcome> {
    let files = collect_files(paths, config);
    write_artifact(paths, &files, interrupt, on_event)
}

fn write_staged(
    paths: &FlattenPaths,
    files: &[FileCandidate],
    interrupt: &AtomicBool,
    on_event: impl FnMut(WriteEvent<'_>),
) -> Result<FlattenOutcome> {
    let file = File::create(&paths.temp_path)
        .with_context(|| format!("create {}", paths.temp_path.display()))?;
    let mut out = BufWriter::new(file);
    let stats = write_aggregate(&mut out, files, interrupt, on_event)?;
    drop(out);

    match stats.status {
        WriteStatus::Interrupted => Ok(FlattenOutcome::Interrupted),
        WriteStatus::Completed => Ok(FlattenOutcome::Completed(FlattenSummary {
            found: files.len(),
            processed: stats.processed,
            skipped: stats.skipped,
            output_path: paths.output_path.clone(),
        })),
    }
}

fn discard_temp(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed staging file"),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => warn!(path = %path.display(), error = %err, "failed to remove staging file"),
    }
}
