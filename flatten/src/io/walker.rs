//! Directory traversal with prune-before-descend semantics.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::FlattenConfig;
use crate::core::selector::should_prune;

/// A file discovered during traversal, not yet filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub absolute_path: PathBuf,
    /// `/`-separated path relative to the walk root.
    pub relative_path: String,
}

/// Enumerate every file under `root`, skipping pruned directories entirely.
///
/// Pruned directories are never read, so heavy trees like `node_modules`
/// cost nothing. The root itself is never pruned. Unreadable entries are
/// logged and skipped.
pub fn walk(root: &Path, config: &FlattenConfig) -> Vec<FileCandidate> {
    let mut candidates = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(
                    path = ?err.path(),
                    error = %err,
                    "skipping unreadable entry"
                );
                continue;
            }
        };
        if !is_file_like(&entry) {
            continue;
        }
        let Some(relative_path) = relative_path(root, entry.path()) else {
            continue;
        };
        candidates.push(FileCandidate {
            absolute_path: entry.into_path(),
            relative_path,
        });
    }

    debug!(root = %root.display(), count = candidates.len(), "walk complete");
    candidates
}

fn is_pruned(entry: &DirEntry, config: &FlattenConfig) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let pruned = should_prune(&name, config);
    if pruned {
        debug!(path = %entry.path().display(), "pruned directory");
    }
    pruned
}

/// Every entry except directories and symlinks resolving to one.
///
/// Dangling symlinks stay candidates so their read failure is reported
/// rather than silently dropped.
fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return false;
    }
    !(file_type.is_symlink() && entry.path().is_dir())
}

/// Render `path` relative to `root` with `/` separators.
///
/// Names that are not valid Unicode are escaped rather than replaced, so
/// distinct files never share a rendered path.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(render_component(part)),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

fn render_component(part: &OsStr) -> String {
    match part.to_str() {
        Some(text) => text.to_string(),
        None => escape_invalid(part),
    }
}

/// Invalid bytes become `\xNN`.
#[cfg(unix)]
fn escape_invalid(part: &OsStr) -> String {
    use std::os::unix::ffi::OsStrExt;

    let mut rendered = String::new();
    for chunk in part.as_bytes().utf8_chunks() {
        rendered.push_str(chunk.valid());
        for byte in chunk.invalid() {
            rendered.push_str(&format!("\\x{byte:02X}"));
        }
    }
    rendered
}

/// Unpaired surrogates become `\u{NNNN}`.
#[cfg(windows)]
fn escape_invalid(part: &OsStr) -> String {
    use std::os::windows::ffi::OsStrExt;

    char::decode_utf16(part.encode_wide())
        .map(|unit| match unit {
            Ok(c) => c.to_string(),
            Err(err) => format!("\\u{{{:04X}}}", err.unpaired_surrogate()),
        })
        .collect()
}

#[cfg(not(any(unix, windows)))]
fn escape_invalid(part: &OsStr) -> String {
    part.to_string_lossy().into_owned()
}
