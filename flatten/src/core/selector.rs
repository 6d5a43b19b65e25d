//! Inclusion and pruning rules for candidate paths.

use std::path::Path;

use crate::config::FlattenConfig;

/// Marker prefix for hidden/system directories, pruned regardless of config.
const HIDDEN_PREFIX: char = '.';

/// Returns true if a directory with this name must not be descended into.
///
/// Only the name is checked, never the full path: a `build/` folder is pruned
/// at any depth.
pub fn should_prune(dir_name: &str, config: &FlattenConfig) -> bool {
    dir_name.starts_with(HIDDEN_PREFIX) || config.ignored_dirs.contains(dir_name)
}

/// Returns true if the file at `path` belongs in the aggregate artifact.
///
/// The extension is compared with its leading dot, so `.tsx` and `.ts` are
/// distinct. Files without an extension (including bare dotfiles like
/// `.json`) never match.
pub fn is_selected(path: &Path, config: &FlattenConfig) -> bool {
    let Some(suffix) = suffix(path) else {
        return false;
    };
    if !config.included_extensions.contains(&suffix) {
        return false;
    }
    path.file_name()
        .is_some_and(|name| !config.excluded_files.contains(&*name.to_string_lossy()))
}

fn suffix(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if ext.is_empty() {
        return None;
    }
    Some(format!("{HIDDEN_PREFIX}{ext}"))
}
