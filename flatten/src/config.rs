//! Exclusion rules and output naming for a flattening run.

use std::collections::BTreeSet;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Artifact written into the scanned root when no override is given.
pub const DEFAULT_OUTPUT_FILE: &str = "full_project_context.txt";

const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".expo",
    "dist",
    "web-build",
    "android",
    "ios",
    "__pycache__",
    ".next",
    "build",
    "coverage",
];

const DEFAULT_INCLUDED_EXTENSIONS: &[&str] =
    &[".ts", ".tsx", ".js", ".jsx", ".json", ".css", ".md"];

const DEFAULT_EXCLUDED_FILES: &[&str] = &["package-lock.json", "yarn.lock", "pnpm-lock.yaml"];

/// Immutable selection rules, built once per run and passed to the walker
/// and selector.
///
/// Loadable from TOML; missing fields fall back to the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FlattenConfig {
    /// Directory names pruned on exact match. Dot-prefixed names are always
    /// pruned in addition to these.
    pub ignored_dirs: BTreeSet<String>,

    /// File suffixes to include, with the leading dot (`.tsx`, not `tsx`).
    /// Matched case-sensitively.
    pub included_extensions: BTreeSet<String>,

    /// Base names excluded even when their extension is allowed.
    pub excluded_files: BTreeSet<String>,

    /// Name of the aggregate artifact inside the scanned root.
    pub output_file: String,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            ignored_dirs: to_set(DEFAULT_IGNORED_DIRS),
            included_extensions: to_set(DEFAULT_INCLUDED_EXTENSIONS),
            excluded_files: to_set(DEFAULT_EXCLUDED_FILES),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl FlattenConfig {
    pub fn validate(&self) -> Result<()> {
        let name = self.output_file.trim();
        if name.is_empty() {
            return Err(anyhow!("output_file must be non-empty"));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(anyhow!(
                "output_file must be a plain file name, got '{}'",
                self.output_file
            ));
        }
        for ext in &self.included_extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(anyhow!(
                    "included_extensions entries must look like '.ext', got '{ext}'"
                ));
            }
        }
        if self.ignored_dirs.iter().any(|d| d.is_empty()) {
            return Err(anyhow!("ignored_dirs entries must be non-empty"));
        }
        if self.excluded_files.iter().any(|f| f.is_empty()) {
            return Err(anyhow!("excluded_files entries must be non-empty"));
        }
        Ok(())
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
