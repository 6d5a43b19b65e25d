//! Test-only helpers for building throwaway directory trees.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A temporary directory tree, removed on drop.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` at `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Read a file under the tree as UTF-8.
    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.dir.path().join(relative);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}
