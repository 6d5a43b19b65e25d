//! Loading `FlattenConfig` overrides from a TOML file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::FlattenConfig;

/// Load config from a TOML file.
///
/// Unlike a default lookup, an explicitly named file must exist.
pub fn load_config(path: &Path) -> Result<FlattenConfig> {
    if !path.is_file() {
        bail!("config file not found: {}", path.display());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FlattenConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Resolve the run configuration: the named file if given, else the defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<FlattenConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let cfg = FlattenConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}
