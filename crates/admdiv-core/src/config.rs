// crates/admdiv-core/src/config.rs
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Row filters applied by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Skip rows whose designation is not an administrative one (e.g. `PPL`).
    pub admin_only: bool,
    /// Skip rows with an empty `display` column.
    pub require_display: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            admin_only: true,
            require_display: false,
        }
    }
}

/// Extra tie-break rules for the best-name selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPolicy {
    /// Between candidates of equal tier and rank, prefer English, then
    /// common local languages, before falling back to input order.
    pub prefer_languages: bool,
}

/// Everything a run needs besides the input files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub loader: LoaderOptions,
    pub selection: SelectionPolicy,
    /// Select winners on the rayon pool (needs the `parallel` feature).
    pub parallel: bool,
    /// Reuse / write the `.parsed.bin` cache next to the names file.
    pub cache: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            loader: LoaderOptions::default(),
            selection: SelectionPolicy::default(),
            parallel: true,
            cache: true,
        }
    }
}

impl PipelineConfig {
    /// Reads a JSON config file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: PipelineConfig =
            serde_json::from_str(r#"{ "selection": { "prefer_languages": true }, "cache": false }"#)
                .unwrap();
        assert!(cfg.selection.prefer_languages);
        assert!(!cfg.cache);
        assert!(cfg.parallel);
        assert_eq!(cfg.loader, LoaderOptions::default());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admdiv.json");
        std::fs::write(&path, r#"{ "loader": { "require_display": true } }"#).unwrap();
        let cfg = PipelineConfig::from_json_file(&path).unwrap();
        assert!(cfg.loader.require_display);
        assert!(cfg.loader.admin_only);
    }
}
