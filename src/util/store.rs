//! The persisted sources document.
//!
//! One TOML file per managed registry:
//!
//! ```toml
//! use = "rubygems"
//!
//! [sources]
//! rubygems = "https://rubygems.org/"
//! ```
//!
//! The file is rewritten in full on every mutation; each save is a complete
//! snapshot, so there is no partial-write recovery to speak of.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Serialized form of a source registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourcesDoc {
    /// Active source name; empty when no source is selected.
    #[serde(rename = "use")]
    pub active: String,

    /// name -> url, in file order.
    pub sources: IndexMap<String, String>,
}

impl SourcesDoc {
    /// Load a document from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read sources file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse sources file: {}", path.display()))
    }

    /// Save the document to a file, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create sources directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize sources")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write sources file: {}", path.display()))?;

        Ok(())
    }
}

/// Default sources file location (~/.gsm/sources.toml).
pub fn default_sources_path() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".gsm").join("sources.toml"))
        .context("could not determine home directory")
}
