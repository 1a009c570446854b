//! Command implementations

use std::path::PathBuf;

use anyhow::Result;
use gsm::util::store::default_sources_path;
use gsm::{GemCli, SourceManager};

pub mod add;
pub mod completions;
pub mod current;
pub mod list;
pub mod remove;
pub mod reset;
pub mod sync;
pub mod use_source;

/// Resolve the sources file and open its manager.
pub(crate) fn open_manager(file: &Option<PathBuf>) -> Result<SourceManager<GemCli>> {
    let path = match file {
        Some(path) => path.clone(),
        None => default_sources_path()?,
    };
    SourceManager::open(path, GemCli::new())
}
