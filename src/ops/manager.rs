//! Registry orchestration: bootstrap and write-through persistence.
//!
//! A [`SourceManager`] owns one registry per sources file. Construction
//! either restores the persisted document or, when the file does not exist
//! yet, bootstraps the registry from whatever `gem` already has configured.
//! Every mutating operation persists the registry synchronously before
//! returning, so the file and the in-memory state never drift apart.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::registry::{
    ActivateError, AddError, ImportSummary, RemoveError, SourceRegistry,
};
use crate::gem::{parse_source_listing, GemBridge};
use crate::util::store::SourcesDoc;

/// A failed manager operation.
///
/// Registry validation errors pass through unchanged; `Store` is the one
/// failure the registry layer cannot produce itself, a mutation that
/// succeeded in memory but could not be persisted.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Add(#[from] AddError),
    #[error(transparent)]
    Remove(#[from] RemoveError),
    #[error(transparent)]
    Activate(#[from] ActivateError),
    #[error("failed to list gem sources")]
    Gem(#[source] anyhow::Error),
    #[error("failed to persist sources to {path}")]
    Store {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// Owns a [`SourceRegistry`] bound to a sources file and a gem bridge.
#[derive(Debug)]
pub struct SourceManager<B> {
    path: PathBuf,
    registry: SourceRegistry,
    bridge: B,
}

impl<B: GemBridge> SourceManager<B> {
    /// Open the registry persisted at `path`.
    ///
    /// When no file exists yet, the registry is bootstrapped from the gem
    /// command's configured sources and persisted immediately. Nothing is
    /// auto-activated on bootstrap.
    pub fn open(path: impl Into<PathBuf>, bridge: B) -> Result<Self> {
        Self::open_with_registry(path, bridge, SourceRegistry::new())
    }

    /// Same as [`SourceManager::open`] with a caller-provided registry shell,
    /// so tests can inject a short name pool.
    pub fn open_with_registry(
        path: impl Into<PathBuf>,
        bridge: B,
        registry: SourceRegistry,
    ) -> Result<Self> {
        let path = path.into();
        let mut manager = SourceManager {
            path,
            registry,
            bridge,
        };

        if manager.path.exists() {
            let doc = SourcesDoc::load(&manager.path)?;
            manager.registry.restore(doc).with_context(|| {
                format!("invalid sources file: {}", manager.path.display())
            })?;
        } else {
            tracing::debug!(
                "no sources file at {}, bootstrapping from gem",
                manager.path.display()
            );
            let listing = manager
                .bridge
                .list()
                .context("failed to list gem sources")?;
            let urls = parse_source_listing(&listing);
            let summary = manager.registry.import(&urls.join("\n"));
            if !summary.complete {
                tracing::warn!("not every configured gem source could be imported");
            }
            manager.persist()?;
        }

        Ok(manager)
    }

    /// Register `url` under `name` and persist.
    pub fn add(&mut self, name: &str, url: &str) -> Result<(), ManagerError> {
        self.registry.add(name, url)?;
        self.persist()
    }

    /// Delete the source registered under `name` and persist.
    pub fn remove(&mut self, name: &str) -> Result<(), ManagerError> {
        self.registry.remove(name)?;
        self.persist()
    }

    /// Switch the active source to `name` and persist.
    pub fn use_source(&mut self, name: &str) -> Result<(), ManagerError> {
        self.registry.activate(name, &self.bridge)?;
        self.persist()
    }

    /// Import a newline-separated URL block and persist.
    ///
    /// A partial import is persisted as-is; the summary tells the caller
    /// whether every line made it in.
    pub fn import(&mut self, block: &str) -> Result<ImportSummary, ManagerError> {
        let summary = self.registry.import(block);
        self.persist()?;
        Ok(summary)
    }

    /// Re-import whatever gem currently has configured.
    ///
    /// Already-registered URLs are dedupe-skipped, so syncing is idempotent.
    pub fn sync(&mut self) -> Result<ImportSummary, ManagerError> {
        let listing = self.bridge.list().map_err(ManagerError::Gem)?;
        let urls = parse_source_listing(&listing);
        self.import(&urls.join("\n"))
    }

    /// Forget every source and persist the empty registry.
    pub fn reset(&mut self) -> Result<(), ManagerError> {
        self.registry.clear();
        self.persist()
    }

    /// The managed registry.
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// The sources file this manager persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), ManagerError> {
        self.registry
            .to_doc()
            .save(&self.path)
            .map_err(|source| ManagerError::Store {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use tempfile::TempDir;

    use super::*;

    /// In-memory stand-in for the gem command.
    struct FakeGem {
        listing: String,
        accept: bool,
        activations: RefCell<Vec<String>>,
    }

    impl FakeGem {
        fn listing(listing: &str) -> Self {
            FakeGem {
                listing: listing.to_string(),
                accept: true,
                activations: RefCell::new(Vec::new()),
            }
        }

        fn rejecting(mut self) -> Self {
            self.accept = false;
            self
        }
    }

    impl GemBridge for FakeGem {
        fn list(&self) -> Result<String> {
            Ok(self.listing.clone())
        }

        fn activate(&self, url: &str) -> Result<bool> {
            self.activations.borrow_mut().push(url.to_string());
            Ok(self.accept)
        }
    }

    fn sources_path(tmp: &TempDir) -> PathBuf {
        tmp.path().join("sources.toml")
    }

    #[test]
    fn test_bootstrap_names_existing_gem_sources() {
        let tmp = TempDir::new().unwrap();
        let bridge = FakeGem::listing("*** CURRENT SOURCES ***\n\nhttps://rubygems.org/\n");

        let manager = SourceManager::open(sources_path(&tmp), bridge).unwrap();

        assert_eq!(manager.registry().len(), 1);
        assert_eq!(manager.registry().pivot(), 1);
        assert_eq!(
            manager.registry().get("Amethyst"),
            Some("https://rubygems.org/")
        );
        // Bootstrap never auto-activates.
        assert_eq!(manager.registry().active(), "");
        // And it persists immediately.
        assert!(sources_path(&tmp).exists());
    }

    #[test]
    fn test_open_restores_existing_file_without_bootstrap() {
        let tmp = TempDir::new().unwrap();
        let path = sources_path(&tmp);
        std::fs::write(
            &path,
            r#"
use = "rubygems"

[sources]
rubygems = "https://rubygems.org/"
"#,
        )
        .unwrap();

        // A listing that would add an entry if bootstrap ran.
        let bridge = FakeGem::listing("https://other.example.org/\n");
        let manager = SourceManager::open(&path, bridge).unwrap();

        assert_eq!(manager.registry().len(), 1);
        assert_eq!(manager.registry().active(), "rubygems");
    }

    #[test]
    fn test_add_persists_synchronously() {
        let tmp = TempDir::new().unwrap();
        let path = sources_path(&tmp);
        let bridge = FakeGem::listing("");
        let mut manager = SourceManager::open(&path, bridge).unwrap();

        manager.add("Test", "https://rubygems.org/").unwrap();

        let doc = SourcesDoc::load(&path).unwrap();
        assert_eq!(
            doc.sources.get("Test").map(String::as_str),
            Some("https://rubygems.org/")
        );
    }

    #[test]
    fn test_add_failure_does_not_touch_file() {
        let tmp = TempDir::new().unwrap();
        let path = sources_path(&tmp);
        let bridge = FakeGem::listing("https://rubygems.org/\n");
        let mut manager = SourceManager::open(&path, bridge).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = manager.add("", "https://rubygems.org/").unwrap_err();
        assert!(matches!(err, ManagerError::Add(AddError::EmptyName)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_use_source_applies_through_bridge_and_persists() {
        let tmp = TempDir::new().unwrap();
        let path = sources_path(&tmp);
        let bridge = FakeGem::listing("https://rubygems.org/\n");
        let mut manager = SourceManager::open(&path, bridge).unwrap();

        manager.use_source("Amethyst").unwrap();

        assert_eq!(manager.registry().active(), "Amethyst");
        let doc = SourcesDoc::load(&path).unwrap();
        assert_eq!(doc.active, "Amethyst");
    }

    #[test]
    fn test_use_source_rejection_leaves_state_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = sources_path(&tmp);
        let bridge = FakeGem::listing("https://rubygems.org/\n").rejecting();
        let mut manager = SourceManager::open(&path, bridge).unwrap();

        let err = manager.use_source("Amethyst").unwrap_err();
        assert!(matches!(
            err,
            ManagerError::Activate(ActivateError::Rejected { .. })
        ));
        assert_eq!(manager.registry().active(), "");
        assert_eq!(SourcesDoc::load(&path).unwrap().active, "");
    }

    #[test]
    fn test_remove_active_source_is_refused() {
        let tmp = TempDir::new().unwrap();
        let path = sources_path(&tmp);
        let bridge = FakeGem::listing("https://rubygems.org/\n");
        let mut manager = SourceManager::open(&path, bridge).unwrap();
        manager.use_source("Amethyst").unwrap();

        let err = manager.remove("Amethyst").unwrap_err();
        assert!(matches!(
            err,
            ManagerError::Remove(RemoveError::SourceInUse(_))
        ));
        assert_eq!(manager.registry().len(), 1);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = sources_path(&tmp);
        let bridge = FakeGem::listing("https://rubygems.org/\nhttps://gems.ruby-china.org/\n");
        let mut manager = SourceManager::open(&path, bridge).unwrap();
        assert_eq!(manager.registry().len(), 2);

        let summary = manager.sync().unwrap();
        assert!(summary.complete);
        assert_eq!(summary.added, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(manager.registry().len(), 2);
    }

    #[test]
    fn test_reset_persists_empty_registry() {
        let tmp = TempDir::new().unwrap();
        let path = sources_path(&tmp);
        let bridge = FakeGem::listing("https://rubygems.org/\n");
        let mut manager = SourceManager::open(&path, bridge).unwrap();

        manager.reset().unwrap();

        assert!(manager.registry().is_empty());
        assert_eq!(manager.registry().active(), "");
        let doc = SourcesDoc::load(&path).unwrap();
        assert!(doc.sources.is_empty());
        assert_eq!(doc.active, "");
    }
}
