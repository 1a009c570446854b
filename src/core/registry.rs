//! The in-memory source registry.
//!
//! A registry maps display names to source URLs and tracks which name is
//! currently active. All mutation goes through methods that enforce the
//! registry invariants: names are 1..=32 characters and unique, the active
//! name always resolves to an entry, and the allocation pivot only moves
//! forward. Persistence is orchestrated by the caller; the registry itself
//! never touches the filesystem.

use indexmap::IndexMap;
use thiserror::Error;

use crate::core::names::{NameAllocator, PoolExhausted};
use crate::core::url::is_valid_source_url;
use crate::gem::GemBridge;
use crate::util::store::SourcesDoc;

/// Longest accepted source name, in characters.
pub const MAX_NAME_LEN: usize = 32;

/// Why a source could not be added.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddError {
    #[error("source name must not be empty")]
    EmptyName,
    #[error("source name `{0}` is longer than {MAX_NAME_LEN} characters")]
    NameTooLong(String),
    #[error("source `{0}` already exists")]
    NameExists(String),
    #[error("`{0}` is not a valid http(s) URL")]
    InvalidUrl(String),
}

/// Why a source could not be removed.
///
/// `SourceInUse` and `NotFound` are distinct so callers can tell a refusal
/// apart from "nothing to do".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoveError {
    #[error("source `{0}` is in use; switch to another source first")]
    SourceInUse(String),
    #[error("no source named `{0}`")]
    NotFound(String),
}

/// Why a source could not be made active.
#[derive(Debug, Error)]
pub enum ActivateError {
    #[error("no source named `{0}`")]
    UnknownName(String),
    #[error("gem rejected source `{url}`")]
    Rejected { name: String, url: String },
    #[error(transparent)]
    Bridge(#[from] anyhow::Error),
}

/// Why a persisted document could not be restored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestoreError {
    #[error("`use` refers to unknown source `{0}`")]
    UnresolvedActive(String),
    #[error("persisted source name `{0}` is invalid")]
    InvalidName(String),
}

/// Outcome of a bulk import. Partial progress is retained, never rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries inserted under freshly allocated names.
    pub added: usize,
    /// Lines whose URL was already registered under some name.
    pub skipped: usize,
    /// True when every input line was inserted or dedupe-skipped.
    pub complete: bool,
}

/// Named gem sources with one optionally active entry.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    /// name -> url, insertion-ordered for deterministic persistence.
    sources: IndexMap<String, String>,
    /// Active name; empty means no source selected.
    active: String,
    /// Cursor into the allocator pool, monotonically non-decreasing.
    pivot: usize,
    allocator: NameAllocator,
}

impl SourceRegistry {
    /// Create an empty registry over the built-in name pool.
    pub fn new() -> Self {
        Self::with_allocator(NameAllocator::default())
    }

    /// Create an empty registry over a custom allocator.
    pub fn with_allocator(allocator: NameAllocator) -> Self {
        SourceRegistry {
            sources: IndexMap::new(),
            active: String::new(),
            pivot: 0,
            allocator,
        }
    }

    /// Register `url` under `name`.
    pub fn add(&mut self, name: &str, url: &str) -> Result<(), AddError> {
        if name.is_empty() {
            return Err(AddError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AddError::NameTooLong(name.to_string()));
        }
        if self.sources.contains_key(name) {
            return Err(AddError::NameExists(name.to_string()));
        }
        if !is_valid_source_url(url) {
            return Err(AddError::InvalidUrl(url.to_string()));
        }
        self.sources.insert(name.to_string(), url.to_string());
        Ok(())
    }

    /// Delete the source registered under `name`.
    ///
    /// The active source can never be removed; that would leave `use`
    /// pointing at nothing.
    pub fn remove(&mut self, name: &str) -> Result<(), RemoveError> {
        if !self.active.is_empty() && name == self.active {
            return Err(RemoveError::SourceInUse(name.to_string()));
        }
        match self.sources.shift_remove(name) {
            Some(_) => Ok(()),
            None => Err(RemoveError::NotFound(name.to_string())),
        }
    }

    /// Make `name` the active source by applying its URL through `bridge`.
    ///
    /// The active name only changes when gem accepts the URL; on rejection
    /// or bridge failure the registry is left untouched.
    pub fn activate(&mut self, name: &str, bridge: &dyn GemBridge) -> Result<(), ActivateError> {
        let url = self
            .sources
            .get(name)
            .ok_or_else(|| ActivateError::UnknownName(name.to_string()))?
            .clone();

        if bridge.activate(&url)? {
            self.active = name.to_string();
            Ok(())
        } else {
            Err(ActivateError::Rejected {
                name: name.to_string(),
                url,
            })
        }
    }

    /// Import a newline-separated block of source URLs, in input order.
    ///
    /// A URL already registered under any name is a dedupe-skip; anything
    /// else is validated and inserted under a freshly allocated name.
    /// Invalid lines are dropped, allocation exhaustion stops the import;
    /// either marks the summary incomplete, but entries inserted earlier in
    /// the same call stay in.
    pub fn import(&mut self, block: &str) -> ImportSummary {
        let mut summary = ImportSummary {
            added: 0,
            skipped: 0,
            complete: true,
        };

        for line in block.lines() {
            let url = line.trim();
            if url.is_empty() {
                continue;
            }
            if self.sources.values().any(|existing| existing == url) {
                summary.skipped += 1;
                continue;
            }
            if !is_valid_source_url(url) {
                tracing::warn!("skipping invalid source url `{url}`");
                summary.complete = false;
                continue;
            }

            let sources = &self.sources;
            match self
                .allocator
                .next(self.pivot, sources.len(), |name| sources.contains_key(name))
            {
                Ok(allocation) => {
                    self.sources.insert(allocation.name, url.to_string());
                    self.pivot = allocation.next_pivot;
                    summary.added += 1;
                }
                Err(PoolExhausted { cap }) => {
                    tracing::warn!("name pool exhausted at {cap} sources, import stopped");
                    summary.complete = false;
                    break;
                }
            }
        }

        summary
    }

    /// Forget every source and deselect the active one.
    ///
    /// The pivot rewinds too, so a cleared registry allocates names from the
    /// pool start again, exactly like a freshly bootstrapped one.
    pub fn clear(&mut self) {
        self.sources.clear();
        self.active.clear();
        self.pivot = 0;
    }

    /// Replace this registry's contents with a persisted document.
    pub fn restore(&mut self, doc: SourcesDoc) -> Result<(), RestoreError> {
        for name in doc.sources.keys() {
            if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
                return Err(RestoreError::InvalidName(name.clone()));
            }
        }
        if !doc.active.is_empty() && !doc.sources.contains_key(&doc.active) {
            return Err(RestoreError::UnresolvedActive(doc.active));
        }
        self.sources = doc.sources;
        self.active = doc.active;
        self.pivot = 0;
        Ok(())
    }

    /// Snapshot this registry as a persistable document.
    pub fn to_doc(&self) -> SourcesDoc {
        SourcesDoc {
            active: self.active.clone(),
            sources: self.sources.clone(),
        }
    }

    /// The active name, empty when no source is selected.
    pub fn active(&self) -> &str {
        &self.active
    }

    /// URL of the active source, if one is selected.
    pub fn active_url(&self) -> Option<&str> {
        if self.active.is_empty() {
            return None;
        }
        self.sources.get(&self.active).map(String::as_str)
    }

    /// URL registered under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    /// All registered sources, in insertion order.
    pub fn sources(&self) -> &IndexMap<String, String> {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Current allocation cursor.
    pub fn pivot(&self) -> usize {
        self.pivot
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
