//! GSM - a named-alias manager for RubyGems sources
//!
//! This crate provides the core library functionality for GSM,
//! including the source registry, name allocation, and synchronization
//! with the `gem` command.

pub mod core;
pub mod gem;
pub mod ops;
pub mod util;

pub use core::names::NameAllocator;
pub use core::registry::{ImportSummary, SourceRegistry};
pub use gem::{GemBridge, GemCli};
pub use ops::manager::SourceManager;
pub use util::store::SourcesDoc;
