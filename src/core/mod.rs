//! Core data structures for GSM.
//!
//! This module contains the registry engine:
//! - URL syntax validation
//! - Display-name allocation from the candidate pool
//! - The source registry and its invariants

pub mod names;
pub mod registry;
pub mod url;

pub use names::NameAllocator;
pub use registry::SourceRegistry;
