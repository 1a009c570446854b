//! Shared utilities

pub mod process;
pub mod store;

pub use store::SourcesDoc;
