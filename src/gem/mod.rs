//! Bridge to the `gem` command line.
//!
//! The registry never talks to RubyGems directly; it goes through the
//! [`GemBridge`] trait so tests can substitute an in-memory fake for the
//! real subprocess calls.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::util::process::{find_executable, ProcessBuilder};

/// Environment variable overriding the gem program to invoke.
pub const GEM_ENV: &str = "GSM_GEM";

/// External interface to the underlying package manager.
pub trait GemBridge {
    /// Raw output of `gem sources --list`.
    fn list(&self) -> Result<String>;

    /// Make `url` the sole configured source.
    ///
    /// Returns whether gem accepted it; a spawn failure is an `Err`, a
    /// rejection by gem itself is `Ok(false)`.
    fn activate(&self, url: &str) -> Result<bool>;
}

/// Bridge that shells out to the real `gem` executable.
#[derive(Debug, Clone, Default)]
pub struct GemCli {
    program: Option<PathBuf>,
}

impl GemCli {
    pub fn new() -> Self {
        GemCli { program: None }
    }

    /// Use a specific gem executable instead of looking one up.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        GemCli {
            program: Some(program.into()),
        }
    }

    /// Resolve the gem program: explicit override, then `GSM_GEM`, then PATH.
    fn program(&self) -> Result<PathBuf> {
        if let Some(program) = &self.program {
            return Ok(program.clone());
        }
        if let Ok(gem) = std::env::var(GEM_ENV) {
            return Ok(PathBuf::from(gem));
        }
        find_executable("gem").context("could not find `gem` in PATH")
    }
}

impl GemBridge for GemCli {
    fn list(&self) -> Result<String> {
        let output = ProcessBuilder::new(self.program()?)
            .args(["sources", "--list"])
            .exec_and_check()?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn activate(&self, url: &str) -> Result<bool> {
        let program = self.program()?;

        let cleared = ProcessBuilder::new(&program)
            .args(["sources", "--clear-all"])
            .exec()?;
        if !cleared.status.success() {
            tracing::debug!("`gem sources --clear-all` exited nonzero");
            return Ok(false);
        }

        let added = ProcessBuilder::new(&program)
            .args(["sources", "--add", url])
            .exec()?;
        let stdout = String::from_utf8_lossy(&added.stdout);

        // gem prints "<url> added to sources" on acceptance and still exits
        // zero on some rejection paths, so check the acknowledgement too.
        Ok(added.status.success() && stdout.contains("added to sources"))
    }
}

/// Extract source URLs from `gem sources --list` output.
///
/// The listing opens with a `*** CURRENT SOURCES ***` banner followed by a
/// blank line; both are ignored, the remaining lines are kept in order.
pub fn parse_source_listing(output: &str) -> Vec<&str> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("***"))
        .collect()
}
