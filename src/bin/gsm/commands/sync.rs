//! `gsm sync` command

use std::path::PathBuf;

use anyhow::{bail, Result};

pub fn execute(file: &Option<PathBuf>) -> Result<()> {
    let mut manager = super::open_manager(file)?;
    let summary = manager.sync()?;

    println!(
        "imported {} source(s), {} already registered",
        summary.added, summary.skipped
    );

    if !summary.complete {
        bail!("some configured gem sources could not be imported");
    }
    Ok(())
}
