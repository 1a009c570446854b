//! `gsm reset` command

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(file: &Option<PathBuf>) -> Result<()> {
    let mut manager = super::open_manager(file)?;
    manager.reset()?;

    println!("all sources removed");
    Ok(())
}
