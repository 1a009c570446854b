//! `gsm current` command

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(file: &Option<PathBuf>) -> Result<()> {
    let manager = super::open_manager(file)?;
    let registry = manager.registry();

    match registry.active_url() {
        Some(url) => println!("{} ({url})", registry.active()),
        None => println!("no source selected"),
    }

    Ok(())
}
