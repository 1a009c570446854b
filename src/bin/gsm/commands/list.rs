//! `gsm list` command

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(file: &Option<PathBuf>) -> Result<()> {
    let manager = super::open_manager(file)?;
    let registry = manager.registry();

    if registry.is_empty() {
        println!("no sources registered");
        return Ok(());
    }

    let width = registry
        .sources()
        .keys()
        .map(|name| name.len())
        .max()
        .unwrap_or(0);

    for (name, url) in registry.sources() {
        let marker = if name == registry.active() { "*" } else { " " };
        println!("{marker} {name:<width$}  {url}");
    }

    Ok(())
}
