//! `gsm remove` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::RemoveArgs;

pub fn execute(args: RemoveArgs, file: &Option<PathBuf>) -> Result<()> {
    let mut manager = super::open_manager(file)?;
    manager.remove(&args.name)?;

    println!("removed {}", args.name);
    Ok(())
}
