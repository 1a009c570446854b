//! `gsm use` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::UseArgs;

pub fn execute(args: UseArgs, file: &Option<PathBuf>) -> Result<()> {
    let mut manager = super::open_manager(file)?;
    manager.use_source(&args.name)?;

    let url = manager.registry().active_url().unwrap_or_default();
    println!("now using {} ({url})", args.name);
    Ok(())
}
