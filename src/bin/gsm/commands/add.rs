//! `gsm add` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::AddArgs;

pub fn execute(args: AddArgs, file: &Option<PathBuf>) -> Result<()> {
    let mut manager = super::open_manager(file)?;
    manager.add(&args.name, &args.url)?;

    println!("added {} ({})", args.name, args.url);
    Ok(())
}
