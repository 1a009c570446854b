//! GSM CLI - manage named aliases for RubyGems sources

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("gsm=debug")
    } else {
        EnvFilter::new("gsm=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::List => commands::list::execute(&cli.file),
        Commands::Add(args) => commands::add::execute(args, &cli.file),
        Commands::Remove(args) => commands::remove::execute(args, &cli.file),
        Commands::Use(args) => commands::use_source::execute(args, &cli.file),
        Commands::Current => commands::current::execute(&cli.file),
        Commands::Sync => commands::sync::execute(&cli.file),
        Commands::Reset => commands::reset::execute(&cli.file),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
