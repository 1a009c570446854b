//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// GSM - manage named aliases for RubyGems sources
#[derive(Parser)]
#[command(name = "gsm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the sources file (defaults to ~/.gsm/sources.toml)
    #[arg(long, global = true, env = "GSM_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered sources
    List,

    /// Register a source URL under a new name
    Add(AddArgs),

    /// Delete a source by name
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Switch the active source
    Use(UseArgs),

    /// Show the active source
    Current,

    /// Import sources already configured in gem
    Sync,

    /// Forget all registered sources
    Reset,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Display name for the source (up to 32 characters)
    pub name: String,

    /// Source URL (http or https)
    pub url: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Name of the source to delete
    pub name: String,
}

#[derive(Args)]
pub struct UseArgs {
    /// Name of the source to activate
    pub name: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
