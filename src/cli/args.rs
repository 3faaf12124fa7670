//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, fields::FieldsArgs, import::ImportArgs,
    init::InitArgs, list::ListArgs,
};

#[derive(Parser)]
#[command(name = "propdesk")]
#[command(author, version, about = "CSV import for a real-estate CRM")]
#[command(long_about = "Bulk-load leads, inventory units and channel partners from spreadsheet exports into a local workspace, with column mapping, row validation and a review step before anything is saved.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new propdesk workspace
    Init(InitArgs),

    /// Import contacts, units or partners from a CSV file
    Import(ImportArgs),

    /// Show the importable fields for a record type
    Fields(FieldsArgs),

    /// List stored records
    List(ListArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Parse a record type argument (contact, unit, partner and their aliases)
pub fn parse_kind(s: &str) -> Result<crate::core::identity::EntityKind, String> {
    s.parse().map_err(|_| {
        format!(
            "Unsupported record type: '{}'. Supported: contact, unit, partner",
            s
        )
    })
}
