use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tokpool — admin console for a token-pool proxy backend
#[derive(Parser)]
#[command(name = "tokpool", version, about)]
pub struct Cli {
    /// Backend base URL (overrides TOKPOOL_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage pool tokens
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Manage server environment variables
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },
}

#[derive(Subcommand)]
pub enum TokenCommands {
    /// List tokens, one page at a time
    List {
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Page size: 10, 15, 30 or 50
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Add tokens, one per line, from a file or stdin
    Add {
        /// File of newline-delimited tokens; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Delete a token by id (asks for confirmation)
    Delete {
        #[arg(long)]
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Remove tokens already inside the expiry threshold
    Cleanup,
}

#[derive(Subcommand)]
pub enum EnvCommands {
    /// Show the managed configuration keys and their current values
    Show,
    /// Save KEY=VALUE pairs (take effect after restart)
    Save {
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// Apply KEY=VALUE pairs to the running server
    Apply {
        #[arg(required = true)]
        pairs: Vec<String>,
    },
}
