//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taleweaver - interactive storybooks with narration, artwork and local places
#[derive(Parser, Debug)]
#[command(name = "taleweaver")]
#[command(about = "Interactive children's storybook service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Interface to bind (overrides configuration)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides configuration)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write one story page and print it as JSON
    Story {
        /// Story theme
        #[arg(long)]
        theme: String,

        /// Reader's age in years
        #[arg(long)]
        age: Option<u8>,
    },

    /// Probe every configured provider
    Health,
}
