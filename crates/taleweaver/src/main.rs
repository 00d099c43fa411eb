//! Taleweaver CLI binary.
//!
//! - Run the HTTP API
//! - Write a single story page from the terminal
//! - Check provider health

use clap::Parser;
use taleweaver::observability::{ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, run_health, run_serve, run_story};

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new("taleweaver").with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    let guard = init_observability(&observability).map_err(|e| anyhow::anyhow!(e))?;

    let config = cli.config.as_deref();
    let outcome = match cli.command {
        Commands::Serve { host, port } => run_serve(config, host, port).await.map_err(Into::into),
        Commands::Story { theme, age } => run_story(config, &theme, age).await,
        Commands::Health => run_health(config).await,
    };

    guard.shutdown();
    outcome
}
