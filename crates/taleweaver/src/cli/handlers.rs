//! Command handlers.

use std::path::Path;
use taleweaver::{
    AppState, Credentials, PageKey, ReaderContext, StoryResponse, TaleweaverConfig,
    TaleweaverResult, overall_status, serve,
};
use tracing::info;

fn load_config(path: Option<&Path>) -> TaleweaverResult<TaleweaverConfig> {
    match path {
        Some(path) => TaleweaverConfig::from_file(path),
        None => TaleweaverConfig::load(),
    }
}

fn build_state(config: &TaleweaverConfig) -> TaleweaverResult<AppState> {
    AppState::from_config(config, &Credentials::from_env())
}

/// Handle the `serve` command.
pub async fn run_serve(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> TaleweaverResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = build_state(&config)?;
    info!(address = %config.server.address(), "Starting Taleweaver. Press Ctrl+C to stop.");
    serve(&config.server, state).await
}

/// Handle the `story` command.
pub async fn run_story(
    config_path: Option<&Path>,
    theme: &str,
    age: Option<u8>,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let state = build_state(&config)?;

    let reader = ReaderContext {
        age,
        ..ReaderContext::default()
    };
    let page = state
        .pipeline()
        .start(theme, PageKey::start(), &reader)
        .await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&StoryResponse::from(&page))?
    );
    Ok(())
}

/// Handle the `health` command.
pub async fn run_health(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let state = build_state(&config)?;

    let services = state.service_health().await;
    let report = serde_json::json!({
        "status": overall_status(&services),
        "services": services,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
