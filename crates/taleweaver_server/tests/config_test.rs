use std::collections::HashMap;
use std::io::Write;
use taleweaver_server::{AppState, Credentials, TaleweaverConfig};
use tempfile::{NamedTempFile, TempDir};

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_overrides_only_what_it_names() {
    let file = toml_file(
        r#"
[server]
port = 9001

[story.primary]
model = "claude-sonnet-4-5"
"#,
    );
    let config = TaleweaverConfig::from_file(file.path()).unwrap();

    assert_eq!(config.server.port, 9001);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.story.primary.model, "claude-sonnet-4-5");
    assert_eq!(config.story.primary.base_url, "https://api.anthropic.com");
    assert_eq!(config.story.backup.model, "gpt-4o-mini");
    assert_eq!(config.server.address(), "0.0.0.0:9001");
}

#[test]
fn test_wrong_type_is_a_config_error() {
    let file = toml_file("[server]\nport = \"not a port\"\n");
    let err = TaleweaverConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration Error"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(TaleweaverConfig::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_credentials_from_lookup() {
    let vars = HashMap::from([
        ("ANTHROPIC_API_KEY", " sk-ant \n"),
        ("PINECONE_INDEX_HOST", "idx.pinecone.io"),
        ("OPENAI_API_KEY", ""),
    ]);
    let credentials = Credentials::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

    assert_eq!(credentials.anthropic_api_key, "sk-ant");
    assert_eq!(
        credentials.present(),
        vec!["ANTHROPIC_API_KEY", "PINECONE_INDEX_HOST"]
    );
}

#[tokio::test]
async fn test_state_without_credentials_reports_disabled_providers() {
    let media = TempDir::new().unwrap();
    let mut config = TaleweaverConfig::bundled().unwrap();
    config.storage.media_dir = media.path().join("media");

    let state = AppState::from_config(&config, &Credentials::default()).unwrap();
    assert!(media.path().join("media").is_dir());

    let services = state.service_health().await;
    let roles: Vec<&str> = services.iter().map(|s| s.role.as_str()).collect();
    assert_eq!(
        roles,
        vec!["story", "story", "narration", "illustration", "places", "places", "archive"]
    );
    assert!(services.iter().all(|s| !s.health.is_healthy()));
    assert_eq!(taleweaver_server::overall_status(&services), "degraded");
}
