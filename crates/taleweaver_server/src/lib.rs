//! HTTP API for the Taleweaver storybook service.
//!
//! Wires provider adapters, media storage and the story pipeline from
//! [`TaleweaverConfig`] and [`Credentials`], and exposes them over axum.
//!
//! # Example
//!
//! ```no_run
//! use taleweaver_server::{AppState, Credentials, TaleweaverConfig, serve};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TaleweaverConfig::load()?;
//! let state = AppState::from_config(&config, &Credentials::from_env())?;
//! serve(&config.server, state).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod error;
mod metrics;
mod server;
mod state;

pub use api::{StoryResponse, create_router, media_url};
pub use config::{
    ArchiveConfig, Credentials, IllustrationConfig, ModelConfig, NarrationConfig, PlacesConfig,
    ServerConfig, StorageConfig, StoryConfig, TaleweaverConfig,
};
pub use error::ApiError;
pub use metrics::PageMetrics;
pub use server::{bind, serve, serve_on};
pub use state::{AppState, HealthProbe, ServiceHealth, overall_status};
