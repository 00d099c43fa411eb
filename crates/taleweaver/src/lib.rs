//! Taleweaver - interactive storybooks for children.
//!
//! A reader picks a theme, a language model writes a short illustrated page
//! ending in two or three choices, and each choice drives the next page until
//! a happy ending. Pages are narrated, illustrated and paired with real
//! places near the reader.
//!
//! # Features
//!
//! - **Provider fallback**: Anthropic first, any OpenAI-compatible model second
//! - **Age-aware prompts**: vocabulary and choice count tuned per age band
//! - **Soft side channels**: narration, artwork and places never fail a page
//! - **HTTP API**: axum routes for stories, media, health and archiving
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use taleweaver::{AppState, Credentials, PageKey, ReaderContext, TaleweaverConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TaleweaverConfig::load()?;
//!     let state = AppState::from_config(&config, &Credentials::from_env())?;
//!
//!     let page = state
//!         .pipeline()
//!         .start("kindness", PageKey::start(), &ReaderContext::default())
//!         .await?;
//!     println!("{}", page.result().story_text);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry trace and metric export to stdout
//!
//! # Architecture
//!
//! - `taleweaver_error` - Error types
//! - `taleweaver_core` - Domain data types
//! - `taleweaver_interface` - Provider traits and health types
//! - `taleweaver_storage` - Narration and artwork storage
//! - `taleweaver_models` - HTTP adapters for every provider
//! - `taleweaver_story` - Prompting, fallback, parsing and the page pipeline
//! - `taleweaver_server` - Configuration and the HTTP API
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use taleweaver_core::*;
pub use taleweaver_error::*;
pub use taleweaver_interface::*;
pub use taleweaver_models::*;
pub use taleweaver_server::*;
pub use taleweaver_storage::*;
pub use taleweaver_story::*;

pub mod observability;
