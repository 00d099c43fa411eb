//! Error types for the Taleweaver storybook service.
//!
//! This crate provides the error types shared by every Taleweaver crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Provider failures are recoverable: the story generator records them and
//! moves on to the next provider. Only [`GenerationErrorKind::AllProvidersExhausted`]
//! escapes to callers of the generation pipeline.
//!
//! # Examples
//!
//! ```
//! use taleweaver_error::{ProviderError, ProviderErrorKind, TaleweaverResult};
//!
//! fn call_model(key: &str) -> TaleweaverResult<String> {
//!     if key.is_empty() {
//!         Err(ProviderError::new(ProviderErrorKind::MissingCredentials(
//!             "ANTHROPIC_API_KEY is not set".into(),
//!         )))?
//!     }
//!     Ok("Once upon a time".into())
//! }
//!
//! match call_model("") {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod generation;
mod provider;
mod server;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{TaleweaverError, TaleweaverErrorKind, TaleweaverResult};
pub use generation::{GenerationError, GenerationErrorKind, ProviderFailure};
pub use provider::{ProviderError, ProviderErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
