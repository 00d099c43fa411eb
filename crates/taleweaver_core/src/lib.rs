//! Core data types for the Taleweaver storybook service.
//!
//! This crate provides the data model shared by the provider traits, the
//! adapters and the story pipeline. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod age;
mod archive;
mod business;
mod media;
mod mode;
mod page;
mod prompt;
mod request;
mod result;

pub use age::AgeBand;
pub use archive::{CompletedBook, CompletedBookBuilder, ReaderProfile, VectorMatch, VectorRecord};
pub use business::{Business, BusinessBuilder, Coordinates, NearbySearch, TextSearch};
pub use media::{AudioFormat, ImageRequest, ImageRequestBuilder, SpeechRequest};
pub use mode::StoryMode;
pub use page::PageKey;
pub use prompt::{GenerationParams, StoryPrompt};
pub use request::{GenerationRequest, GenerationRequestBuilder};
pub use result::{GenerationResult, ParsedStory, ProviderAttempt};
