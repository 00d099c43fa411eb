//! Trait definitions for the Taleweaver storybook service.
//!
//! Every external collaborator (story LLMs, speech, image, places and vector
//! store providers) sits behind one of these traits so the story pipeline can
//! be assembled from real adapters or from test stubs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{
    ImageGenerator, PlacesBackend, Provider, SpeechSynthesizer, StoryProvider, VectorStore,
};
pub use types::{Available, HealthStatus, Probe, UnavailableReason};
