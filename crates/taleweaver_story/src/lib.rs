//! Story generation pipeline for Taleweaver.
//!
//! This crate turns a theme or a reader's choice into a finished story page:
//!
//! - [`PromptBuilder`] writes provider instructions for fresh, continuation
//!   and ending pages, with age-appropriate guidelines
//! - [`StoryGenerator`] tries story providers in order until one answers
//! - [`parse_story`] splits the answer into story text, location and choices
//! - [`Narrator`], [`Illustrator`] and [`LocationService`] add narration,
//!   artwork and nearby places, each on a best-effort basis
//! - [`Archive`] saves reader profiles and finished books
//! - [`StoryPipeline`] ties the pieces together
//!
//! Every collaborator is injected as a trait object, so tests can swap in
//! stub providers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod age;
mod archive;
mod generator;
mod illustration;
mod locations;
mod narration;
mod parser;
mod pipeline;
mod prompt;

pub use age::age_guidelines;
pub use archive::{Archive, book_id, profile_id};
pub use generator::{MAX_CHOICES, StoryGenerator};
pub use illustration::{Illustration, Illustrator, PLACEHOLDER_URL};
pub use locations::{
    DEFAULT_STORY_RESULTS, LocationService, dedup_businesses, demo_businesses, is_local_spot,
    story_search_terms,
};
pub use narration::{DEMO_COLLECTION, MAX_NARRATION_CHARS, Narrator, truncate_chars};
pub use parser::{parse_choices, parse_story};
pub use pipeline::{ReaderContext, StoryPage, StoryPipeline};
pub use prompt::PromptBuilder;
