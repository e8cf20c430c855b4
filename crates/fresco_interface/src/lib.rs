//! Trait seams for the Fresco content pipeline.
//!
//! The pipeline talks to two kinds of collaborators: LLM providers
//! ([`FrescoDriver`]) and the storage system (the repository traits).
//! Both are trait objects so tests can substitute in-memory or scripted
//! implementations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod repository;
mod traits;

pub use repository::{
    InsightsSource, MediaRepository, NoteRepository, PostRepository, ProfileRepository,
};
pub use traits::FrescoDriver;
