//! Structured generation outcomes.
//!
//! The pipeline never throws an unstructured error past its boundary:
//! callers always get an outcome object, successful or not.

use fresco_core::GeneratedPost;
use serde::{Deserialize, Serialize};

/// Why a run produced no posts without being an infrastructure failure.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The profile has no connected publishing destination
    #[display("no_connected_platform")]
    NoConnectedPlatform,
    /// No business profile exists for the owner
    #[display("missing_profile")]
    MissingProfile,
    /// The media library holds nothing publishable
    #[display("empty_inventory")]
    EmptyInventory,
    /// Every provider in the chain failed
    #[display("provider_unavailable")]
    ProviderUnavailable,
}

/// What the run drew from: counts per inventory bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SourcesSummary {
    /// Carousel groups available to the run
    pub carousels: usize,
    /// Standalone items available to the run
    pub standalone: usize,
    /// Stock-photo fallbacks among them
    pub stock: usize,
}

/// Structured result of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Whether a batch was generated and persisted
    pub success: bool,
    /// Number of posts in the batch
    pub posts_count: usize,
    /// The scheduled batch (empty on skip or failure)
    pub posts: Vec<GeneratedPost>,
    /// Inventory the run had to work with
    pub sources_used: SourcesSummary,
    /// Why the run was skipped, when it was
    pub skip_reason: Option<SkipReason>,
    /// Provider that produced the batch, when one did
    pub provider: Option<String>,
}

impl GenerationOutcome {
    /// A run that short-circuited before calling any provider.
    pub fn skipped(reason: SkipReason, sources: SourcesSummary) -> Self {
        Self {
            success: false,
            posts_count: 0,
            posts: Vec::new(),
            sources_used: sources,
            skip_reason: Some(reason),
            provider: None,
        }
    }

    /// A completed run with a persisted batch.
    pub fn generated(posts: Vec<GeneratedPost>, sources: SourcesSummary, provider: String) -> Self {
        Self {
            success: true,
            posts_count: posts.len(),
            posts,
            sources_used: sources,
            skip_reason: None,
            provider: Some(provider),
        }
    }
}
