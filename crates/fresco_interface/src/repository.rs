//! Repository traits for the storage collaborator.
//!
//! Reads are snapshots: the pipeline calls each finder once at the start of
//! a run and never re-reads live storage mid-pipeline.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fresco_core::{
    BusinessProfile, GeneratedPost, MediaItem, MonthKey, Note, PerformanceSummary,
};
use fresco_error::FrescoResult;

/// Read and write access to a user's media library.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// All non-deleted media owned by `owner`, newest first.
    async fn find_media(&self, owner: &str) -> FrescoResult<Vec<MediaItem>>;

    /// Mark one media item as consumed.
    ///
    /// Returns `false` when no record matches `id`; marking an
    /// already-used item is a no-op that still returns `true`.
    async fn mark_used(
        &self,
        owner: &str,
        id: &str,
        timestamp: DateTime<Utc>,
    ) -> FrescoResult<bool>;
}

/// Read access to user notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Notes applying to a run targeting `month`: the always-valid set plus
    /// the month-scoped set, newest first.
    async fn find_notes(&self, owner: &str, month: MonthKey) -> FrescoResult<Vec<Note>>;
}

/// Read access to business profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Business profile for `owner`, when one exists.
    async fn find_profile(&self, owner: &str) -> FrescoResult<Option<BusinessProfile>>;
}

/// Read and write access to generated posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Posts scheduled since `since`, used as a duplication guard in prompts.
    async fn find_recent(
        &self,
        owner: &str,
        since: DateTime<Utc>,
    ) -> FrescoResult<Vec<GeneratedPost>>;

    /// Persist a reconciled batch. All-or-nothing: implementations must not
    /// leave a partial batch behind on failure.
    async fn insert_posts(&self, owner: &str, posts: &[GeneratedPost]) -> FrescoResult<()>;
}

/// Read-only access to externally computed performance insights.
#[async_trait]
pub trait InsightsSource: Send + Sync {
    /// Latest performance summary for `owner`, when the metrics system has one.
    async fn performance_summary(
        &self,
        owner: &str,
    ) -> FrescoResult<Option<PerformanceSummary>>;
}
