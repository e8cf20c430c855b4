//! In-memory implementation of the repository traits.
//!
//! HashMap-based store keyed by owner, protected by RwLocks for
//! thread-safe access. Backs tests and the fixture mode of the CLI; all
//! data is lost when the store is dropped.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fresco_core::{
    BusinessProfile, GeneratedPost, MediaItem, MonthKey, Note, PerformanceSummary,
};
use fresco_error::FrescoResult;
use fresco_interface::{
    InsightsSource, MediaRepository, NoteRepository, PostRepository, ProfileRepository,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store implementing every repository trait.
///
/// # Example
/// ```no_run
/// use fresco_storage::MemoryStore;
///
/// #[tokio::main]
/// async fn main() {
///     let store = MemoryStore::new();
///     // Seed with insert_media(), set_profile(), etc.
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    media: Arc<RwLock<HashMap<String, Vec<MediaItem>>>>,
    notes: Arc<RwLock<HashMap<String, Vec<Note>>>>,
    posts: Arc<RwLock<HashMap<String, Vec<GeneratedPost>>>>,
    profiles: Arc<RwLock<HashMap<String, BusinessProfile>>>,
    summaries: Arc<RwLock<HashMap<String, PerformanceSummary>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a media item.
    pub async fn insert_media(&self, owner: &str, item: MediaItem) {
        self.media
            .write()
            .await
            .entry(owner.to_string())
            .or_default()
            .push(item);
    }

    /// Seed a note.
    pub async fn insert_note(&self, owner: &str, note: Note) {
        self.notes
            .write()
            .await
            .entry(owner.to_string())
            .or_default()
            .push(note);
    }

    /// Seed or replace a business profile.
    pub async fn set_profile(&self, profile: BusinessProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.owner.clone(), profile);
    }

    /// Seed or replace a performance summary.
    pub async fn set_summary(&self, owner: &str, summary: PerformanceSummary) {
        self.summaries
            .write()
            .await
            .insert(owner.to_string(), summary);
    }

    /// Number of persisted posts for an owner (for testing).
    pub async fn post_count(&self, owner: &str) -> usize {
        self.posts
            .read()
            .await
            .get(owner)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Snapshot of an owner's media including usage flags (for testing).
    pub async fn media_snapshot(&self, owner: &str) -> Vec<MediaItem> {
        self.media
            .read()
            .await
            .get(owner)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MediaRepository for MemoryStore {
    async fn find_media(&self, owner: &str) -> FrescoResult<Vec<MediaItem>> {
        let media = self.media.read().await;
        let mut items: Vec<MediaItem> = media
            .get(owner)
            .map(|items| items.iter().filter(|m| !m.deleted).cloned().collect())
            .unwrap_or_default();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn mark_used(
        &self,
        owner: &str,
        id: &str,
        timestamp: DateTime<Utc>,
    ) -> FrescoResult<bool> {
        let mut media = self.media.write().await;
        let Some(items) = media.get_mut(owner) else {
            return Ok(false);
        };
        let Some(item) = items
            .iter_mut()
            .find(|m| (!m.id.is_empty() && m.id == id) || m.storage_key == id)
        else {
            return Ok(false);
        };
        if !item.used {
            item.used = true;
            item.used_at = Some(timestamp);
        }
        Ok(true)
    }
}

#[async_trait]
impl NoteRepository for MemoryStore {
    async fn find_notes(&self, owner: &str, month: MonthKey) -> FrescoResult<Vec<Note>> {
        let notes = self.notes.read().await;
        let mut scoped: Vec<Note> = notes
            .get(owner)
            .map(|notes| {
                notes
                    .iter()
                    .filter(|n| n.applies_to(month))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        scoped.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(scoped)
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_profile(&self, owner: &str) -> FrescoResult<Option<BusinessProfile>> {
        Ok(self.profiles.read().await.get(owner).cloned())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_recent(
        &self,
        owner: &str,
        since: DateTime<Utc>,
    ) -> FrescoResult<Vec<GeneratedPost>> {
        let posts = self.posts.read().await;
        Ok(posts
            .get(owner)
            .map(|posts| {
                posts
                    .iter()
                    .filter(|p| p.scheduled_date.is_some_and(|d| d >= since))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_posts(&self, owner: &str, posts: &[GeneratedPost]) -> FrescoResult<()> {
        // Single write under one lock keeps the batch all-or-nothing
        self.posts
            .write()
            .await
            .entry(owner.to_string())
            .or_default()
            .extend_from_slice(posts);
        tracing::debug!(owner, count = posts.len(), "Persisted post batch");
        Ok(())
    }
}

#[async_trait]
impl InsightsSource for MemoryStore {
    async fn performance_summary(
        &self,
        owner: &str,
    ) -> FrescoResult<Option<PerformanceSummary>> {
        Ok(self.summaries.read().await.get(owner).cloned())
    }
}
