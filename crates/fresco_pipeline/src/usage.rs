//! Usage tracking.
//!
//! Marks the media consumed by a persisted batch. References arrive in
//! several historical formats, so resolution walks an ordered list of
//! lookup strategies and stops at the first hit. A reference nothing
//! matches is logged and skipped; it never rolls back the batch.

use chrono::{DateTime, Utc};
use fresco_core::{GeneratedPost, MediaItem};
use fresco_interface::MediaRepository;
use fresco_storage::{is_legacy_id, media_id_from_key};
use crate::inventory::ContentInventory;
use tracing::{debug, instrument, warn};

/// Lookup strategies tried in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupStrategy {
    /// Match the native id field
    NativeId,
    /// Match the storage key, raw or id-extracted
    StorageKey,
    /// Match the 24-character legacy identifier
    LegacyId,
}

const LOOKUP_ORDER: [LookupStrategy; 3] = [
    LookupStrategy::NativeId,
    LookupStrategy::StorageKey,
    LookupStrategy::LegacyId,
];

/// Marks consumed media against the run's read-only snapshot.
pub struct UsageTracker<'a> {
    media: &'a [MediaItem],
}

impl<'a> UsageTracker<'a> {
    /// Tracker over the media snapshot taken at the start of the run.
    pub fn new(media: &'a [MediaItem]) -> Self {
        Self { media }
    }

    /// Resolve a reference to a media item, trying each lookup strategy
    /// in order and short-circuiting on the first hit.
    pub fn resolve(&self, reference: &str) -> Option<&MediaItem> {
        LOOKUP_ORDER
            .iter()
            .find_map(|strategy| self.lookup(*strategy, reference))
    }

    fn lookup(&self, strategy: LookupStrategy, reference: &str) -> Option<&MediaItem> {
        match strategy {
            LookupStrategy::NativeId => self
                .media
                .iter()
                .find(|m| !m.id.is_empty() && m.id == reference),
            LookupStrategy::StorageKey => self.media.iter().find(|m| {
                m.storage_key == reference || media_id_from_key(&m.storage_key) == reference
            }),
            LookupStrategy::LegacyId => {
                if !is_legacy_id(reference) {
                    return None;
                }
                self.media
                    .iter()
                    .find(|m| m.legacy_id.as_deref() == Some(reference))
            }
        }
    }

    /// Mark every media item referenced by the batch as used.
    ///
    /// Carousel references fan out to each grouped member. Returns the
    /// number of items marked; misses are logged, never fatal.
    #[instrument(skip_all, fields(posts = posts.len()))]
    pub async fn mark_batch<R: MediaRepository>(
        &self,
        repo: &R,
        owner: &str,
        posts: &[GeneratedPost],
        inventory: &ContentInventory,
        timestamp: DateTime<Utc>,
    ) -> usize {
        let mut marked = 0;

        for post in posts {
            let Some(reference) = post.visual_id.as_deref() else {
                continue;
            };

            // A carousel reference means every grouped member was published
            let references: Vec<String> = match inventory.find(reference) {
                Some(source) if source.is_carousel() => source.members.clone(),
                _ => vec![reference.to_string()],
            };

            for reference in references {
                match self.resolve(&reference) {
                    Some(item) => {
                        // Legacy records without a native id are addressed
                        // by their storage key
                        let canonical = if item.id.is_empty() {
                            item.storage_key.as_str()
                        } else {
                            item.id.as_str()
                        };
                        match repo.mark_used(owner, canonical, timestamp).await {
                            Ok(true) => marked += 1,
                            Ok(false) => {
                                warn!(reference = %reference, "Media vanished between snapshot and marking")
                            }
                            Err(e) => {
                                // Tracking failures must not unwind the batch
                                warn!(reference = %reference, error = %e, "Failed to mark media as used")
                            }
                        }
                    }
                    None => {
                        warn!(reference = %reference, "No media matched any lookup strategy");
                    }
                }
            }
        }

        debug!(marked, "Usage tracking complete");
        marked
    }
}
