//! Media records and the normalized content sources built from them.

use crate::MonthKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a media item came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum MediaOrigin {
    /// Uploaded by the user
    #[display("upload")]
    Upload,
    /// Stock-photo fallback attached to the account
    #[display("stock_photo")]
    StockPhoto,
}

/// A stored media record owned by a user.
///
/// Created on upload, mutated only by usage tracking, never deleted by the
/// pipeline. Legacy records may carry an empty native `id` or a 24-character
/// `legacy_id` from an earlier identifier scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Native identifier (may be empty on legacy records)
    pub id: String,
    /// Display title
    pub title: Option<String>,
    /// Free-form description supplied at upload time
    pub context: Option<String>,
    /// Public URL of the visual
    pub visual_url: String,
    /// MIME type (e.g. "image/jpeg")
    pub file_type: String,
    /// Explicit month this item was uploaded for
    pub attributed_month: Option<MonthKey>,
    /// Carousel group key shared by items published together
    pub carousel_id: Option<String>,
    /// Upload vs stock-photo fallback
    pub origin: MediaOrigin,
    /// Backend storage key (path-like)
    pub storage_key: String,
    /// 24-character identifier from the legacy scheme
    pub legacy_id: Option<String>,
    /// Whether this item was consumed by a previous run
    pub used: bool,
    /// When this item was consumed
    pub used_at: Option<DateTime<Utc>>,
    /// Upload timestamp
    pub created_at: DateTime<Utc>,
    /// Soft-delete flag
    pub deleted: bool,
}

/// A normalized unit of publishable content handed to the LLM step.
///
/// Either a single media item or a synthetic carousel group. A carousel's
/// `id` equals its `carousel_id`, its context is prefixed with the element
/// count, and `members` holds the native ids of every grouped item so the
/// id stays resolvable for usage tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSource {
    /// Resolvable identifier (media id, storage-key fallback, or carousel id)
    pub id: String,
    /// Display title
    pub title: String,
    /// Description passed to the prompt (already truncated)
    pub context: String,
    /// Public URL of the representative visual
    pub visual_url: String,
    /// MIME type of the representative visual
    pub file_type: String,
    /// Explicit month tag carried over from the media record
    pub attributed_month: Option<MonthKey>,
    /// Upload vs stock-photo fallback
    pub origin: MediaOrigin,
    /// Native ids of grouped members (empty for standalone items)
    pub members: Vec<String>,
}

impl ContentSource {
    /// Whether this source is a multi-image carousel group.
    pub fn is_carousel(&self) -> bool {
        self.members.len() >= 2
    }

    /// Number of images this source publishes (1 for standalone items).
    pub fn image_count(&self) -> usize {
        self.members.len().max(1)
    }
}
