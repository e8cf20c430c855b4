//! Generated post records and publishing enums.

use crate::ContentCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image status of a generated post.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// The post references a resolvable media item
    #[display("with_image")]
    WithImage,
    /// No usable image yet; manual assignment is a valid later step
    #[display("needs_image")]
    NeedsImage,
}

/// Target social network.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Platform {
    /// Facebook pages
    #[serde(rename = "facebook")]
    #[display("facebook")]
    Facebook,
    /// Instagram business accounts
    #[serde(rename = "instagram")]
    #[display("instagram")]
    Instagram,
    /// LinkedIn company pages
    #[serde(rename = "linkedin")]
    #[display("linkedin")]
    LinkedIn,
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            "linkedin" => Ok(Platform::LinkedIn),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// Time-of-day window the model suggested for publishing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPreference {
    /// Early engagement window
    #[display("morning")]
    Morning,
    /// Midday engagement window
    #[display("afternoon")]
    Afternoon,
    /// Evening engagement window
    #[display("evening")]
    Evening,
}

/// A validated post produced by reconciliation.
///
/// Created by the response reconciler, mutated once by the scheduling
/// assigner (which sets `scheduled_date`), terminal once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPost {
    /// URL of the visual ("" while status is `NeedsImage`)
    pub visual_url: String,
    /// Inventory id the post references, when resolvable
    pub visual_id: Option<String>,
    /// Post title
    pub title: String,
    /// Post body
    pub text: String,
    /// Hashtags without the leading '#'
    pub hashtags: Vec<String>,
    /// Destination network
    pub platform: Platform,
    /// Content category assigned by the model (or the safe default)
    pub content_type: ContentCategory,
    /// Image status
    pub status: PostStatus,
    /// Publishing window suggested by the model
    pub scheduling_preference: Option<SchedulingPreference>,
    /// Concrete publish instant, set by the scheduling assigner
    pub scheduled_date: Option<DateTime<Utc>>,
}
