//! Response reconciliation.
//!
//! Maps raw LLM output onto real inventory references and enforces the
//! output contract: strict JSON under a `posts` key, at most the requested
//! number of posts, every post typed. Decode failures fail closed to an
//! empty batch; unknown image references downgrade the post instead of
//! discarding it.

use crate::extraction::{extract_json, parse_json};
use crate::inventory::ContentInventory;
use fresco_core::{
    ContentCategory, GeneratedPost, Platform, PostStatus, SchedulingPreference,
};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Category assigned when the model omits or invents a content type.
/// Value content is safe: it carries no promotional claims.
const DEFAULT_CATEGORY: ContentCategory = ContentCategory::Value;

#[derive(Debug, Deserialize)]
struct RawBatch {
    posts: Vec<RawPost>,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(default)]
    content_type: Option<String>,
    text: String,
    #[serde(default)]
    hashtags: Vec<String>,
    title: String,
    #[serde(default)]
    visual_id: Option<String>,
    #[serde(default)]
    scheduling_preference: Option<SchedulingPreference>,
}

/// Reconciles one raw response into validated posts.
#[derive(Debug, Clone, Copy)]
pub struct ResponseReconciler {
    platform: Platform,
}

impl ResponseReconciler {
    /// Reconciler producing posts for one destination platform.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Validate a raw response against the count contract and the
    /// inventory, producing at most `expected` posts.
    ///
    /// Fails closed: a response that is not valid JSON under a `posts`
    /// key yields an empty batch rather than guessed content.
    #[instrument(skip(self, raw, inventory), fields(raw_len = raw.len()))]
    pub fn reconcile(
        &self,
        raw: &str,
        inventory: &ContentInventory,
        expected: usize,
    ) -> Vec<GeneratedPost> {
        let json = match extract_json(raw) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Response contained no JSON, failing closed");
                return Vec::new();
            }
        };

        let batch: RawBatch = match parse_json(&json) {
            Ok(batch) => batch,
            Err(e) => {
                warn!(error = %e, "Response JSON did not match the posts contract, failing closed");
                return Vec::new();
            }
        };

        let returned = batch.posts.len();
        if returned > expected {
            warn!(
                returned,
                expected, "Model over-delivered, truncating to the requested count"
            );
        } else if returned < expected {
            // Under-delivery is accepted as-is; synthesizing filler posts
            // would put words in the business's mouth
            warn!(returned, expected, "Model under-delivered, accepting the short batch");
        }

        let posts: Vec<GeneratedPost> = batch
            .posts
            .into_iter()
            .take(expected)
            .map(|raw_post| self.build_post(raw_post, inventory))
            .collect();

        debug!(count = posts.len(), "Reconciled response batch");
        posts
    }

    fn build_post(&self, raw: RawPost, inventory: &ContentInventory) -> GeneratedPost {
        let content_type = raw
            .content_type
            .as_deref()
            .and_then(|s| s.parse::<ContentCategory>().ok())
            .unwrap_or(DEFAULT_CATEGORY);

        let reference = raw.visual_id.as_deref().filter(|id| !id.trim().is_empty());

        let (visual_url, visual_id, status) = match reference.and_then(|id| inventory.find(id))
        {
            Some(source) => (
                source.visual_url.clone(),
                Some(source.id.clone()),
                PostStatus::WithImage,
            ),
            None => {
                if let Some(id) = reference {
                    warn!(visual_id = id, "Post references unknown media, downgrading to needs_image");
                }
                (String::new(), None, PostStatus::NeedsImage)
            }
        };

        GeneratedPost {
            visual_url,
            visual_id,
            title: raw.title,
            text: raw.text,
            hashtags: raw.hashtags,
            platform: self.platform,
            content_type,
            status,
            scheduling_preference: raw.scheduling_preference,
            scheduled_date: None,
        }
    }
}
