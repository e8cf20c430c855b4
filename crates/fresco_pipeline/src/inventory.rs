//! Content inventory building.
//!
//! Partitions a user's media into month-relevance tiers, groups carousel
//! items, and normalizes everything into [`ContentSource`] units the LLM
//! step can reference by id. The inventory never silently loses items: an
//! item whose reference id cannot be extracted keeps its raw storage key.

use chrono::{DateTime, Utc};
use fresco_core::{ContentSource, MediaItem, MediaOrigin, MonthKey};
use fresco_storage::{media_id_from_key, title_from_key};
use tracing::{debug, instrument};

const MAX_CONTEXT_CHARS: usize = 200;
const FALLBACK_TITLE: &str = "Untitled";

/// Prioritized, carousel-aware inventory for one generation run.
#[derive(Debug, Clone, Default)]
pub struct ContentInventory {
    /// Multi-image carousel groups, priority-ordered
    pub carousels: Vec<ContentSource>,
    /// Standalone items, priority-ordered
    pub standalone: Vec<ContentSource>,
}

impl ContentInventory {
    /// Whether there is nothing to publish from.
    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty() && self.standalone.is_empty()
    }

    /// Total number of sources across both buckets.
    pub fn len(&self) -> usize {
        self.carousels.len() + self.standalone.len()
    }

    /// Look up a source by its resolvable id.
    pub fn find(&self, id: &str) -> Option<&ContentSource> {
        self.carousels
            .iter()
            .chain(self.standalone.iter())
            .find(|source| source.id == id)
    }

    /// Number of stock-photo fallback sources in the inventory.
    pub fn stock_count(&self) -> usize {
        self.carousels
            .iter()
            .chain(self.standalone.iter())
            .filter(|source| source.origin == MediaOrigin::StockPhoto)
            .count()
    }
}

/// Builds a [`ContentInventory`] from raw media records.
#[derive(Debug, Clone)]
pub struct InventoryBuilder {
    target: MonthKey,
    now: DateTime<Utc>,
}

impl InventoryBuilder {
    /// Create a builder for a target month. `now` anchors the
    /// current-month tier so runs are reproducible in tests.
    pub fn new(target: MonthKey, now: DateTime<Utc>) -> Self {
        Self { target, now }
    }

    /// Build the prioritized inventory.
    ///
    /// Tiers: (1) items tagged for the target month, (2) untagged items
    /// when the target is the current calendar month, (3) everything else.
    /// Within a tier, uploads sort before stock photos, newest first.
    #[instrument(skip(self, media), fields(target = %self.target, media = media.len()))]
    pub fn build(&self, media: &[MediaItem]) -> ContentInventory {
        let mut eligible: Vec<&MediaItem> = media.iter().filter(|m| !m.deleted).collect();
        eligible.sort_by(|a, b| {
            let rank_a = (self.tier(a), origin_rank(a.origin));
            let rank_b = (self.tier(b), origin_rank(b.origin));
            rank_a
                .cmp(&rank_b)
                .then(b.created_at.cmp(&a.created_at))
        });

        // Group by carousel id, preserving first-seen priority order
        let mut groups: Vec<(String, Vec<&MediaItem>)> = Vec::new();
        let mut standalone_items: Vec<&MediaItem> = Vec::new();

        for item in eligible {
            match &item.carousel_id {
                Some(carousel_id) => {
                    if let Some((_, members)) =
                        groups.iter_mut().find(|(id, _)| id == carousel_id)
                    {
                        members.push(item);
                    } else {
                        groups.push((carousel_id.clone(), vec![item]));
                    }
                }
                None => standalone_items.push(item),
            }
        }

        let mut inventory = ContentInventory::default();

        for (carousel_id, members) in groups {
            if members.len() >= 2 {
                inventory
                    .carousels
                    .push(carousel_source(&carousel_id, &members));
            } else {
                // Single-member "groups" degrade to standalone items
                standalone_items.push(members[0]);
            }
        }

        // Degraded singles land at the back of their tier bucket; re-rank
        // so the priority order survives the merge
        standalone_items.sort_by(|a, b| {
            let rank_a = (self.tier(a), origin_rank(a.origin));
            let rank_b = (self.tier(b), origin_rank(b.origin));
            rank_a
                .cmp(&rank_b)
                .then(b.created_at.cmp(&a.created_at))
        });

        inventory.standalone = standalone_items
            .into_iter()
            .map(standalone_source)
            .collect();

        debug!(
            carousels = inventory.carousels.len(),
            standalone = inventory.standalone.len(),
            "Built content inventory"
        );

        inventory
    }

    fn tier(&self, item: &MediaItem) -> u8 {
        match item.attributed_month {
            Some(month) if month == self.target => 0,
            None if MonthKey::from_date(&self.now) == self.target => 1,
            _ => 2,
        }
    }
}

fn origin_rank(origin: MediaOrigin) -> u8 {
    match origin {
        MediaOrigin::Upload => 0,
        MediaOrigin::StockPhoto => 1,
    }
}

/// Resolvable reference id for a single media item.
fn reference_id(item: &MediaItem) -> String {
    if item.id.is_empty() {
        media_id_from_key(&item.storage_key)
    } else {
        item.id.clone()
    }
}

fn truncate_context(context: &str) -> String {
    if context.chars().count() <= MAX_CONTEXT_CHARS {
        context.to_string()
    } else {
        context.chars().take(MAX_CONTEXT_CHARS).collect()
    }
}

fn item_title(item: &MediaItem) -> String {
    item.title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| title_from_key(&item.storage_key))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

fn standalone_source(item: &MediaItem) -> ContentSource {
    ContentSource {
        id: reference_id(item),
        title: item_title(item),
        context: truncate_context(item.context.as_deref().unwrap_or("")),
        visual_url: item.visual_url.clone(),
        file_type: item.file_type.clone(),
        attributed_month: item.attributed_month,
        origin: item.origin,
        members: Vec::new(),
    }
}

fn carousel_source(carousel_id: &str, members: &[&MediaItem]) -> ContentSource {
    let representative = members[0];
    let base_context = representative.context.as_deref().unwrap_or("");
    ContentSource {
        id: carousel_id.to_string(),
        title: item_title(representative),
        context: format!(
            "Carousel of {} images: {}",
            members.len(),
            truncate_context(base_context)
        ),
        visual_url: representative.visual_url.clone(),
        file_type: representative.file_type.clone(),
        attributed_month: representative.attributed_month,
        origin: representative.origin,
        members: members.iter().map(|m| reference_id(m)).collect(),
    }
}
