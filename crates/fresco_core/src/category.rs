//! Content categories and per-category post quotas.

use serde::{Deserialize, Serialize};

/// Category of a generated post.
///
/// Declaration order matters: strategy ratio tables and remainder
/// redistribution iterate categories in this order.
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
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    /// Product or offering showcases
    #[display("product")]
    Product,
    /// Behind-the-scenes glimpses of the business
    #[display("behind_the_scenes")]
    BehindTheScenes,
    /// Value content: tips, inspiration, community stories
    #[display("value")]
    Value,
    /// Promotions and calls to action
    #[display("promotion")]
    Promotion,
    /// Educational or how-to content
    #[display("educational")]
    Educational,
}

impl std::str::FromStr for ContentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(ContentCategory::Product),
            "behind_the_scenes" => Ok(ContentCategory::BehindTheScenes),
            "value" => Ok(ContentCategory::Value),
            "promotion" => Ok(ContentCategory::Promotion),
            "educational" => Ok(ContentCategory::Educational),
            _ => Err(format!("Unknown content category: {}", s)),
        }
    }
}

/// Business vertical used to select a content mix.
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
pub enum BusinessCategory {
    /// Online retail
    #[display("ecommerce")]
    Ecommerce,
    /// Service businesses (consultants, agencies, trades)
    #[display("service")]
    Service,
    /// Restaurants, cafes, food trucks
    #[display("restaurant")]
    Restaurant,
    /// Anything else
    #[display("other")]
    Other,
}

impl std::str::FromStr for BusinessCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ecommerce" => Ok(BusinessCategory::Ecommerce),
            "service" => Ok(BusinessCategory::Service),
            "restaurant" => Ok(BusinessCategory::Restaurant),
            "other" => Ok(BusinessCategory::Other),
            _ => Err(format!("Unknown business category: {}", s)),
        }
    }
}

/// Per-category post quota for one generation run.
///
/// Entries keep their insertion order, which is the ratio-table order the
/// planner used. The quota values sum exactly to the requested post count.
///
/// # Examples
///
/// ```
/// use fresco_core::{ContentCategory, ContentStrategy};
///
/// let mut strategy = ContentStrategy::default();
/// strategy.push(ContentCategory::Product, 3);
/// strategy.push(ContentCategory::Value, 2);
/// assert_eq!(strategy.total(), 5);
/// assert_eq!(strategy.get(ContentCategory::Product), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContentStrategy {
    quotas: Vec<(ContentCategory, usize)>,
}

impl ContentStrategy {
    /// Append a category quota, preserving table order.
    pub fn push(&mut self, category: ContentCategory, count: usize) {
        self.quotas.push((category, count));
    }

    /// Quota for one category (0 when absent).
    pub fn get(&self, category: ContentCategory) -> usize {
        self.quotas
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Add one post to an existing category quota.
    pub fn increment(&mut self, category: ContentCategory) {
        if let Some(entry) = self.quotas.iter_mut().find(|(c, _)| *c == category) {
            entry.1 += 1;
        } else {
            self.quotas.push((category, 1));
        }
    }

    /// Sum of all quotas.
    pub fn total(&self) -> usize {
        self.quotas.iter().map(|(_, n)| n).sum()
    }

    /// Iterate quotas in table order.
    pub fn iter(&self) -> impl Iterator<Item = &(ContentCategory, usize)> {
        self.quotas.iter()
    }

    /// Whether no category carries a quota.
    pub fn is_empty(&self) -> bool {
        self.quotas.is_empty()
    }
}
