//! Content strategy planning.
//!
//! Computes the per-category post quota for a run. The quota values sum
//! exactly to the requested post count: fractional ratio quotas are
//! floored, then the leftover budget is redistributed one unit at a time
//! across categories in table order.

use fresco_core::ContentCategory::{BehindTheScenes, Educational, Product, Promotion, Value};
use fresco_core::{BusinessCategory, ContentCategory, ContentStrategy};
use tracing::{debug, instrument};

const ECOMMERCE_MIX: &[(ContentCategory, f64)] = &[
    (Product, 0.4),
    (Promotion, 0.2),
    (Value, 0.2),
    (Educational, 0.1),
    (BehindTheScenes, 0.1),
];

const SERVICE_MIX: &[(ContentCategory, f64)] = &[
    (Value, 0.3),
    (Educational, 0.3),
    (Product, 0.2),
    (BehindTheScenes, 0.1),
    (Promotion, 0.1),
];

const RESTAURANT_MIX: &[(ContentCategory, f64)] = &[
    (Product, 0.4),
    (BehindTheScenes, 0.3),
    (Value, 0.1),
    (Promotion, 0.1),
    (Educational, 0.1),
];

const DEFAULT_MIX: &[(ContentCategory, f64)] = &[
    (Product, 0.3),
    (Value, 0.25),
    (Educational, 0.2),
    (BehindTheScenes, 0.15),
    (Promotion, 0.1),
];

/// Plans the content mix for a generation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyPlanner;

impl StrategyPlanner {
    /// Ratio table for a business vertical.
    fn mix_for(category: BusinessCategory) -> &'static [(ContentCategory, f64)] {
        match category {
            BusinessCategory::Ecommerce => ECOMMERCE_MIX,
            BusinessCategory::Service => SERVICE_MIX,
            BusinessCategory::Restaurant => RESTAURANT_MIX,
            BusinessCategory::Other => DEFAULT_MIX,
        }
    }

    /// Compute the per-category quota for `num_posts`.
    ///
    /// Deterministic for identical inputs. Remainder ties break in table
    /// order; changing the tie-break policy means reordering the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use fresco_core::BusinessCategory;
    /// use fresco_pipeline::StrategyPlanner;
    ///
    /// let strategy = StrategyPlanner::plan(BusinessCategory::Restaurant, 10);
    /// assert_eq!(strategy.total(), 10);
    /// ```
    #[instrument]
    pub fn plan(category: BusinessCategory, num_posts: usize) -> ContentStrategy {
        let mix = Self::mix_for(category);
        let mut strategy = ContentStrategy::default();
        let mut remaining = num_posts;

        for (content_type, ratio) in mix {
            if remaining == 0 {
                break;
            }
            let raw = ((num_posts as f64) * ratio).floor() as usize;
            let count = raw.max(1).min(remaining);
            strategy.push(*content_type, count);
            remaining -= count;
        }

        // Floored ratios can leave budget behind; hand it out one post at
        // a time in table order until the sum is exact
        while remaining > 0 {
            for (content_type, _) in mix {
                if remaining == 0 {
                    break;
                }
                strategy.increment(*content_type);
                remaining -= 1;
            }
        }

        debug!(
            category = %category,
            num_posts,
            total = strategy.total(),
            "Planned content strategy"
        );

        strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn quotas_sum_exactly_for_every_category_and_count() {
        let categories = [
            BusinessCategory::Ecommerce,
            BusinessCategory::Service,
            BusinessCategory::Restaurant,
            BusinessCategory::Other,
        ];
        for category in categories {
            for num_posts in 1..=60 {
                let strategy = StrategyPlanner::plan(category, num_posts);
                assert_eq!(
                    strategy.total(),
                    num_posts,
                    "sum broke for {category} with {num_posts} posts"
                );
            }
        }
    }

    #[test]
    fn restaurant_mix_for_ten_posts() {
        let strategy = StrategyPlanner::plan(BusinessCategory::Restaurant, 10);
        assert_eq!(strategy.get(ContentCategory::Product), 4);
        assert_eq!(strategy.get(ContentCategory::BehindTheScenes), 3);
        assert_eq!(strategy.get(ContentCategory::Value), 1);
        assert_eq!(strategy.get(ContentCategory::Promotion), 1);
        assert_eq!(strategy.get(ContentCategory::Educational), 1);
    }

    #[test]
    fn leftover_redistributes_in_table_order() {
        // floor(12 * 0.4)=4, floor(12*0.3)=3, then 1+1+1 leaves 2 over;
        // the first two table entries each get one more
        let strategy = StrategyPlanner::plan(BusinessCategory::Restaurant, 12);
        assert_eq!(strategy.get(ContentCategory::Product), 5);
        assert_eq!(strategy.get(ContentCategory::BehindTheScenes), 4);
        assert_eq!(strategy.total(), 12);
    }

    #[test]
    fn tiny_budgets_cap_by_remaining() {
        let strategy = StrategyPlanner::plan(BusinessCategory::Restaurant, 3);
        assert_eq!(strategy.total(), 3);
        // Only the first three table entries get their minimum of one
        assert_eq!(strategy.get(ContentCategory::Product), 1);
        assert_eq!(strategy.get(ContentCategory::BehindTheScenes), 1);
        assert_eq!(strategy.get(ContentCategory::Value), 1);
        assert_eq!(strategy.get(ContentCategory::Promotion), 0);
        assert_eq!(strategy.get(ContentCategory::Educational), 0);
    }

    #[test]
    fn planning_is_deterministic() {
        let a = StrategyPlanner::plan(BusinessCategory::Service, 17);
        let b = StrategyPlanner::plan(BusinessCategory::Service, 17);
        assert_eq!(a, b);
    }

    #[test]
    fn single_post_goes_to_the_first_table_entry() {
        let strategy = StrategyPlanner::plan(BusinessCategory::Ecommerce, 1);
        assert_eq!(strategy.get(ContentCategory::Product), 1);
        assert_eq!(strategy.total(), 1);
    }

    #[test]
    fn every_category_is_a_known_variant() {
        // Guards the ratio tables against a category being dropped from
        // the enum without the tables noticing
        let strategy = StrategyPlanner::plan(BusinessCategory::Other, 25);
        for (category, _) in strategy.iter() {
            assert!(ContentCategory::iter().any(|c| c == *category));
        }
    }
}
