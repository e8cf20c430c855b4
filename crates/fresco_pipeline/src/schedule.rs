//! Scheduling assignment.
//!
//! Spreads a reconciled batch across the target month. The spread is
//! monotonic but intentionally non-uniform: small batches front-load the
//! month rather than spacing out to its end.

use chrono::{DateTime, Days, Utc};
use fresco_core::{GeneratedPost, MonthKey, SchedulingPreference};
use tracing::{debug, instrument};

/// Publishing hours with the best observed engagement.
pub const OPTIMAL_HOURS: [u32; 6] = [9, 11, 13, 17, 19, 21];

const MORNING_HOURS: [u32; 2] = [9, 11];
const AFTERNOON_HOURS: [u32; 2] = [13, 17];
const EVENING_HOURS: [u32; 2] = [19, 21];

/// Assigns concrete publish dates inside one target month.
#[derive(Debug, Clone, Copy)]
pub struct SchedulingAssigner {
    target: MonthKey,
}

impl SchedulingAssigner {
    /// Assigner for a target month.
    pub fn new(target: MonthKey) -> Self {
        Self { target }
    }

    /// Set every post's `scheduled_date` and return the batch sorted
    /// ascending by date. Empty input is a no-op.
    #[instrument(skip(self, posts), fields(target = %self.target, count = posts.len()))]
    pub fn schedule(&self, mut posts: Vec<GeneratedPost>) -> Vec<GeneratedPost> {
        let n = posts.len();
        if n == 0 {
            return posts;
        }

        let month_start = self.target.month_start();

        for (i, post) in posts.iter_mut().enumerate() {
            let day_offset = (i * 30) / n + 1;
            let hour = pick_hour(i, post.scheduling_preference);
            let date = month_start
                .checked_add_days(Days::new(day_offset as u64))
                .unwrap_or(month_start)
                .and_hms_opt(hour, 0, 0)
                .unwrap_or_else(|| month_start.and_hms_opt(12, 0, 0).unwrap());
            post.scheduled_date = Some(DateTime::<Utc>::from_naive_utc_and_offset(date, Utc));
        }

        posts.sort_by_key(|p| p.scheduled_date);

        debug!(count = n, "Assigned publishing schedule");
        posts
    }
}

/// Deterministic pseudo-random pick from the optimal-hour set, restricted
/// to the post's preferred window when it has one.
fn pick_hour(index: usize, preference: Option<SchedulingPreference>) -> u32 {
    let pool: &[u32] = match preference {
        Some(SchedulingPreference::Morning) => &MORNING_HOURS,
        Some(SchedulingPreference::Afternoon) => &AFTERNOON_HOURS,
        Some(SchedulingPreference::Evening) => &EVENING_HOURS,
        None => &OPTIMAL_HOURS,
    };
    // Index mixing keeps adjacent posts off the same hour without an RNG
    pool[(index.wrapping_mul(31).wrapping_add(17)) % pool.len()]
}
