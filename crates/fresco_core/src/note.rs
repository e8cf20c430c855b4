//! User notes scoped to a month or always valid.

use crate::MonthKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note the user left for content generation.
///
/// Notes either apply to every run (`always_valid`) or only to runs
/// targeting their `month_scope`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Note identifier
    pub id: String,
    /// Note body (promotions mentioned here may appear in posts)
    pub content: String,
    /// Whether the note applies to every generation run
    pub always_valid: bool,
    /// Month the note applies to, when not always valid
    pub month_scope: Option<MonthKey>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Whether this note applies to a run targeting `month`.
    pub fn applies_to(&self, month: MonthKey) -> bool {
        self.always_valid || self.month_scope == Some(month)
    }
}
