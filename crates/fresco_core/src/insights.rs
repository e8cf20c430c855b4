//! Opaque performance insights consumed by prompt assembly.

use serde::{Deserialize, Serialize};

/// Aggregated performance data produced by an external metrics system.
///
/// Consumed read-only; this pipeline never computes or updates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceSummary {
    /// Whether enough history exists for the recommendations to mean anything
    pub has_insights: bool,
    /// Hashtags that performed well recently
    pub recommended_hashtags: Vec<String>,
    /// Keywords that performed well recently
    pub recommended_keywords: Vec<String>,
    /// Topics that performed well recently
    pub recommended_topics: Vec<String>,
    /// Post length (characters) that performed best
    pub optimal_length: Option<usize>,
}
