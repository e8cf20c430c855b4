//! Generation policy and provider selection.
//!
//! The policy is an explicit value object passed into prompt assembly so
//! tests can substitute policies freely. Provider selection is a pure
//! decision table over the policy, unit-testable with no network in sight.

use fresco_core::{BrandObjective, BrandTone, BusinessProfile, Platform};

/// Hard content rules every batch must obey.
///
/// These are business invariants downstream components cannot verify
/// structurally; they ride the prompt as non-negotiable instructions.
const DEFAULT_HARD_RULES: &[&str] = &[
    "Never invent discounts, sales, or promotions. Mention an offer only if the business notes explicitly state it.",
    "Never fabricate product claims, prices, or availability.",
    "Write in the business's language and voice; do not address the reader as a marketing agency would.",
];

/// Value object steering one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPolicy {
    /// What the content should achieve
    pub objective: BrandObjective,
    /// Voice of the content
    pub tone: BrandTone,
    /// Destination network for this batch
    pub platform: Platform,
    /// Non-negotiable content rules rendered into the prompt
    pub hard_rules: Vec<String>,
}

impl GenerationPolicy {
    /// Policy for a profile publishing to `platform`, with the default
    /// hard rules.
    pub fn for_profile(profile: &BusinessProfile, platform: Platform) -> Self {
        Self {
            objective: profile.objective,
            tone: profile.tone,
            platform,
            hard_rules: DEFAULT_HARD_RULES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The two provider roles the pipeline can rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderKind {
    /// Narrative-leaning provider (storytelling, community voice)
    #[display("narrative")]
    Narrative,
    /// Structured-business provider (conversion copy, tight formats)
    #[display("structured")]
    Structured,
}

impl ProviderKind {
    /// The other provider, which always becomes the backup.
    pub fn other(self) -> Self {
        match self {
            ProviderKind::Narrative => ProviderKind::Structured,
            ProviderKind::Structured => ProviderKind::Narrative,
        }
    }
}

/// Primary/backup ordering produced by the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderRanking {
    /// Provider tried first
    pub primary: ProviderKind,
    /// Provider tried after a primary failure
    pub backup: ProviderKind,
}

/// One row of the selection table. `None` fields match anything; the
/// first matching row wins.
struct SelectionRule {
    objective: Option<BrandObjective>,
    tone: Option<BrandTone>,
    platform: Option<Platform>,
    primary: ProviderKind,
}

const SELECTION_TABLE: &[SelectionRule] = &[
    // Conversion work wants tight, structured copy regardless of voice
    SelectionRule {
        objective: Some(BrandObjective::Conversion),
        tone: None,
        platform: None,
        primary: ProviderKind::Structured,
    },
    // Community and storytelling objectives read best from the narrative model
    SelectionRule {
        objective: Some(BrandObjective::Community),
        tone: None,
        platform: None,
        primary: ProviderKind::Narrative,
    },
    // LinkedIn audiences expect structured business writing
    SelectionRule {
        objective: None,
        tone: None,
        platform: Some(Platform::LinkedIn),
        primary: ProviderKind::Structured,
    },
    // A playful voice leans narrative wherever it publishes
    SelectionRule {
        objective: None,
        tone: Some(BrandTone::Playful),
        platform: None,
        primary: ProviderKind::Narrative,
    },
];

const FALLBACK_PRIMARY: ProviderKind = ProviderKind::Narrative;

/// Rank providers for a policy. Pure function of
/// {objective, tone, platform}; the non-selected provider is the backup.
pub fn select_providers(policy: &GenerationPolicy) -> ProviderRanking {
    let primary = SELECTION_TABLE
        .iter()
        .find(|rule| {
            rule.objective.is_none_or(|o| o == policy.objective)
                && rule.tone.is_none_or(|t| t == policy.tone)
                && rule.platform.is_none_or(|p| p == policy.platform)
        })
        .map(|rule| rule.primary)
        .unwrap_or(FALLBACK_PRIMARY);

    ProviderRanking {
        primary,
        backup: primary.other(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(
        objective: BrandObjective,
        tone: BrandTone,
        platform: Platform,
    ) -> GenerationPolicy {
        GenerationPolicy {
            objective,
            tone,
            platform,
            hard_rules: Vec::new(),
        }
    }

    #[test]
    fn conversion_prefers_structured() {
        let ranking = select_providers(&policy(
            BrandObjective::Conversion,
            BrandTone::Playful,
            Platform::Instagram,
        ));
        assert_eq!(ranking.primary, ProviderKind::Structured);
        assert_eq!(ranking.backup, ProviderKind::Narrative);
    }

    #[test]
    fn community_prefers_narrative() {
        let ranking = select_providers(&policy(
            BrandObjective::Community,
            BrandTone::Professional,
            Platform::LinkedIn,
        ));
        assert_eq!(ranking.primary, ProviderKind::Narrative);
    }

    #[test]
    fn linkedin_prefers_structured_when_objective_is_neutral() {
        let ranking = select_providers(&policy(
            BrandObjective::Awareness,
            BrandTone::Professional,
            Platform::LinkedIn,
        ));
        assert_eq!(ranking.primary, ProviderKind::Structured);
    }

    #[test]
    fn backup_is_always_the_other_provider() {
        for objective in [
            BrandObjective::Community,
            BrandObjective::Conversion,
            BrandObjective::Awareness,
            BrandObjective::Loyalty,
        ] {
            let ranking =
                select_providers(&policy(objective, BrandTone::Friendly, Platform::Facebook));
            assert_ne!(ranking.primary, ranking.backup);
        }
    }

    #[test]
    fn fallback_is_narrative() {
        let ranking = select_providers(&policy(
            BrandObjective::Loyalty,
            BrandTone::Bold,
            Platform::Facebook,
        ));
        assert_eq!(ranking.primary, ProviderKind::Narrative);
    }

    #[test]
    fn default_policy_carries_the_promotion_rule() {
        let profile = BusinessProfile {
            owner: "u1".to_string(),
            name: "Cafe Luna".to_string(),
            category: fresco_core::BusinessCategory::Restaurant,
            description: String::new(),
            tone: BrandTone::Friendly,
            objective: BrandObjective::Community,
            platforms: vec![Platform::Instagram],
        };
        let policy = GenerationPolicy::for_profile(&profile, Platform::Instagram);
        assert!(policy.hard_rules.iter().any(|r| r.contains("discounts")));
    }
}
