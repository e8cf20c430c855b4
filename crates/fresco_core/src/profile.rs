//! Business profile types feeding prompt assembly and provider selection.

use crate::{BusinessCategory, Platform};
use serde::{Deserialize, Serialize};

/// Voice the generated content should carry.
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
pub enum BrandTone {
    /// Polished and formal
    #[display("professional")]
    Professional,
    /// Warm and conversational
    #[display("friendly")]
    Friendly,
    /// Irreverent and fun
    #[display("playful")]
    Playful,
    /// Direct and confident
    #[display("bold")]
    Bold,
}

/// What the business wants its content to achieve.
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
pub enum BrandObjective {
    /// Community building and storytelling
    #[display("community")]
    Community,
    /// Driving sales and sign-ups
    #[display("conversion")]
    Conversion,
    /// Reach and brand recognition
    #[display("awareness")]
    Awareness,
    /// Retention of existing customers
    #[display("loyalty")]
    Loyalty,
}

/// A user's business profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Owning user id
    pub owner: String,
    /// Business display name
    pub name: String,
    /// Vertical used to select the content mix
    pub category: BusinessCategory,
    /// Short description used as prompt context
    pub description: String,
    /// Voice of the content
    pub tone: BrandTone,
    /// Primary objective of the content
    pub objective: BrandObjective,
    /// Connected publishing destinations (empty means nothing to publish to)
    pub platforms: Vec<Platform>,
}
