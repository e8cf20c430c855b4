//! Prompt assembly.
//!
//! Pure composition of business context, notes, publishing history, and
//! the content inventory into one generation request. No network or
//! storage access happens here; everything arrives as snapshots.

use crate::inventory::ContentInventory;
use crate::policy::GenerationPolicy;
use fresco_core::{
    BusinessProfile, ContentSource, ContentStrategy, GenerateRequest, GeneratedPost, Message,
    MonthKey, Note, PerformanceSummary,
};
use fresco_storage::MediaKind;
use std::fmt::Write;

/// Most recent notes rendered into a prompt.
pub const MAX_NOTES: usize = 10;
/// Most recent published posts digested for duplication avoidance.
pub const MAX_HISTORY: usize = 10;
/// Inventory entries rendered per bucket (carousels / standalone).
pub const MAX_SOURCES_PER_BUCKET: usize = 5;

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Everything the assembler needs for one run, as read-only snapshots.
#[derive(Debug)]
pub struct PromptContext<'a> {
    /// The business the batch is for
    pub profile: &'a BusinessProfile,
    /// Applicable notes (always-valid plus month-scoped), newest first
    pub notes: &'a [Note],
    /// Recently published posts, newest first
    pub history: &'a [GeneratedPost],
    /// Prioritized content inventory
    pub inventory: &'a ContentInventory,
    /// External performance insights, when available
    pub insights: Option<&'a PerformanceSummary>,
    /// Month the batch targets
    pub target: MonthKey,
    /// Exact number of posts to request
    pub num_posts: usize,
    /// Per-category quota
    pub strategy: &'a ContentStrategy,
}

/// Assembles one generation request from a policy and a context.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptAssembler;

impl PromptAssembler {
    /// Compose the generation request.
    pub fn assemble(policy: &GenerationPolicy, ctx: &PromptContext<'_>) -> GenerateRequest {
        GenerateRequest {
            messages: vec![
                Message::system(system_prompt(policy, ctx.profile)),
                Message::user(user_prompt(policy, ctx)),
            ],
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            temperature: Some(DEFAULT_TEMPERATURE),
            model: None,
        }
    }
}

fn system_prompt(policy: &GenerationPolicy, profile: &BusinessProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "You are the social media content writer for {}, a {} business.",
        profile.name, profile.category
    );
    let _ = writeln!(
        out,
        "Write with a {} tone. The goal of this batch is {}. Target platform: {}.",
        policy.tone, policy.objective, policy.platform
    );
    out.push_str("\nNon-negotiable rules:\n");
    for rule in &policy.hard_rules {
        let _ = writeln!(out, "- {}", rule);
    }
    out
}

fn user_prompt(policy: &GenerationPolicy, ctx: &PromptContext<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Create exactly {} social media posts for {} ({}).",
        ctx.num_posts, ctx.profile.name, ctx.target
    );
    if !ctx.profile.description.is_empty() {
        let _ = writeln!(out, "About the business: {}", ctx.profile.description);
    }

    out.push_str("\nContent mix for this batch:\n");
    for (category, count) in ctx.strategy.iter() {
        if *count > 0 {
            let _ = writeln!(out, "- {} posts of type \"{}\"", count, category);
        }
    }

    if !ctx.notes.is_empty() {
        out.push_str("\nNotes from the business (the only permitted source of offers and events):\n");
        for note in ctx.notes.iter().take(MAX_NOTES) {
            let _ = writeln!(out, "- {}", note.content);
        }
    }

    if !ctx.history.is_empty() {
        out.push_str("\nRecently published posts. Do not repeat their topics or wording:\n");
        for post in ctx.history.iter().take(MAX_HISTORY) {
            let _ = writeln!(out, "- {}", post.title);
        }
    }

    out.push_str("\nAvailable media. Reference items by their exact id in \"visual_id\":\n");
    if !ctx.inventory.carousels.is_empty() {
        out.push_str("Carousels:\n");
        for source in ctx.inventory.carousels.iter().take(MAX_SOURCES_PER_BUCKET) {
            push_source_line(&mut out, source);
        }
    }
    if !ctx.inventory.standalone.is_empty() {
        out.push_str("Single images:\n");
        for source in ctx.inventory.standalone.iter().take(MAX_SOURCES_PER_BUCKET) {
            push_source_line(&mut out, source);
        }
    }
    out.push_str(
        "Prefer items listed first. Leave \"visual_id\" empty for posts that need no media.\n",
    );

    if let Some(insights) = ctx.insights.filter(|s| s.has_insights) {
        out.push_str("\nPerformance insights from past posts:\n");
        if !insights.recommended_topics.is_empty() {
            let _ = writeln!(out, "- Topics that work: {}", insights.recommended_topics.join(", "));
        }
        if !insights.recommended_hashtags.is_empty() {
            let _ = writeln!(
                out,
                "- Hashtags that work: {}",
                insights.recommended_hashtags.join(", ")
            );
        }
        if !insights.recommended_keywords.is_empty() {
            let _ = writeln!(
                out,
                "- Keywords that work: {}",
                insights.recommended_keywords.join(", ")
            );
        }
        if let Some(length) = insights.optimal_length {
            let _ = writeln!(out, "- Best-performing post length: about {} characters", length);
        }
    }

    let _ = write!(
        out,
        "\nOutput format. Respond with ONLY valid JSON, no commentary, no markdown fences:\n\
         {{\"posts\": [{{\"content_type\": \"...\", \"text\": \"...\", \"hashtags\": [\"...\"], \
         \"title\": \"...\", \"visual_id\": \"...\", \
         \"scheduling_preference\": \"morning\"|\"afternoon\"|\"evening\"}}]}}\n\
         The \"posts\" array must contain exactly {} entries for {}.",
        ctx.num_posts, policy.platform
    );

    out
}

fn push_source_line(out: &mut String, source: &ContentSource) {
    let kind = MediaKind::from_mime(&source.file_type);
    let mut tags = vec![kind.as_str().to_string()];
    if source.is_carousel() {
        tags.push(format!("{} images", source.image_count()));
    }
    if source.origin == fresco_core::MediaOrigin::StockPhoto {
        tags.push("stock photo".to_string());
    }
    let _ = writeln!(
        out,
        "- id: {} [{}] \"{}\" {}",
        source.id,
        tags.join(", "),
        source.title,
        source.context
    );
}
