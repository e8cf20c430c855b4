//! The sequential generation pipeline.
//!
//! One run reads its snapshots, short-circuits when there is nothing to
//! generate from, drives the provider chain, reconciles and schedules the
//! batch, persists it, and marks consumed media. Steps execute in strict
//! sequence; concurrent runs for different users share no mutable state.

use crate::inventory::InventoryBuilder;
use crate::orchestrator::GenerationOrchestrator;
use crate::outcome::{GenerationOutcome, SkipReason, SourcesSummary};
use crate::policy::{GenerationPolicy, ProviderKind, select_providers};
use crate::prompt::{PromptAssembler, PromptContext};
use crate::reconcile::ResponseReconciler;
use crate::schedule::SchedulingAssigner;
use crate::strategy::StrategyPlanner;
use crate::usage::UsageTracker;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use fresco_core::MonthKey;
use fresco_error::{FrescoResult, PipelineError, PipelineErrorKind};
use fresco_interface::{
    FrescoDriver, InsightsSource, MediaRepository, NoteRepository, PostRepository,
    ProfileRepository,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);
const HISTORY_WINDOW_DAYS: i64 = 30;

/// Everything the pipeline needs from storage, as one bound.
pub trait PipelineStore:
    MediaRepository + NoteRepository + PostRepository + ProfileRepository + InsightsSource
{
}

impl<T> PipelineStore for T where
    T: MediaRepository + NoteRepository + PostRepository + ProfileRepository + InsightsSource
{
}

/// Inbound trigger for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Owning user id
    pub owner: String,
    /// Month the batch targets
    pub target_month: MonthKey,
    /// Exact number of posts to generate
    pub num_posts: usize,
}

/// The seven-stage content generation pipeline.
pub struct GenerationPipeline<S: PipelineStore> {
    store: Arc<S>,
    narrative: Arc<dyn FrescoDriver>,
    structured: Arc<dyn FrescoDriver>,
    call_timeout: Duration,
}

impl<S: PipelineStore> GenerationPipeline<S> {
    /// Build a pipeline over a store and the two provider drivers.
    pub fn new(
        store: Arc<S>,
        narrative: Arc<dyn FrescoDriver>,
        structured: Arc<dyn FrescoDriver>,
    ) -> Self {
        Self {
            store,
            narrative,
            structured,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Override the per-provider-call timeout.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Run one generation request, anchored at the current instant.
    pub async fn run(&self, request: &GenerationRequest) -> FrescoResult<GenerationOutcome> {
        self.run_at(request, Utc::now()).await
    }

    /// Run one generation request with an explicit clock anchor.
    ///
    /// Callers always receive a structured outcome; an `Err` here means
    /// the storage collaborator itself failed.
    #[instrument(skip(self, request), fields(owner = %request.owner, target = %request.target_month, num_posts = request.num_posts))]
    pub async fn run_at(
        &self,
        request: &GenerationRequest,
        now: DateTime<Utc>,
    ) -> FrescoResult<GenerationOutcome> {
        if request.num_posts == 0 {
            return Err(PipelineError::new(PipelineErrorKind::InvalidRequest(
                "num_posts must be greater than zero".to_string(),
            ))
            .into());
        }

        // Snapshot reads happen once, up front. Nothing re-reads live
        // storage after this point.
        let Some(profile) = self.store.find_profile(&request.owner).await? else {
            info!("No business profile, skipping run");
            return Ok(GenerationOutcome::skipped(
                SkipReason::MissingProfile,
                SourcesSummary::default(),
            ));
        };

        let Some(platform) = profile.platforms.first().copied() else {
            info!("No connected platform, skipping run");
            return Ok(GenerationOutcome::skipped(
                SkipReason::NoConnectedPlatform,
                SourcesSummary::default(),
            ));
        };

        let media = self.store.find_media(&request.owner).await?;
        let inventory = InventoryBuilder::new(request.target_month, now).build(&media);
        let sources = SourcesSummary {
            carousels: inventory.carousels.len(),
            standalone: inventory.standalone.len(),
            stock: inventory.stock_count(),
        };

        if inventory.is_empty() {
            info!("Empty inventory, skipping run before any provider call");
            return Ok(GenerationOutcome::skipped(SkipReason::EmptyInventory, sources));
        }

        let strategy = StrategyPlanner::plan(profile.category, request.num_posts);
        let notes = self
            .store
            .find_notes(&request.owner, request.target_month)
            .await?;
        let history = self
            .store
            .find_recent(&request.owner, now - ChronoDuration::days(HISTORY_WINDOW_DAYS))
            .await?;
        let insights = self.store.performance_summary(&request.owner).await?;

        let policy = GenerationPolicy::for_profile(&profile, platform);
        let context = PromptContext {
            profile: &profile,
            notes: &notes,
            history: &history,
            inventory: &inventory,
            insights: insights.as_ref(),
            target: request.target_month,
            num_posts: request.num_posts,
            strategy: &strategy,
        };
        let generate_request = PromptAssembler::assemble(&policy, &context);

        let ranking = select_providers(&policy);
        let orchestrator = GenerationOrchestrator::with_timeout(
            self.driver_for(ranking.primary),
            self.driver_for(ranking.backup),
            self.call_timeout,
        );
        let provider = orchestrator.primary_name().to_string();

        let raw = match orchestrator.generate(&generate_request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Provider chain exhausted, surfacing empty batch");
                return Ok(GenerationOutcome::skipped(
                    SkipReason::ProviderUnavailable,
                    sources,
                ));
            }
        };

        let posts =
            ResponseReconciler::new(platform).reconcile(&raw, &inventory, request.num_posts);
        let posts = SchedulingAssigner::new(request.target_month).schedule(posts);

        if posts.is_empty() {
            warn!("Reconciliation produced no posts, nothing to persist");
            return Ok(GenerationOutcome {
                success: false,
                posts_count: 0,
                posts: Vec::new(),
                sources_used: sources,
                skip_reason: None,
                provider: Some(provider),
            });
        }

        // From here the batch persists fully or not at all
        self.store.insert_posts(&request.owner, &posts).await?;

        let marked = UsageTracker::new(&media)
            .mark_batch(self.store.as_ref(), &request.owner, &posts, &inventory, now)
            .await;

        info!(
            posts = posts.len(),
            media_marked = marked,
            "Generation run complete"
        );

        Ok(GenerationOutcome::generated(posts, sources, provider))
    }

    fn driver_for(&self, kind: ProviderKind) -> Arc<dyn FrescoDriver> {
        match kind {
            ProviderKind::Narrative => Arc::clone(&self.narrative),
            ProviderKind::Structured => Arc::clone(&self.structured),
        }
    }
}
