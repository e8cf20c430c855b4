use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use fresco_core::{
    BrandObjective, BrandTone, BusinessCategory, GenerateRequest, GenerateResponse, MediaItem,
    MediaOrigin, Note, Platform, PostStatus, BusinessProfile,
};
use fresco_error::{BackendError, FrescoResult};
use fresco_interface::FrescoDriver;
use fresco_pipeline::{GenerationPipeline, GenerationRequest, SkipReason};
use fresco_storage::MemoryStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct ScriptedDriver {
    name: &'static str,
    response: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedDriver {
    fn answering(name: &'static str, response: &str) -> Arc<Self> {
        Arc::new(Self {
            name,
            response: Some(response.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            response: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl FrescoDriver for ScriptedDriver {
    async fn generate(&self, _req: &GenerateRequest) -> FrescoResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(text) => Ok(GenerateResponse::new(text.clone())),
            None => Err(BackendError::new("scripted outage").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap()
}

fn media(id: &str, carousel: Option<&str>) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        title: Some(format!("Title {id}")),
        context: Some("terrace shot".to_string()),
        visual_url: format!("https://cdn.example/{id}.jpg"),
        file_type: "image/jpeg".to_string(),
        attributed_month: None,
        carousel_id: carousel.map(str::to_string),
        origin: MediaOrigin::Upload,
        storage_key: format!("users/u1/media/{id}.jpg"),
        legacy_id: None,
        used: false,
        used_at: None,
        created_at: now() - Duration::days(3),
        deleted: false,
    }
}

fn profile(platforms: Vec<Platform>) -> BusinessProfile {
    BusinessProfile {
        owner: "u1".to_string(),
        name: "Cafe Luna".to_string(),
        category: BusinessCategory::Restaurant,
        description: "Neighborhood cafe".to_string(),
        tone: BrandTone::Friendly,
        objective: BrandObjective::Community,
        platforms,
    }
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.set_profile(profile(vec![Platform::Instagram])).await;
    store.insert_media("u1", media("m1000000", None)).await;
    store.insert_media("u1", media("ca000000", Some("car_1"))).await;
    store.insert_media("u1", media("cb000000", Some("car_1"))).await;
    store
        .insert_note(
            "u1",
            Note {
                id: "n1".to_string(),
                content: "Harvest menu launches October 10".to_string(),
                always_valid: false,
                month_scope: Some("october_2025".parse().unwrap()),
                created_at: now() - Duration::days(1),
            },
        )
        .await;
    store
}

fn good_response() -> String {
    r#"```json
{"posts": [
  {"content_type": "product", "text": "Our harvest menu is here.", "hashtags": ["harvest"], "title": "Harvest menu", "visual_id": "car_1", "scheduling_preference": "morning"},
  {"content_type": "behind_the_scenes", "text": "Prep day in the kitchen.", "hashtags": ["kitchen"], "title": "Prep day", "visual_id": "m1000000", "scheduling_preference": "evening"},
  {"content_type": "value", "text": "Three ways to brew at home.", "hashtags": ["coffee"], "title": "Brew tips", "visual_id": "", "scheduling_preference": "afternoon"}
]}
```"#
        .to_string()
}

fn request(num_posts: usize) -> GenerationRequest {
    GenerationRequest {
        owner: "u1".to_string(),
        target_month: "october_2025".parse().unwrap(),
        num_posts,
    }
}

#[tokio::test]
async fn full_run_persists_schedules_and_marks_usage() {
    let store = seeded_store().await;
    let narrative = ScriptedDriver::answering("narrative", &good_response());
    let structured = ScriptedDriver::failing("structured");
    let pipeline =
        GenerationPipeline::new(store.clone(), narrative.clone(), structured.clone());

    let outcome = pipeline.run_at(&request(3), now()).await.unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.posts_count, 3);
    assert_eq!(outcome.provider.as_deref(), Some("narrative"));
    assert_eq!(outcome.sources_used.carousels, 1);
    assert_eq!(outcome.sources_used.standalone, 1);

    // Community objective routes to the narrative provider; the backup
    // is never touched on success
    assert_eq!(narrative.calls.load(Ordering::SeqCst), 1);
    assert_eq!(structured.calls.load(Ordering::SeqCst), 0);

    // Batch persisted all-or-nothing
    assert_eq!(store.post_count("u1").await, 3);

    // Every post got a date inside October, sorted ascending
    let dates: Vec<_> = outcome
        .posts
        .iter()
        .map(|p| p.scheduled_date.expect("scheduled"))
        .collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    let target: fresco_core::MonthKey = "october_2025".parse().unwrap();
    assert!(
        outcome
            .posts
            .iter()
            .all(|p| target.contains(&p.scheduled_date.unwrap()))
    );

    // The carousel reference marked both members; the imageless post
    // marked nothing
    let snapshot = store.media_snapshot("u1").await;
    let used: Vec<&str> = snapshot
        .iter()
        .filter(|m| m.used)
        .map(|m| m.id.as_str())
        .collect();
    assert!(used.contains(&"m1000000"));
    assert!(used.contains(&"ca000000"));
    assert!(used.contains(&"cb000000"));
}

#[tokio::test]
async fn empty_inventory_short_circuits_before_any_provider_call() {
    let store = Arc::new(MemoryStore::new());
    store.set_profile(profile(vec![Platform::Instagram])).await;
    let narrative = ScriptedDriver::answering("narrative", &good_response());
    let structured = ScriptedDriver::failing("structured");
    let pipeline =
        GenerationPipeline::new(store.clone(), narrative.clone(), structured.clone());

    let outcome = pipeline.run_at(&request(3), now()).await.unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.skip_reason, Some(SkipReason::EmptyInventory));
    assert_eq!(narrative.calls.load(Ordering::SeqCst), 0);
    assert_eq!(structured.calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.post_count("u1").await, 0);
}

#[tokio::test]
async fn missing_platform_is_a_structured_skip() {
    let store = Arc::new(MemoryStore::new());
    store.set_profile(profile(Vec::new())).await;
    store.insert_media("u1", media("m1000000", None)).await;
    let narrative = ScriptedDriver::answering("narrative", &good_response());
    let pipeline = GenerationPipeline::new(
        store.clone(),
        narrative.clone(),
        ScriptedDriver::failing("structured"),
    );

    let outcome = pipeline.run_at(&request(3), now()).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.skip_reason, Some(SkipReason::NoConnectedPlatform));
    assert_eq!(narrative.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn exhausted_provider_chain_surfaces_an_empty_batch() {
    let store = seeded_store().await;
    let pipeline = GenerationPipeline::new(
        store.clone(),
        ScriptedDriver::failing("narrative"),
        ScriptedDriver::failing("structured"),
    );

    let outcome = pipeline.run_at(&request(3), now()).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.skip_reason, Some(SkipReason::ProviderUnavailable));
    assert!(outcome.posts.is_empty());
    assert_eq!(store.post_count("u1").await, 0);
}

#[tokio::test]
async fn malformed_response_persists_nothing() {
    let store = seeded_store().await;
    let narrative = ScriptedDriver::answering("narrative", "no json to see here");
    let pipeline = GenerationPipeline::new(
        store.clone(),
        narrative,
        ScriptedDriver::failing("structured"),
    );

    let outcome = pipeline.run_at(&request(3), now()).await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.posts_count, 0);
    assert_eq!(outcome.skip_reason, None);
    assert_eq!(store.post_count("u1").await, 0);
}

#[tokio::test]
async fn zero_posts_is_rejected_up_front() {
    let store = seeded_store().await;
    let pipeline = GenerationPipeline::new(
        store,
        ScriptedDriver::failing("narrative"),
        ScriptedDriver::failing("structured"),
    );
    assert!(pipeline.run_at(&request(0), now()).await.is_err());
}

#[tokio::test]
async fn unknown_reference_downgrades_but_still_persists() {
    let store = seeded_store().await;
    let response = r#"{"posts": [
      {"content_type": "product", "text": "Body", "hashtags": [], "title": "Ghost image", "visual_id": "not-a-real-id", "scheduling_preference": "morning"}
    ]}"#;
    let narrative = ScriptedDriver::answering("narrative", response);
    let pipeline = GenerationPipeline::new(
        store.clone(),
        narrative,
        ScriptedDriver::failing("structured"),
    );

    let outcome = pipeline.run_at(&request(1), now()).await.unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.posts[0].status, PostStatus::NeedsImage);
    assert_eq!(outcome.posts[0].visual_url, "");
    assert_eq!(store.post_count("u1").await, 1);

    // The unresolvable reference marked nothing as used
    let snapshot = store.media_snapshot("u1").await;
    assert!(snapshot.iter().all(|m| !m.used));
}
