use chrono::{Duration, TimeZone, Utc};
use fresco_core::{
    ContentCategory, GeneratedPost, MediaItem, MediaOrigin, Platform, PostStatus,
};
use fresco_interface::MediaRepository;
use fresco_pipeline::{ContentInventory, UsageTracker};
use fresco_storage::MemoryStore;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 20, 9, 0, 0).unwrap()
}

fn media(id: &str, storage_key: &str, legacy_id: Option<&str>) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        title: None,
        context: None,
        visual_url: format!("https://cdn.example/{storage_key}"),
        file_type: "image/jpeg".to_string(),
        attributed_month: None,
        carousel_id: None,
        origin: MediaOrigin::Upload,
        storage_key: storage_key.to_string(),
        legacy_id: legacy_id.map(str::to_string),
        used: false,
        used_at: None,
        created_at: now() - Duration::days(1),
        deleted: false,
    }
}

fn post(visual_id: Option<&str>) -> GeneratedPost {
    GeneratedPost {
        visual_url: String::new(),
        visual_id: visual_id.map(str::to_string),
        title: "t".to_string(),
        text: "b".to_string(),
        hashtags: Vec::new(),
        platform: Platform::Instagram,
        content_type: ContentCategory::Value,
        status: PostStatus::WithImage,
        scheduling_preference: None,
        scheduled_date: None,
    }
}

#[test]
fn native_id_wins_over_later_strategies() {
    let snapshot = vec![
        media("native-1234", "users/u1/media/native-1234.jpg", None),
        media("other-56789", "users/u1/media/native-1234-copy.jpg", None),
    ];
    let tracker = UsageTracker::new(&snapshot);
    let hit = tracker.resolve("native-1234").unwrap();
    assert_eq!(hit.id, "native-1234");
}

#[test]
fn storage_key_resolves_raw_and_extracted_forms() {
    let snapshot = vec![media("", "users/u1/media/fallback-9f8e7d.jpg", None)];
    let tracker = UsageTracker::new(&snapshot);
    assert!(tracker.resolve("users/u1/media/fallback-9f8e7d.jpg").is_some());
    assert!(tracker.resolve("fallback-9f8e7d").is_some());
}

#[test]
fn legacy_24_char_ids_resolve_last() {
    let snapshot = vec![media(
        "modern-1234",
        "users/u1/media/modern-1234.jpg",
        Some("507f1f77bcf86cd799439011"),
    )];
    let tracker = UsageTracker::new(&snapshot);
    let hit = tracker.resolve("507f1f77bcf86cd799439011").unwrap();
    assert_eq!(hit.id, "modern-1234");
    // A 23-char string never reaches the legacy matcher
    assert!(tracker.resolve("507f1f77bcf86cd79943901").is_none());
}

#[tokio::test]
async fn misses_are_logged_not_fatal() {
    let store = MemoryStore::new();
    let good = media("good-12345", "users/u1/media/good-12345.jpg", None);
    store.insert_media("u1", good.clone()).await;
    let snapshot = vec![good];

    let posts = vec![post(Some("ghost-ref")), post(Some("good-12345"))];
    let tracker = UsageTracker::new(&snapshot);
    let marked = tracker
        .mark_batch(&store, "u1", &posts, &ContentInventory::default(), now())
        .await;

    // The miss did not stop the rest of the batch from being marked
    assert_eq!(marked, 1);
    let snapshot = store.media_snapshot("u1").await;
    assert!(snapshot[0].used);
    assert_eq!(snapshot[0].used_at, Some(now()));
}

#[tokio::test]
async fn marking_is_idempotent() {
    let store = MemoryStore::new();
    let item = media("repeat-123", "users/u1/media/repeat-123.jpg", None);
    store.insert_media("u1", item.clone()).await;
    let snapshot = vec![item];

    let first_ts = now();
    let posts = vec![post(Some("repeat-123"))];
    let tracker = UsageTracker::new(&snapshot);
    tracker
        .mark_batch(&store, "u1", &posts, &ContentInventory::default(), first_ts)
        .await;
    tracker
        .mark_batch(
            &store,
            "u1",
            &posts,
            &ContentInventory::default(),
            first_ts + Duration::hours(2),
        )
        .await;

    // The original timestamp survives the second pass
    let snapshot = store.media_snapshot("u1").await;
    assert_eq!(snapshot[0].used_at, Some(first_ts));
}

#[tokio::test]
async fn posts_without_references_mark_nothing() {
    let store = MemoryStore::new();
    let item = media("idle-12345", "users/u1/media/idle-12345.jpg", None);
    store.insert_media("u1", item.clone()).await;
    let snapshot = vec![item];

    let marked = UsageTracker::new(&snapshot)
        .mark_batch(
            &store,
            "u1",
            &[post(None)],
            &ContentInventory::default(),
            now(),
        )
        .await;
    assert_eq!(marked, 0);
    assert!(!MediaRepository::find_media(&store, "u1").await.unwrap()[0].used);
}
