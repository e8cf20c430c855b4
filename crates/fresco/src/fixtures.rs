//! Demo library seeding for the `generate` subcommand.

use chrono::{Duration, Utc};
use fresco_core::{
    BrandObjective, BrandTone, BusinessCategory, BusinessProfile, MediaItem, MediaOrigin,
    MonthKey, Note, PerformanceSummary, Platform,
};
use fresco_storage::MemoryStore;

fn media(owner: &str, id: &str, title: &str, context: &str, days_ago: i64) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        title: Some(title.to_string()),
        context: Some(context.to_string()),
        visual_url: format!("https://cdn.fresco.example/{owner}/{id}.jpg"),
        file_type: "image/jpeg".to_string(),
        attributed_month: None,
        carousel_id: None,
        origin: MediaOrigin::Upload,
        storage_key: format!("users/{owner}/media/{id}.jpg"),
        legacy_id: None,
        used: false,
        used_at: None,
        created_at: Utc::now() - Duration::days(days_ago),
        deleted: false,
    }
}

/// Seed a demo business with a small media library, notes, and insights.
pub async fn seed_demo_store(owner: &str, target: MonthKey) -> MemoryStore {
    let store = MemoryStore::new();

    store
        .set_profile(BusinessProfile {
            owner: owner.to_string(),
            name: "Cafe Luna".to_string(),
            category: BusinessCategory::Restaurant,
            description: "Neighborhood cafe with seasonal menus and a sunny terrace"
                .to_string(),
            tone: BrandTone::Friendly,
            objective: BrandObjective::Community,
            platforms: vec![Platform::Instagram, Platform::Facebook],
        })
        .await;

    let mut first = media(owner, "demo-menu-001", "Harvest plate", "Seasonal harvest plate on the chef's pass", 2);
    first.attributed_month = Some(target);
    store.insert_media(owner, first).await;

    let mut car_a = media(owner, "demo-car-00a", "Terrace morning", "Morning light on the terrace", 4);
    car_a.carousel_id = Some("demo-terrace".to_string());
    let mut car_b = media(owner, "demo-car-00b", "Terrace evening", "Candlelit tables at dusk", 4);
    car_b.carousel_id = Some("demo-terrace".to_string());
    store.insert_media(owner, car_a).await;
    store.insert_media(owner, car_b).await;

    store
        .insert_media(owner, media(owner, "demo-team-001", "Baker at work", "Our baker shaping sourdough at dawn", 9))
        .await;

    let mut stock = media(owner, "demo-stock-01", "Coffee beans", "Roasted beans close-up", 30);
    stock.origin = MediaOrigin::StockPhoto;
    store.insert_media(owner, stock).await;

    store
        .insert_note(
            owner,
            Note {
                id: "demo-note-1".to_string(),
                content: "Live jazz every Friday evening".to_string(),
                always_valid: true,
                month_scope: None,
                created_at: Utc::now() - Duration::days(10),
            },
        )
        .await;
    store
        .insert_note(
            owner,
            Note {
                id: "demo-note-2".to_string(),
                content: "Harvest menu launches on the 10th".to_string(),
                always_valid: false,
                month_scope: Some(target),
                created_at: Utc::now() - Duration::days(3),
            },
        )
        .await;

    store
        .set_summary(
            owner,
            PerformanceSummary {
                has_insights: true,
                recommended_hashtags: vec!["cafelife".to_string(), "seasonal".to_string()],
                recommended_keywords: vec!["terrace".to_string()],
                recommended_topics: vec!["behind the counter".to_string()],
                optimal_length: Some(220),
            },
        )
        .await;

    store
}
