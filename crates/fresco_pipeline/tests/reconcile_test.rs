use fresco_core::{ContentCategory, ContentSource, MediaOrigin, Platform, PostStatus};
use fresco_pipeline::{ContentInventory, ResponseReconciler};

fn inventory() -> ContentInventory {
    let source = |id: &str| ContentSource {
        id: id.to_string(),
        title: format!("Item {id}"),
        context: String::new(),
        visual_url: format!("https://cdn.example/{id}.jpg"),
        file_type: "image/jpeg".to_string(),
        attributed_month: None,
        origin: MediaOrigin::Upload,
        members: Vec::new(),
    };
    ContentInventory {
        carousels: Vec::new(),
        standalone: vec![source("m1"), source("m2"), source("m3")],
    }
}

fn raw_post(title: &str, visual_id: &str) -> String {
    format!(
        r#"{{"content_type": "product", "text": "Body of {title}", "hashtags": ["cafe"], "title": "{title}", "visual_id": "{visual_id}", "scheduling_preference": "morning"}}"#
    )
}

fn batch(posts: &[String]) -> String {
    format!(r#"{{"posts": [{}]}}"#, posts.join(","))
}

#[test]
fn fenced_responses_are_unwrapped() {
    let raw = format!("```json\n{}\n```", batch(&[raw_post("A", "m1")]));
    let posts = ResponseReconciler::new(Platform::Instagram).reconcile(&raw, &inventory(), 1);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "A");
    assert_eq!(posts[0].status, PostStatus::WithImage);
    assert_eq!(posts[0].visual_url, "https://cdn.example/m1.jpg");
}

#[test]
fn overage_truncates_to_the_requested_count() {
    let raw = batch(&[
        raw_post("A", "m1"),
        raw_post("B", "m2"),
        raw_post("C", "m3"),
        raw_post("D", "m1"),
        raw_post("E", "m2"),
    ]);
    let posts = ResponseReconciler::new(Platform::Instagram).reconcile(&raw, &inventory(), 3);
    assert_eq!(posts.len(), 3);
    // First three in response order survive
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

#[test]
fn undercount_is_accepted_without_padding() {
    let raw = batch(&[
        raw_post("A", "m1"),
        raw_post("B", "m2"),
        raw_post("C", "m3"),
        raw_post("D", "m1"),
        raw_post("E", "m2"),
        raw_post("F", "m3"),
        raw_post("G", "m1"),
        raw_post("H", "m2"),
    ]);
    let posts = ResponseReconciler::new(Platform::Instagram).reconcile(&raw, &inventory(), 10);
    // Eight of ten requested: no synthetic posts appear
    assert_eq!(posts.len(), 8);
}

#[test]
fn unknown_visual_id_downgrades_instead_of_dropping() {
    let raw = batch(&[raw_post("A", "no-such-id")]);
    let posts = ResponseReconciler::new(Platform::Instagram).reconcile(&raw, &inventory(), 1);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].status, PostStatus::NeedsImage);
    assert_eq!(posts[0].visual_url, "");
    assert_eq!(posts[0].visual_id, None);
}

#[test]
fn empty_visual_id_means_needs_image() {
    let raw = batch(&[raw_post("A", "")]);
    let posts = ResponseReconciler::new(Platform::Instagram).reconcile(&raw, &inventory(), 1);
    assert_eq!(posts[0].status, PostStatus::NeedsImage);
    assert_eq!(posts[0].visual_url, "");
}

#[test]
fn malformed_json_fails_closed() {
    let posts = ResponseReconciler::new(Platform::Instagram).reconcile(
        "{\"posts\": [{\"title\": ",
        &inventory(),
        5,
    );
    assert!(posts.is_empty());
}

#[test]
fn prose_without_json_fails_closed() {
    let posts = ResponseReconciler::new(Platform::Instagram).reconcile(
        "I'm sorry, I can't produce posts right now.",
        &inventory(),
        5,
    );
    assert!(posts.is_empty());
}

#[test]
fn missing_content_type_defaults_to_value() {
    let raw = r#"{"posts": [{"text": "Body", "title": "A", "hashtags": []}]}"#;
    let posts = ResponseReconciler::new(Platform::Facebook).reconcile(raw, &inventory(), 1);
    assert_eq!(posts[0].content_type, ContentCategory::Value);
    assert_eq!(posts[0].scheduling_preference, None);
}

#[test]
fn unknown_content_type_defaults_to_value() {
    let raw = r#"{"posts": [{"content_type": "viral_banger", "text": "Body", "title": "A", "hashtags": [], "visual_id": "m1"}]}"#;
    let posts = ResponseReconciler::new(Platform::Facebook).reconcile(raw, &inventory(), 1);
    assert_eq!(posts[0].content_type, ContentCategory::Value);
    assert_eq!(posts[0].status, PostStatus::WithImage);
}

#[test]
fn platform_is_stamped_on_every_post() {
    let raw = batch(&[raw_post("A", "m1"), raw_post("B", "")]);
    let posts = ResponseReconciler::new(Platform::LinkedIn).reconcile(&raw, &inventory(), 2);
    assert!(posts.iter().all(|p| p.platform == Platform::LinkedIn));
}
