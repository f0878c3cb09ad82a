//! JSON roundtrip coverage for the shared record types.
//!
//! The CLI emits these as JSON and the cache stores whole pages, so every
//! field must survive serialize → deserialize unchanged.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use reel_core::{
    Creator, CreatorTier, DurationFilter, SearchOptions, SearchPage, SortMode, SourceFilter,
    VideoHit,
};

fn full_hit() -> VideoHit {
    VideoHit {
        id: "clipmill:88f".to_string(),
        title: "Workshop tour".to_string(),
        description: "Every bench, every tool".to_string(),
        thumbnail_url: "https://cdn.clipmill.example/88f.jpg".to_string(),
        embed_url: Some("https://clipmill.example/e/88f".to_string()),
        direct_url: Some("https://clipmill.example/v/88f".to_string()),
        source_name: "ClipMill".to_string(),
        duration_secs: 1420,
        creator: Creator {
            id: "clipmill:maker-lab".to_string(),
            display_name: "Maker Lab".to_string(),
            avatar_url: "https://cdn.clipmill.example/a/maker-lab.png".to_string(),
            is_verified: true,
            tier: CreatorTier::Studio,
            subscribable: true,
        },
        tags: vec!["Workshop".to_string(), "DIY".to_string()],
        view_count: 88_001,
        rating_percent: Some(84.5),
        published_at: Some(Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()),
        raw_relevance: 1.75,
    }
}

#[test]
fn video_hit_roundtrip() {
    let hit = full_hit();
    let json = serde_json::to_string_pretty(&hit).unwrap();
    let back: VideoHit = serde_json::from_str(&json).unwrap();
    assert_eq!(hit, back);
}

#[test]
fn search_page_roundtrip() {
    let page = SearchPage::new(vec![full_hit()], false);
    let json = serde_json::to_string(&page).unwrap();
    let back: SearchPage = serde_json::from_str(&json).unwrap();
    assert_eq!(page, back);
}

#[test]
fn search_options_roundtrip_with_source_variant() {
    let opts = SearchOptions::new()
        .with_source(SourceFilter::Only("Vidora".to_string()))
        .with_duration(DurationFilter::Medium)
        .with_sort(SortMode::Best);
    let json = serde_json::to_string(&opts).unwrap();
    let back: SearchOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(opts, back);
}

#[test]
fn options_with_defaults_deserialize_from_minimal_json() {
    let back: SearchOptions = serde_json::from_str(r#"{"limit": 10, "offset": 0}"#).unwrap();
    assert_eq!(back.sort, SortMode::Trending);
    assert_eq!(back.duration, DurationFilter::All);
    assert_eq!(back.source, SourceFilter::All);
}
