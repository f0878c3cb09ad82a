//! Streamvat provider client.
//!
//! Mid-weight source: durations arrive as raw seconds and there is no
//! rating data at all. Attribution is channel-based; clips without a
//! channel fall back to their first label for identity and cannot be
//! followed.

use async_trait::async_trait;
use chrono::DateTime;
use tokio_util::sync::CancellationToken;

use reel_core::{Creator, CreatorTier, SortMode, VideoHit};

use crate::error::SourceError;
use crate::normalize::{clean_tags, creator_id, is_network_identity, slugify};
use crate::{Provider, http};

/// Registry name of this provider.
pub const NAME: &str = "streamvat";

const LABEL: &str = "Streamvat";
const DEFAULT_BASE_URL: &str = "https://api.streamvat.example";
const DEFAULT_AVATAR: &str = "https://static.streamvat.example/avatar-default.png";
const PER_PAGE: u32 = 25;

#[derive(serde::Deserialize)]
struct StreamvatSearchResponse {
    items: Vec<StreamvatItem>,
}

#[derive(serde::Deserialize)]
struct StreamvatItem {
    id: u64,
    name: String,
    about: Option<String>,
    #[serde(default)]
    poster: String,
    url: String,
    #[serde(default)]
    seconds: u32,
    channel: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    views: u64,
    added: Option<i64>,
}

fn hit_from_streamvat(item: StreamvatItem) -> VideoHit {
    let display_name = item
        .channel
        .clone()
        .or_else(|| item.labels.first().cloned())
        .unwrap_or_else(|| LABEL.to_string());
    let channel_slug = item.channel.as_deref().map(slugify);
    let ident = creator_id(
        channel_slug.as_deref(),
        item.labels.first().map(String::as_str),
        NAME,
        &display_name,
    );
    // Only named channels can be followed; label-derived identities exist
    // purely so affinity has a stable key.
    let subscribable = item.channel.is_some() && !is_network_identity(&ident, NAME);
    let creator = Creator {
        id: ident,
        display_name,
        avatar_url: DEFAULT_AVATAR.to_string(),
        is_verified: false,
        tier: CreatorTier::Unknown,
        subscribable,
    };

    VideoHit {
        id: format!("{NAME}:{}", item.id),
        title: item.name.trim().to_string(),
        description: item.about.unwrap_or_default().trim().to_string(),
        thumbnail_url: item.poster,
        embed_url: None,
        direct_url: Some(item.url).filter(|url| !url.is_empty()),
        source_name: LABEL.to_string(),
        duration_secs: item.seconds,
        creator,
        tags: clean_tags(item.labels),
        view_count: item.views,
        rating_percent: None,
        published_at: item
            .added
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        raw_relevance: 0.0,
    }
}

const fn sort_param(sort: SortMode) -> &'static str {
    match sort {
        SortMode::Trending => "views",
        SortMode::New => "recent",
        SortMode::Best => "top",
    }
}

/// Live client for the Streamvat search API.
pub struct Streamvat {
    http: reqwest::Client,
    base_url: String,
}

impl Streamvat {
    /// Client against the production Streamvat API.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Client against a non-default deployment (staging, tests).
    #[must_use]
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Provider for Streamvat {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch(
        &self,
        query: &str,
        page: u32,
        sort: SortMode,
        cancel: &CancellationToken,
    ) -> Result<Vec<VideoHit>, SourceError> {
        let url = format!(
            "{}/v1/search?q={}&page={page}&count={PER_PAGE}&order={}",
            self.base_url,
            urlencoding::encode(query),
            sort_param(sort),
        );
        let data: StreamvatSearchResponse = http::get_json(&self.http, &url, cancel).await?;
        Ok(data.items.into_iter().map(hit_from_streamvat).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "items": [
            {
                "id": 991203,
                "name": "Wreck dive at 40 m",
                "about": "Exploring the engine room",
                "poster": "https://static.streamvat.example/p/991203.jpg",
                "url": "https://streamvat.example/watch/991203",
                "seconds": 734,
                "channel": "DiveHub",
                "labels": ["Diving", "Wreck"],
                "views": 88103,
                "added": 1709300000
            },
            {
                "id": 991204,
                "name": "Anonymous cave clip",
                "about": null,
                "url": "https://streamvat.example/watch/991204",
                "channel": null,
                "labels": ["Caves"],
                "added": null
            }
        ],
        "more": true
    }"#;

    #[test]
    fn parse_streamvat_response() {
        let data: StreamvatSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(data.items.len(), 2);
        assert_eq!(data.items[0].id, 991203);
        assert_eq!(data.items[0].channel.as_deref(), Some("DiveHub"));
        assert!(data.items[1].channel.is_none());
    }

    #[test]
    fn maps_channel_clip() {
        let data: StreamvatSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let hit = hit_from_streamvat(data.items.into_iter().next().unwrap());

        assert_eq!(hit.id, "streamvat:991203");
        assert_eq!(hit.source_name, "Streamvat");
        assert_eq!(hit.duration_secs, 734);
        assert_eq!(hit.creator.id, "divehub");
        assert_eq!(hit.creator.display_name, "DiveHub");
        assert!(hit.creator.subscribable);
        // Streamvat exposes no rating data.
        assert_eq!(hit.rating_percent, None);
        assert_eq!(hit.embed_url, None);
        assert_eq!(
            hit.playback_url(),
            Some("https://streamvat.example/watch/991203")
        );
        assert_eq!(
            hit.published_at.map(|dt| dt.timestamp()),
            Some(1_709_300_000)
        );
    }

    #[test]
    fn maps_channelless_clip() {
        let data: StreamvatSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let hit = hit_from_streamvat(data.items.into_iter().nth(1).unwrap());

        assert_eq!(hit.id, "streamvat:991204");
        assert_eq!(hit.duration_secs, 0);
        // Identity falls back to the first label and cannot be followed.
        assert_eq!(hit.creator.id, "caves");
        assert_eq!(hit.creator.display_name, "Caves");
        assert!(!hit.creator.subscribable);
        assert!(hit.published_at.is_none());
    }

    #[test]
    fn normalization_is_deterministic() {
        let first: StreamvatSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let second: StreamvatSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let lhs: Vec<VideoHit> = first.items.into_iter().map(hit_from_streamvat).collect();
        let rhs: Vec<VideoHit> = second.items.into_iter().map(hit_from_streamvat).collect();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn sort_params() {
        assert_eq!(sort_param(SortMode::Trending), "views");
        assert_eq!(sort_param(SortMode::New), "recent");
        assert_eq!(sort_param(SortMode::Best), "top");
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_search() {
        let provider = Streamvat::new(crate::default_client(10));
        let cancel = CancellationToken::new();
        let result = provider.fetch("diving", 1, SortMode::New, &cancel).await;
        match result {
            Ok(hits) => {
                println!("── streamvat(\"diving\") ── {} hits", hits.len());
                for hit in hits.iter().take(5) {
                    println!("  {} | {}s | {}", hit.id, hit.duration_secs, hit.title);
                }
            }
            Err(e) => println!("── streamvat(\"diving\") ── ERROR: {e}"),
        }
    }
}
