//! Clipmill provider client.
//!
//! The leanest source: embed-only playback, `"MM:SS"` runtimes, integer
//! percent ratings, and tags as one comma-joined string. Every upload is
//! published under the site's own network identity, so nothing from
//! Clipmill is subscribable.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use reel_core::{Creator, CreatorTier, SortMode, VideoHit};

use crate::error::SourceError;
use crate::normalize::{clamp_percent, clean_tags, is_network_identity, parse_duration, parse_timestamp};
use crate::{Provider, http};

/// Registry name of this provider.
pub const NAME: &str = "clipmill";

const LABEL: &str = "Clipmill";
const DEFAULT_BASE_URL: &str = "https://clipmill.example";
const DEFAULT_AVATAR: &str = "https://clipmill.example/img/mill.png";
const PER_PAGE: u32 = 20;

#[derive(serde::Deserialize)]
struct ClipmillSearchResponse {
    clips: Vec<ClipmillClip>,
}

#[derive(serde::Deserialize)]
struct ClipmillClip {
    clip_id: String,
    heading: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    still: String,
    player: String,
    #[serde(default)]
    runtime: String,
    /// Comma-joined label string, e.g. `"diving, ocean, 4k"`.
    #[serde(default)]
    tags: String,
    #[serde(default)]
    views: u64,
    score_pct: Option<f32>,
    posted: Option<String>,
}

fn hit_from_clipmill(clip: ClipmillClip) -> VideoHit {
    // Network uploads: the site itself is the uploader of record.
    let creator = Creator {
        id: NAME.to_string(),
        display_name: LABEL.to_string(),
        avatar_url: DEFAULT_AVATAR.to_string(),
        is_verified: false,
        tier: CreatorTier::Unknown,
        subscribable: !is_network_identity(NAME, NAME),
    };

    VideoHit {
        id: format!("{NAME}:{}", clip.clip_id),
        title: clip.heading.trim().to_string(),
        description: clip.summary.trim().to_string(),
        thumbnail_url: clip.still,
        embed_url: Some(clip.player).filter(|url| !url.is_empty()),
        direct_url: None,
        source_name: LABEL.to_string(),
        duration_secs: parse_duration(&clip.runtime),
        creator,
        tags: clean_tags(clip.tags.split(',')),
        view_count: clip.views,
        rating_percent: clip.score_pct.and_then(clamp_percent),
        published_at: clip.posted.as_deref().and_then(parse_timestamp),
        raw_relevance: 0.0,
    }
}

const fn sort_param(sort: SortMode) -> &'static str {
    match sort {
        SortMode::Trending => "popular",
        SortMode::New => "newest",
        SortMode::Best => "top-rated",
    }
}

/// Live client for the Clipmill search API.
pub struct Clipmill {
    http: reqwest::Client,
    base_url: String,
}

impl Clipmill {
    /// Client against the production Clipmill API.
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
impl Provider for Clipmill {
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
            "{}/api/clips?search={}&page={page}&limit={PER_PAGE}&sort={}",
            self.base_url,
            urlencoding::encode(query),
            sort_param(sort),
        );
        let data: ClipmillSearchResponse = http::get_json(&self.http, &url, cancel).await?;
        Ok(data.clips.into_iter().map(hit_from_clipmill).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "clips": [
            {
                "clip_id": "cm_2209",
                "heading": "Night dive highlights",
                "summary": "Bioluminescence off the pier",
                "still": "https://clipmill.example/s/cm_2209.jpg",
                "player": "https://clipmill.example/embed/cm_2209",
                "runtime": "8:21",
                "tags": "diving, night, 4k",
                "views": 12503,
                "score_pct": 87,
                "posted": "2024-06-12T08:30:00Z"
            },
            {
                "clip_id": "cm_2210",
                "heading": "Untitled upload",
                "player": "https://clipmill.example/embed/cm_2210",
                "tags": "",
                "score_pct": 0,
                "posted": null
            }
        ],
        "total": 310
    }"#;

    #[test]
    fn parse_clipmill_response() {
        let data: ClipmillSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(data.clips.len(), 2);
        assert_eq!(data.clips[0].clip_id, "cm_2209");
        assert_eq!(data.clips[0].score_pct, Some(87.0));
    }

    #[test]
    fn maps_full_clip() {
        let data: ClipmillSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let hit = hit_from_clipmill(data.clips.into_iter().next().unwrap());

        assert_eq!(hit.id, "clipmill:cm_2209");
        assert_eq!(hit.source_name, "Clipmill");
        assert_eq!(hit.duration_secs, 501);
        assert_eq!(hit.tags, vec!["diving", "night", "4k"]);
        assert_eq!(hit.rating_percent, Some(87.0));
        // Embed-only source.
        assert_eq!(hit.direct_url, None);
        assert_eq!(
            hit.playback_url(),
            Some("https://clipmill.example/embed/cm_2209")
        );
        // Network identity: never subscribable.
        assert_eq!(hit.creator.id, "clipmill");
        assert!(!hit.creator.subscribable);
    }

    #[test]
    fn maps_sparse_clip() {
        let data: ClipmillSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let hit = hit_from_clipmill(data.clips.into_iter().nth(1).unwrap());

        assert_eq!(hit.id, "clipmill:cm_2210");
        assert_eq!(hit.duration_secs, 0);
        assert_eq!(hit.tags, Vec::<String>::new());
        // Zero percent means no votes, not a rating of zero.
        assert_eq!(hit.rating_percent, None);
        assert!(hit.published_at.is_none());
    }

    #[test]
    fn normalization_is_deterministic() {
        let first: ClipmillSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let second: ClipmillSearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let lhs: Vec<VideoHit> = first.clips.into_iter().map(hit_from_clipmill).collect();
        let rhs: Vec<VideoHit> = second.clips.into_iter().map(hit_from_clipmill).collect();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn sort_params() {
        assert_eq!(sort_param(SortMode::Trending), "popular");
        assert_eq!(sort_param(SortMode::New), "newest");
        assert_eq!(sort_param(SortMode::Best), "top-rated");
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_search() {
        let provider = Clipmill::new(crate::default_client(10));
        let cancel = CancellationToken::new();
        let result = provider.fetch("diving", 1, SortMode::Best, &cancel).await;
        match result {
            Ok(hits) => {
                println!("── clipmill(\"diving\") ── {} hits", hits.len());
                for hit in hits.iter().take(5) {
                    println!("  {} | {}s | {}", hit.id, hit.duration_secs, hit.title);
                }
            }
            Err(e) => println!("── clipmill(\"diving\") ── ERROR: {e}"),
        }
    }
}
