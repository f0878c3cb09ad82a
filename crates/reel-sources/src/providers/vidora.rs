//! Vidora provider client.
//!
//! The richest of the live sources: full uploader profiles with a verified
//! flag and a tier, star ratings on a 0-5 scale, and durations as
//! `"H:MM:SS"`/`"MM:SS"` strings.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use reel_core::{Creator, CreatorTier, SortMode, VideoHit};

use crate::error::SourceError;
use crate::normalize::{
    clean_tags, creator_id, is_network_identity, parse_duration, parse_timestamp,
    percent_from_stars,
};
use crate::{Provider, http};

/// Registry name of this provider.
pub const NAME: &str = "vidora";

const LABEL: &str = "Vidora";
const DEFAULT_BASE_URL: &str = "https://api.vidora.example";
const DEFAULT_AVATAR: &str = "https://cdn.vidora.example/avatars/default.png";
const PER_PAGE: u32 = 24;

#[derive(serde::Deserialize)]
struct VidoraSearchResponse {
    videos: Vec<VidoraVideo>,
}

#[derive(serde::Deserialize)]
struct VidoraVideo {
    vid: String,
    title: String,
    description: Option<String>,
    #[serde(default)]
    thumb: String,
    embed: Option<String>,
    link: Option<String>,
    #[serde(default)]
    length: String,
    uploader: Option<VidoraUploader>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    plays: u64,
    stars: Option<f32>,
    uploaded_at: Option<String>,
}

#[derive(serde::Deserialize)]
struct VidoraUploader {
    slug: Option<String>,
    name: String,
    avatar: Option<String>,
    #[serde(default)]
    verified: bool,
    kind: Option<String>,
}

fn tier_from_kind(kind: Option<&str>) -> CreatorTier {
    match kind {
        Some("amateur") => CreatorTier::Amateur,
        Some("pro") => CreatorTier::Pro,
        Some("studio") => CreatorTier::Studio,
        _ => CreatorTier::Unknown,
    }
}

fn hit_from_vidora(video: VidoraVideo) -> VideoHit {
    let uploader = video.uploader;
    let display_name = uploader
        .as_ref()
        .map_or(LABEL, |u| u.name.as_str())
        .trim()
        .to_string();
    let ident = creator_id(
        uploader.as_ref().and_then(|u| u.slug.as_deref()),
        video.keywords.first().map(String::as_str),
        NAME,
        &display_name,
    );
    let creator = Creator {
        subscribable: !is_network_identity(&ident, NAME),
        id: ident,
        display_name,
        avatar_url: uploader
            .as_ref()
            .and_then(|u| u.avatar.clone())
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        is_verified: uploader.as_ref().is_some_and(|u| u.verified),
        tier: tier_from_kind(uploader.as_ref().and_then(|u| u.kind.as_deref())),
    };

    VideoHit {
        id: format!("{NAME}:{}", video.vid),
        title: video.title.trim().to_string(),
        description: video.description.unwrap_or_default().trim().to_string(),
        thumbnail_url: video.thumb,
        embed_url: video.embed.filter(|url| !url.is_empty()),
        direct_url: video.link.filter(|url| !url.is_empty()),
        source_name: LABEL.to_string(),
        duration_secs: parse_duration(&video.length),
        creator,
        tags: clean_tags(video.keywords),
        view_count: video.plays,
        rating_percent: video.stars.and_then(percent_from_stars),
        published_at: video.uploaded_at.as_deref().and_then(parse_timestamp),
        raw_relevance: 0.0,
    }
}

const fn sort_param(sort: SortMode) -> &'static str {
    match sort {
        SortMode::Trending => "hot",
        SortMode::New => "date",
        SortMode::Best => "rating",
    }
}

/// Live client for the Vidora search API.
pub struct Vidora {
    http: reqwest::Client,
    base_url: String,
}

impl Vidora {
    /// Client against the production Vidora API.
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
impl Provider for Vidora {
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
            "{}/api/v2/videos/search?query={}&page={page}&per_page={PER_PAGE}&sort={}",
            self.base_url,
            urlencoding::encode(query),
            sort_param(sort),
        );
        let data: VidoraSearchResponse = http::get_json(&self.http, &url, cancel).await?;
        Ok(data.videos.into_iter().map(hit_from_vidora).collect())
    }
}
