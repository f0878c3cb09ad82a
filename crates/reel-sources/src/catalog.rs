//! Indexed catalog RPC client.
//!
//! The catalog is reelmux's own index: a single `search_videos` RPC returns
//! pre-scored rows spanning every source, already roughly shaped like the
//! normalized record. Rows are still passed through one normalizer so the
//! pipeline never sees a half-repaired record: missing numerics coalesce to
//! zero, malformed durations and timestamps are repaired instead of failing
//! the response.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tokio_util::sync::CancellationToken;

use reel_core::{Creator, CreatorTier, VideoHit};

use crate::error::SourceError;
use crate::normalize::{clamp_percent, clean_tags, creator_id, is_network_identity, parse_duration, parse_timestamp};
use crate::{CatalogSearch, http};

const SEARCH_PATH: &str = "/rpc/search_videos";

#[derive(serde::Serialize)]
struct SearchBody<'a> {
    q: &'a str,
    tags: &'a [String],
    limit: u32,
    offset: u32,
}

#[derive(serde::Deserialize)]
struct SearchResponse {
    rows: Vec<CatalogRow>,
}

#[derive(serde::Deserialize)]
struct CatalogRow {
    #[serde(default)]
    id: String,
    source: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    embed_url: Option<String>,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_duration")]
    duration: u32,
    #[serde(default)]
    creator_id: Option<String>,
    #[serde(default)]
    creator_name: String,
    #[serde(default)]
    creator_avatar: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    views: u64,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    score: f32,
}

/// Accept a duration as a number, a `"H:MM:SS"`/`"MM:SS"` string, or null;
/// anything else repairs to `0` rather than failing the row.
fn lenient_duration<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|secs| u32::try_from(secs).ok())
            .unwrap_or(0),
        serde_json::Value::String(s) => parse_duration(&s),
        _ => 0,
    })
}

fn hit_from_row(row: CatalogRow) -> VideoHit {
    let source_key = row.source.to_lowercase();
    let display_name = if row.creator_name.trim().is_empty() {
        row.source.clone()
    } else {
        row.creator_name.trim().to_string()
    };
    let creator_ident = creator_id(
        row.creator_id.as_deref(),
        row.tags.first().map(String::as_str),
        &source_key,
        &display_name,
    );
    let subscribable = !is_network_identity(&creator_ident, &source_key);
    let creator = Creator {
        id: creator_ident,
        display_name,
        avatar_url: row.creator_avatar.unwrap_or_default(),
        is_verified: false,
        tier: CreatorTier::Unknown,
        subscribable,
    };

    VideoHit {
        id: row.id.trim().to_string(),
        title: row.title.trim().to_string(),
        description: row.description.trim().to_string(),
        thumbnail_url: row.thumbnail,
        embed_url: row.embed_url.filter(|url| !url.is_empty()),
        direct_url: row.video_url.filter(|url| !url.is_empty()),
        source_name: row.source,
        duration_secs: row.duration,
        creator,
        tags: clean_tags(row.tags),
        view_count: row.views,
        rating_percent: row.rating.and_then(clamp_percent),
        published_at: row.published_at.as_deref().and_then(parse_timestamp),
        raw_relevance: row.score,
    }
}

/// HTTP client for the catalog `search_videos` RPC.
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Client against the catalog at `base_url` (scheme + host, no path).
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The configured catalog base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogSearch for HttpCatalog {
    async fn search(
        &self,
        text: &str,
        tags: &[String],
        limit: u32,
        offset: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<VideoHit>, SourceError> {
        let url = format!("{}{SEARCH_PATH}", self.base_url);
        let body = SearchBody {
            q: text,
            tags,
            limit,
            offset,
        };
        let data: SearchResponse = http::post_json(&self.http, &url, &body, cancel).await?;
        Ok(data.rows.into_iter().map(hit_from_row).collect())
    }
}
