//! The canonical result record and its creator identity.
//!
//! Every source (the indexed catalog and each live provider) maps its native
//! row shape into [`VideoHit`] before anything downstream touches it. The
//! dedup, filter, and ranking stages operate exclusively on this type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::CreatorTier;

/// Uploader identity attached to a [`VideoHit`].
///
/// `id` is never empty: the normalizers derive a deterministic synthetic id
/// when the upstream row carries none, because subscription and affinity
/// logic key on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    pub display_name: String,
    pub avatar_url: String,
    pub is_verified: bool,
    #[serde(default)]
    pub tier: CreatorTier,
    /// False when the id is a network-level pseudo-identity (the source
    /// itself posting under its own name). Informational only; nothing is
    /// filtered on it.
    pub subscribable: bool,
}

impl Creator {
    /// A minimal creator with the given id and display name, defaulting to
    /// unverified, unknown tier, subscribable.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: String::new(),
            is_verified: false,
            tier: CreatorTier::Unknown,
            subscribable: true,
        }
    }
}

/// Normalized video result, the unit the ranker operates on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoHit {
    /// Stable, source-qualified identifier. Unique across all providers
    /// within one ranked batch; hits with an empty id are dropped by dedup.
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    /// Embeddable player URL, when the source offers one.
    pub embed_url: Option<String>,
    /// Direct media/page URL, when the source offers one.
    pub direct_url: Option<String>,
    /// Provider or catalog source label, e.g. `"Vidora"`.
    pub source_name: String,
    /// Clip length in seconds; `0` means unknown.
    pub duration_secs: u32,
    pub creator: Creator,
    /// Display-cased labels; matching against them is case-insensitive.
    pub tags: Vec<String>,
    pub view_count: u64,
    /// 0-100 scale; `None` means no rating data (never NaN).
    pub rating_percent: Option<f32>,
    pub published_at: Option<DateTime<Utc>>,
    /// The upstream index's own relevance score for this row. Only
    /// meaningful for catalog rows; providers leave it at `0.0`.
    #[serde(default)]
    pub raw_relevance: f32,
}

impl VideoHit {
    /// Whether at least one playback reference is present.
    #[must_use]
    pub const fn has_playback(&self) -> bool {
        self.embed_url.is_some() || self.direct_url.is_some()
    }

    /// Preferred playback URL: direct first, then embed.
    #[must_use]
    pub fn playback_url(&self) -> Option<&str> {
        self.direct_url.as_deref().or(self.embed_url.as_deref())
    }

    /// Case-insensitive tag membership test.
    #[must_use]
    pub fn has_tag(&self, label: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(label))
    }
}
