//! # reel-sources
//!
//! Catalog and provider HTTP clients for reelmux.
//!
//! Fetches video metadata from the indexed catalog and from the live
//! provider APIs, normalizing every upstream shape into the shared
//! [`reel_core::VideoHit`] record:
//! - indexed catalog (`search_videos` RPC)
//! - vidora (JSON API, star ratings, uploader profiles)
//! - streamvat (JSON API, channel-based attribution)
//! - clipmill (JSON API, network uploads under the site identity)
//!
//! Every network call takes a [`CancellationToken`] and resolves to
//! [`SourceError::Cancelled`] promptly once the token fires; no further
//! requests are issued after cancellation is observed.

pub mod catalog;
pub mod providers;

mod error;
mod http;
mod normalize;

pub use catalog::HttpCatalog;
pub use error::SourceError;
pub use http::{check_response, default_client};
pub use normalize::{
    clamp_percent, clean_tags, creator_id, is_network_identity, parse_duration,
    parse_timestamp, percent_from_stars, slugify,
};

use async_trait::async_trait;
use reel_core::{SortMode, VideoHit};
use tokio_util::sync::CancellationToken;

// ── Traits ─────────────────────────────────────────────────────────

/// Indexed catalog lookup.
///
/// The catalog is the primary search path: one RPC returns pre-scored rows
/// across all sources. Implementations must return promptly with
/// [`SourceError::Cancelled`] when `cancel` fires.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search the catalog index.
    ///
    /// `tags` narrows the match server-side; `limit`/`offset` page through
    /// the index in row order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the RPC fails, the catalog responds with
    /// a non-success status, the body cannot be parsed, or the call is
    /// cancelled.
    async fn search(
        &self,
        text: &str,
        tags: &[String],
        limit: u32,
        offset: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<VideoHit>, SourceError>;
}

/// A live upstream video source.
///
/// Providers are the fallback path when the catalog has nothing: each one
/// wraps a third-party search API and maps its response into normalized
/// hits. Implementations must be cheap to query concurrently.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable lowercase source name, used for registry lookup and logging.
    /// Hits carry the display-cased variant in [`VideoHit::source_name`].
    fn name(&self) -> &str;

    /// Fetch one page of live results for `query`.
    ///
    /// `page` is 1-based; `sort` maps onto whatever ordering the upstream
    /// supports.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the upstream responds
    /// with a non-success status, the body cannot be parsed, or the call is
    /// cancelled.
    async fn fetch(
        &self,
        query: &str,
        page: u32,
        sort: SortMode,
        cancel: &CancellationToken,
    ) -> Result<Vec<VideoHit>, SourceError>;
}
