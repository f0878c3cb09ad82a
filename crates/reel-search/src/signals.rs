//! External ranking signals.
//!
//! The ranker owns the text-match math but consumes personalization,
//! quality, and freshness as opaque `[0,1]` signals through this trait, so
//! a host application can plug in real watch-history affinity without
//! touching the ranking weights. [`HeuristicSignals`] is the shipped
//! default for hosts that have no such data.

use chrono::{DateTime, Utc};

use reel_core::VideoHit;

/// Per-hit signals consumed by the ranker. All values are clamped to
/// `[0,1]` at the consumption site, so implementations may be sloppy at
/// the edges but should aim for that range.
pub trait RankSignals: Send + Sync {
    /// Personal affinity for this hit (creator, tags, watch history).
    fn affinity(&self, hit: &VideoHit) -> f32;

    /// Content quality estimate.
    fn quality(&self, hit: &VideoHit) -> f32;

    /// Recency signal; `1.0` means just published.
    fn freshness(&self, hit: &VideoHit, now: DateTime<Utc>) -> f32;
}

/// Quality prior for hits without rating data.
const UNRATED_PRIOR: f32 = 0.4;

/// `log10(views)` at which the view-count part of quality saturates.
const VIEW_SATURATION_MAGNITUDE: f64 = 7.0;

/// Freshness halves every this many days.
const FRESHNESS_HALF_LIFE_DAYS: f64 = 14.0;

/// Stateless signal heuristics derived from the hit itself.
///
/// - affinity: constant `0` (no watch history available here)
/// - quality: rating blended with log-scaled view count
/// - freshness: exponential decay from `published_at`, half-life
///   [`FRESHNESS_HALF_LIFE_DAYS`]; unknown age reads as stale
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSignals;

impl RankSignals for HeuristicSignals {
    fn affinity(&self, _hit: &VideoHit) -> f32 {
        0.0
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn quality(&self, hit: &VideoHit) -> f32 {
        let rating = hit
            .rating_percent
            .map_or(UNRATED_PRIOR, |r| (r / 100.0).clamp(0.0, 1.0));
        let views = ((hit.view_count.saturating_add(1) as f64).log10() / VIEW_SATURATION_MAGNITUDE)
            .clamp(0.0, 1.0) as f32;
        0.7 * rating + 0.3 * views
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn freshness(&self, hit: &VideoHit, now: DateTime<Utc>) -> f32 {
        let Some(published) = hit.published_at else {
            return 0.0;
        };
        let age_secs = (now - published).num_seconds();
        if age_secs <= 0 {
            return 1.0;
        }
        let age_days = age_secs as f64 / 86_400.0;
        0.5_f64.powf(age_days / FRESHNESS_HALF_LIFE_DAYS) as f32
    }
}
