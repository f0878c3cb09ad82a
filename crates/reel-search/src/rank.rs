//! Composite relevance ranking.
//!
//! Every hit gets a score in `[0,1]` blended from four sub-scores: text
//! match, personalization, quality, and freshness. The sort mode picks the
//! weighting; query intent damps personalization for precise queries. Ties
//! on exact score equality break on rating, then view count, under a
//! stable sort, so given identical inputs the ordering is fully
//! deterministic with no randomness anywhere.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use reel_core::{QueryIntent, SortMode, VideoHit};
use reel_query::tokenize;

use crate::signals::RankSignals;

// Text blend: the catalog's own relevance dominates, lexical overlap
// corrects for it (and carries the whole text signal for live hits,
// whose raw relevance is always zero).
const RAW_RELEVANCE_WEIGHT: f32 = 0.75;
const LEXICAL_WEIGHT: f32 = 0.25;

// Lexical blend between per-field overlap, tag-filter matches, and the
// exact-phrase bonus.
const FIELD_OVERLAP_WEIGHT: f32 = 0.75;
const FILTER_MATCH_WEIGHT: f32 = 0.20;
const PHRASE_WEIGHT: f32 = 0.05;

// Per-field weights inside the overlap blend. Description and tag matches
// are damped: they are looser signals than a title or creator match.
const TITLE_WEIGHT: f32 = 0.45;
const CREATOR_WEIGHT: f32 = 0.10;
const DESCRIPTION_WEIGHT: f32 = 0.25;
const TAGS_WEIGHT: f32 = 0.20;
const DESCRIPTION_DAMP: f32 = 0.6;
const TAGS_DAMP: f32 = 0.8;

/// Flat bonus when the whole query phrase appears verbatim in the title.
const PHRASE_BONUS: f32 = 0.35;

/// Personalization damp factor for exact-intent queries.
const EXACT_PERSONAL_DAMP: f32 = 0.5;

/// Sub-score weights for one sort mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeWeights {
    pub text: f32,
    pub personal: f32,
    pub quality: f32,
    pub fresh: f32,
}

impl ModeWeights {
    /// The shipped weighting for `sort`.
    #[must_use]
    pub const fn for_sort(sort: SortMode) -> Self {
        match sort {
            SortMode::Trending => Self {
                text: 0.45,
                personal: 0.30,
                quality: 0.15,
                fresh: 0.10,
            },
            SortMode::New => Self {
                text: 0.25,
                personal: 0.15,
                quality: 0.10,
                fresh: 0.50,
            },
            SortMode::Best => Self {
                text: 0.35,
                personal: 0.15,
                quality: 0.45,
                fresh: 0.05,
            },
        }
    }
}

/// Query-side inputs to scoring, computed once per search call.
#[derive(Debug, Clone)]
pub struct RankContext {
    /// Ranking tokens from the query text.
    pub tokens: Vec<String>,
    /// Whole query phrase, trimmed and lowercased; empty disables the
    /// phrase bonus.
    pub phrase: String,
    /// Lowercased tag filters from the parsed query.
    pub tag_filters: Vec<String>,
    pub intent: QueryIntent,
    pub sort: SortMode,
    /// Reference instant for freshness; fixed per call so one batch is
    /// scored against a single clock.
    pub now: DateTime<Utc>,
}

impl RankContext {
    #[must_use]
    pub fn new(
        text: &str,
        tag_filters: &[String],
        intent: QueryIntent,
        sort: SortMode,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            tokens: tokenize(text),
            phrase: text.trim().to_lowercase(),
            tag_filters: tag_filters.iter().map(|t| t.to_lowercase()).collect(),
            intent,
            sort,
            now,
        }
    }
}

/// Fraction of `tokens` appearing as whole words of `field`.
///
/// A word is a whitespace-separated run of the lowercased field text;
/// a token matches only by full-word equality, never as a substring of a
/// longer word.
#[allow(clippy::cast_precision_loss)]
fn token_hit_rate(tokens: &[String], field: &str) -> f32 {
    if tokens.is_empty() {
        return 0.0;
    }
    let field = field.to_lowercase();
    let words: Vec<&str> = field.split_whitespace().collect();
    let matched = tokens
        .iter()
        .filter(|token| words.iter().any(|word| word == &token.as_str()))
        .count();
    matched as f32 / tokens.len() as f32
}

#[allow(clippy::cast_precision_loss)]
fn lexical_score(hit: &VideoHit, ctx: &RankContext) -> f32 {
    let title = token_hit_rate(&ctx.tokens, &hit.title);
    let creator = token_hit_rate(&ctx.tokens, &hit.creator.display_name);
    let description = token_hit_rate(&ctx.tokens, &hit.description);
    let tags_joined = hit.tags.join(" ");
    let tags = token_hit_rate(&ctx.tokens, &tags_joined);

    let overlap = TITLE_WEIGHT * title
        + CREATOR_WEIGHT * creator
        + DESCRIPTION_WEIGHT * (DESCRIPTION_DAMP * description)
        + TAGS_WEIGHT * (TAGS_DAMP * tags);

    let filter_fraction = if ctx.tag_filters.is_empty() {
        0.0
    } else {
        let matched = ctx
            .tag_filters
            .iter()
            .filter(|tag| hit.has_tag(tag))
            .count();
        matched as f32 / ctx.tag_filters.len() as f32
    };

    let phrase = if !ctx.phrase.is_empty() && hit.title.to_lowercase().contains(&ctx.phrase) {
        PHRASE_BONUS
    } else {
        0.0
    };

    (FIELD_OVERLAP_WEIGHT * overlap + FILTER_MATCH_WEIGHT * filter_fraction
        + PHRASE_WEIGHT * phrase)
        .clamp(0.0, 1.0)
}

fn text_score(hit: &VideoHit, ctx: &RankContext) -> f32 {
    let raw = 1.0 - (-hit.raw_relevance.max(0.0)).exp();
    (RAW_RELEVANCE_WEIGHT * raw + LEXICAL_WEIGHT * lexical_score(hit, ctx)).clamp(0.0, 1.0)
}

/// Composite score for one hit.
#[must_use]
pub fn score_hit(hit: &VideoHit, ctx: &RankContext, signals: &dyn RankSignals) -> f32 {
    let mut weights = ModeWeights::for_sort(ctx.sort);
    if ctx.intent == QueryIntent::Exact {
        weights.personal *= EXACT_PERSONAL_DAMP;
    }

    let text = text_score(hit, ctx);
    let personal = signals.affinity(hit).clamp(0.0, 1.0);
    let quality = signals.quality(hit).clamp(0.0, 1.0);
    let fresh = signals.freshness(hit, ctx.now).clamp(0.0, 1.0);

    weights.text * text
        + weights.personal * personal
        + weights.quality * quality
        + weights.fresh * fresh
}

/// Rating comparison for tie-breaking: higher first, missing last.
fn rating_desc(lhs: Option<f32>, rhs: Option<f32>) -> Ordering {
    match (lhs, rhs) {
        (Some(l), Some(r)) => r.partial_cmp(&l).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort `hits` by descending composite score in place.
///
/// Ties on exact score equality break on higher rating (missing ratings
/// sort last), then higher view count. The sort is stable, so fully equal
/// hits keep their incoming order.
pub fn rank_hits(hits: &mut Vec<VideoHit>, ctx: &RankContext, signals: &dyn RankSignals) {
    let mut scored: Vec<(f32, VideoHit)> = hits
        .drain(..)
        .map(|hit| (score_hit(&hit, ctx, signals), hit))
        .collect();
    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| rating_desc(a.rating_percent, b.rating_percent))
            .then_with(|| b.view_count.cmp(&a.view_count))
    });
    hits.extend(scored.into_iter().map(|(_, hit)| hit));
}
