//! The fan-out/fallback search orchestrator.
//!
//! One [`SearchEngine::search`] call runs the whole pipeline: parse the raw
//! query, page through the indexed catalog in bounded rounds, fall back to a
//! live provider fan-out when the index has nothing usable, then filter,
//! dedup, rank, and slice. Every network call is raced against the caller's
//! cancellation token.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use reel_core::{ParsedQuery, SearchOptions, SearchPage, SortMode, VideoHit};
use reel_query::{classify_intent, parse, CategoryAliases, IntentThresholds};
use reel_sources::{CatalogSearch, Provider, SourceError};

use crate::cache::{cache_key, ResultCache};
use crate::dedup::{dedup_hits, SeenIds};
use crate::error::SearchError;
use crate::filter::{apply_filters, passes_filters};
use crate::interleave::round_robin;
use crate::rank::{rank_hits, RankContext};
use crate::signals::{HeuristicSignals, RankSignals};

/// Knobs for one engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Safety valve on catalog rounds per call.
    pub max_rounds: u32,
    /// Over-fetch multiplier applied while a source or duration filter is
    /// active, to compensate for filter attrition.
    pub overfetch_factor: u32,
    /// Hard cap on the per-round batch size.
    pub overfetch_cap: u32,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub intent: IntentThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rounds: 20,
            overfetch_factor: 3,
            overfetch_cap: 96,
            cache_ttl: Duration::from_secs(180),
            cache_capacity: 64,
            intent: IntentThresholds::default(),
        }
    }
}

/// What the catalog rounds loop produced.
struct CatalogOutcome {
    hits: Vec<VideoHit>,
    /// The index itself ran out of rows.
    index_exhausted: bool,
    /// At least one row survived filtering and dedup. When false the
    /// catalog path "yielded nothing usable" and the engine falls back to
    /// the live fan-out.
    any_usable: bool,
}

/// Multi-source search engine over one catalog and a set of live providers.
pub struct SearchEngine {
    catalog: Arc<dyn CatalogSearch>,
    providers: Vec<Arc<dyn Provider>>,
    aliases: CategoryAliases,
    signals: Box<dyn RankSignals>,
    cache: Mutex<ResultCache>,
    config: EngineConfig,
}

impl SearchEngine {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogSearch>,
        providers: Vec<Arc<dyn Provider>>,
        config: EngineConfig,
    ) -> Self {
        let cache = Mutex::new(ResultCache::new(config.cache_ttl, config.cache_capacity));
        Self {
            catalog,
            providers,
            aliases: CategoryAliases::default(),
            signals: Box::new(HeuristicSignals),
            cache,
            config,
        }
    }

    /// Replaces the default heuristic signals, e.g. with a personalization
    /// model backed by watch history.
    #[must_use]
    pub fn with_signals(mut self, signals: Box<dyn RankSignals>) -> Self {
        self.signals = signals;
        self
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: CategoryAliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// Runs the full search pipeline.
    ///
    /// The indexed catalog is tried first; the live fan-out only runs when
    /// the catalog yields nothing usable. A catalog RPC *error* is fatal
    /// ([`SearchError::Catalog`]) rather than silently recovered; callers
    /// that want error fallback chain [`Self::search_live`] themselves.
    ///
    /// # Errors
    ///
    /// [`SearchError::Catalog`] on a catalog RPC failure,
    /// [`SearchError::Cancelled`] when `cancel` fires first.
    #[allow(clippy::cast_possible_truncation)]
    pub async fn search(
        &self,
        raw_query: &str,
        options: &SearchOptions,
        cancel: &CancellationToken,
    ) -> Result<SearchPage, SearchError> {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        let parsed = parse(raw_query, &self.aliases);
        let key = cache_key(&parsed.text, &parsed.tag_filters, options);

        // Trending blends in the personalization signal, which moves within
        // a session; serving it stale would pin the page.
        let cache_enabled = options.sort != SortMode::Trending;
        if cache_enabled {
            if let Some(page) = self.cache.lock().await.get(&key) {
                return Ok(page);
            }
        }

        let outcome = self.collect_catalog(&parsed, options, cancel).await?;
        let (mut hits, from_live) = if outcome.any_usable {
            (outcome.hits, false)
        } else {
            (self.fan_out(&parsed, options, cancel).await?, true)
        };

        self.rank(&mut hits, &parsed, options);
        hits.truncate(options.limit as usize);

        let short = hits.len() < options.limit as usize;
        let exhausted = if from_live {
            short
        } else {
            outcome.index_exhausted || short
        };

        let page = SearchPage::new(hits, exhausted);
        if cache_enabled && !cancel.is_cancelled() {
            self.cache.lock().await.insert(key, page.clone());
        }
        Ok(page)
    }

    /// Runs the live fan-out only, skipping the indexed catalog.
    ///
    /// Never cached: live results are fresh by construction.
    ///
    /// # Errors
    ///
    /// [`SearchError::Cancelled`] when `cancel` fires; individual provider
    /// failures are swallowed and never surface here.
    #[allow(clippy::cast_possible_truncation)]
    pub async fn search_live(
        &self,
        raw_query: &str,
        options: &SearchOptions,
        cancel: &CancellationToken,
    ) -> Result<SearchPage, SearchError> {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        let parsed = parse(raw_query, &self.aliases);
        let mut hits = self.fan_out(&parsed, options, cancel).await?;
        self.rank(&mut hits, &parsed, options);
        hits.truncate(options.limit as usize);
        let exhausted = hits.len() < options.limit as usize;
        Ok(SearchPage::new(hits, exhausted))
    }

    /// The configured live providers, in fan-out order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    fn rank(&self, hits: &mut Vec<VideoHit>, parsed: &ParsedQuery, options: &SearchOptions) {
        let intent = classify_intent(&parsed.text, &self.config.intent);
        let ctx = RankContext::new(
            &parsed.text,
            &parsed.tag_filters,
            intent,
            options.sort,
            Utc::now(),
        );
        rank_hits(hits, &ctx, self.signals.as_ref());
    }

    /// Pages through the indexed catalog in bounded rounds, accumulating
    /// filter-passing, unique rows until `limit` is met or the index runs
    /// out. The caller `offset` is consumed in flight by skipping usable
    /// rows; duplicates and filtered rows never consume it.
    #[allow(clippy::cast_possible_truncation)]
    async fn collect_catalog(
        &self,
        parsed: &ParsedQuery,
        options: &SearchOptions,
        cancel: &CancellationToken,
    ) -> Result<CatalogOutcome, SearchError> {
        let fetch_limit = fetch_limit_for(options, &self.config);
        let limit = options.limit as usize;

        let mut seen = SeenIds::new();
        let mut kept: Vec<VideoHit> = Vec::with_capacity(limit);
        let mut to_skip = options.offset;
        let mut index_exhausted = false;

        for round in 0..self.config.max_rounds {
            if cancel.is_cancelled() {
                return Err(SearchError::Cancelled);
            }
            let rows = self
                .catalog
                .search(
                    &parsed.text,
                    &parsed.tag_filters,
                    fetch_limit,
                    round.saturating_mul(fetch_limit),
                    cancel,
                )
                .await
                .map_err(map_catalog_error)?;
            let row_count = rows.len() as u32;

            for hit in rows {
                if !passes_filters(&hit, &options.source, options.duration, &parsed.tag_filters)
                {
                    continue;
                }
                if !seen.insert(&hit.id) {
                    continue;
                }
                if to_skip > 0 {
                    to_skip -= 1;
                    continue;
                }
                kept.push(hit);
                if kept.len() >= limit {
                    break;
                }
            }

            if kept.len() >= limit {
                break;
            }
            if row_count == 0 || row_count < fetch_limit {
                index_exhausted = true;
                break;
            }
        }

        Ok(CatalogOutcome {
            hits: kept,
            index_exhausted,
            any_usable: !seen.is_empty(),
        })
    }

    /// Queries every live provider concurrently, then interleaves, dedups,
    /// and filters. A failed provider contributes zero rows; only
    /// cancellation is fatal.
    async fn fan_out(
        &self,
        parsed: &ParsedQuery,
        options: &SearchOptions,
        cancel: &CancellationToken,
    ) -> Result<Vec<VideoHit>, SearchError> {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        let page = options.offset / options.limit.max(1) + 1;
        let fetches = self.providers.iter().map(|provider| async move {
            let outcome = provider
                .fetch(&parsed.text, page, options.sort, cancel)
                .await;
            (provider.name(), outcome)
        });

        let mut lists = Vec::with_capacity(self.providers.len());
        for (name, outcome) in join_all(fetches).await {
            match outcome {
                Ok(rows) => lists.push(rows),
                Err(SourceError::Cancelled) => return Err(SearchError::Cancelled),
                Err(err) => {
                    tracing::warn!(provider = name, error = %err, "live provider failed, contributing zero rows");
                    lists.push(Vec::new());
                }
            }
        }

        let merged = dedup_hits(round_robin(lists));
        Ok(apply_filters(
            merged,
            &options.source,
            options.duration,
            &parsed.tag_filters,
        ))
    }
}

const fn fetch_limit_for(options: &SearchOptions, config: &EngineConfig) -> u32 {
    if options.has_attrition_filter() {
        let scaled = options.limit.saturating_mul(config.overfetch_factor);
        if scaled > config.overfetch_cap {
            config.overfetch_cap
        } else {
            scaled
        }
    } else {
        options.limit
    }
}

fn map_catalog_error(err: SourceError) -> SearchError {
    match err {
        SourceError::Cancelled => SearchError::Cancelled,
        other => SearchError::Catalog(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reel_core::DurationFilter;

    #[test]
    fn fetch_limit_plain_request() {
        let options = SearchOptions::default();
        assert_eq!(fetch_limit_for(&options, &EngineConfig::default()), 24);
    }

    #[test]
    fn fetch_limit_overfetches_under_attrition() {
        let options = SearchOptions::new().with_duration(DurationFilter::Short);
        assert_eq!(fetch_limit_for(&options, &EngineConfig::default()), 72);
    }

    #[test]
    fn fetch_limit_caps_at_ninety_six() {
        let options = SearchOptions::new()
            .with_limit(48)
            .with_duration(DurationFilter::Long);
        assert_eq!(fetch_limit_for(&options, &EngineConfig::default()), 96);
    }

    #[test]
    fn cancelled_catalog_error_maps_to_cancelled() {
        assert!(matches!(
            map_catalog_error(SourceError::Cancelled),
            SearchError::Cancelled
        ));
        assert!(matches!(
            map_catalog_error(SourceError::Parse("bad".to_string())),
            SearchError::Catalog(_)
        ));
    }
}
