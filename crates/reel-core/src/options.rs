//! The public search contract: request options and the returned page.

use serde::{Deserialize, Serialize};

use crate::enums::{DurationFilter, SortMode, SourceFilter};
use crate::hit::VideoHit;

/// Default page size when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 24;

/// Options for one search call.
///
/// `limit`/`offset` give simple page-based consumption: page N of size L is
/// `limit = L, offset = N * L`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub limit: u32,
    pub offset: u32,
    #[serde(default)]
    pub source: SourceFilter,
    #[serde(default)]
    pub duration: DurationFilter,
    #[serde(default)]
    pub sort: SortMode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            source: SourceFilter::All,
            duration: DurationFilter::All,
            sort: SortMode::Trending,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: SourceFilter) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: DurationFilter) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// True when a post-fetch attrition filter (source or duration) is
    /// active, which triggers over-fetching from the catalog.
    #[must_use]
    pub const fn has_attrition_filter(&self) -> bool {
        self.source.is_active() || self.duration.is_active()
    }
}

/// One page of ranked results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub hits: Vec<VideoHit>,
    /// True when no more results exist beyond this page. Not the same as
    /// "fewer results than requested because filters removed some".
    pub exhausted: bool,
}

impl SearchPage {
    #[must_use]
    pub const fn new(hits: Vec<VideoHit>, exhausted: bool) -> Self {
        Self { hits, exhausted }
    }

    /// An exhausted page with no hits.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            hits: Vec::new(),
            exhausted: true,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains() {
        let opts = SearchOptions::new()
            .with_limit(48)
            .with_offset(48)
            .with_source(SourceFilter::Only("Vidora".to_string()))
            .with_duration(DurationFilter::Long)
            .with_sort(SortMode::New);

        assert_eq!(opts.limit, 48);
        assert_eq!(opts.offset, 48);
        assert!(opts.has_attrition_filter());
        assert_eq!(opts.sort, SortMode::New);
    }

    #[test]
    fn defaults_do_not_trigger_overfetch() {
        let opts = SearchOptions::default();
        assert_eq!(opts.limit, DEFAULT_LIMIT);
        assert!(!opts.has_attrition_filter());
    }

    #[test]
    fn duration_alone_triggers_overfetch() {
        let opts = SearchOptions::new().with_duration(DurationFilter::Short);
        assert!(opts.has_attrition_filter());
    }

    #[test]
    fn empty_page_is_exhausted() {
        let page = SearchPage::empty();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert!(page.exhausted);
    }
}
