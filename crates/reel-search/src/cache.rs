//! Short-lived result cache keyed by the full request shape.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reel_core::{SearchOptions, SearchPage};

/// Canonical cache key for one search request.
///
/// Two requests that differ only in text casing, surrounding whitespace, or
/// tag-filter order produce the same key. Every option that changes the
/// result set is part of the key, so a hit can be served verbatim.
#[must_use]
pub fn cache_key(text: &str, tag_filters: &[String], options: &SearchOptions) -> String {
    let mut tags: Vec<String> = tag_filters.iter().map(|t| t.to_lowercase()).collect();
    tags.sort();
    format!(
        "{}|{}|{}|{}|{}|{}|{}",
        text.trim().to_lowercase(),
        tags.join(","),
        options.limit,
        options.offset,
        options.source.to_string().to_lowercase(),
        options.duration.as_str(),
        options.sort.as_str(),
    )
}

struct CacheEntry {
    page: SearchPage,
    stored_at: Instant,
}

/// TTL plus capacity bounded page cache.
///
/// Expired entries are dropped lazily on lookup. When the cache is full the
/// oldest entry is evicted; the map stays small enough that a linear scan
/// is fine.
pub struct ResultCache {
    ttl: Duration,
    capacity: usize,
    entries: HashMap<String, CacheEntry>,
}

impl ResultCache {
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<SearchPage> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&mut self, key: String, page: SearchPage) {
        self.insert_at(key, page, Instant::now());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_at(&mut self, key: &str, now: Instant) -> Option<SearchPage> {
        match self.entries.get(key) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Some(entry.page.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert_at(&mut self, key: String, page: SearchPage, now: Instant) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                page,
                stored_at: now,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reel_core::{DurationFilter, SortMode, SourceFilter};

    fn page(exhausted: bool) -> SearchPage {
        SearchPage::new(Vec::new(), exhausted)
    }

    fn options() -> SearchOptions {
        SearchOptions::default()
    }

    #[test]
    fn key_normalizes_text_and_tag_order() {
        let a = cache_key(
            "  Reef Diving ",
            &["Waves".to_string(), "blue".to_string()],
            &options(),
        );
        let b = cache_key(
            "reef diving",
            &["blue".to_string(), "waves".to_string()],
            &options(),
        );
        assert_eq!(a, b);
        assert_eq!(a, "reef diving|blue,waves|24|0|all|all|trending");
    }

    #[test]
    fn key_separates_every_option() {
        let base = cache_key("x", &[], &options());
        let mut limit = options();
        limit.limit = 12;
        let mut offset = options();
        offset.offset = 24;
        let mut source = options();
        source.source = SourceFilter::Only("vidora".to_string());
        let mut duration = options();
        duration.duration = DurationFilter::Short;
        let mut sort = options();
        sort.sort = SortMode::Best;
        for other in [limit, offset, source, duration, sort] {
            assert_ne!(base, cache_key("x", &[], &other));
        }
    }

    #[test]
    fn hit_within_ttl_miss_after() {
        let mut cache = ResultCache::new(Duration::from_secs(60), 4);
        let start = Instant::now();
        cache.insert_at("k".to_string(), page(true), start);

        let fresh = cache.get_at("k", start + Duration::from_secs(59));
        assert!(fresh.is_some_and(|p| p.exhausted));

        let stale = cache.get_at("k", start + Duration::from_secs(61));
        assert!(stale.is_none());
        assert!(cache.is_empty(), "expired entry must be dropped");
    }

    #[test]
    fn full_cache_evicts_oldest() {
        let mut cache = ResultCache::new(Duration::from_secs(60), 2);
        let start = Instant::now();
        cache.insert_at("first".to_string(), page(false), start);
        cache.insert_at("second".to_string(), page(false), start + Duration::from_secs(1));
        cache.insert_at("third".to_string(), page(false), start + Duration::from_secs(2));

        assert_eq!(cache.len(), 2);
        assert!(cache.get_at("first", start + Duration::from_secs(3)).is_none());
        assert!(cache.get_at("second", start + Duration::from_secs(3)).is_some());
        assert!(cache.get_at("third", start + Duration::from_secs(3)).is_some());
    }

    #[test]
    fn reinsert_refreshes_without_evicting() {
        let mut cache = ResultCache::new(Duration::from_secs(60), 2);
        let start = Instant::now();
        cache.insert_at("a".to_string(), page(false), start);
        cache.insert_at("b".to_string(), page(false), start + Duration::from_secs(1));
        cache.insert_at("a".to_string(), page(true), start + Duration::from_secs(2));

        assert_eq!(cache.len(), 2);
        let refreshed = cache.get_at("a", start + Duration::from_secs(3));
        assert!(refreshed.is_some_and(|p| p.exhausted));
        assert!(cache.get_at("b", start + Duration::from_secs(3)).is_some());
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = ResultCache::new(Duration::from_secs(60), 0);
        cache.insert("k".to_string(), page(false));
        assert!(cache.get("k").is_none());
    }
}
