//! Cross-source deduplication.
//!
//! The catalog and the live providers can surface the same clip in the
//! same call (and the catalog can resurface it across pagination rounds).
//! First occurrence wins; everything later with the same id is dropped.
//! Hits with an empty id are dropped unconditionally because downstream
//! stages key caches and affinity on the id.

use std::collections::HashSet;

use reel_core::VideoHit;

/// Per-call seen-id set backing cross-round deduplication.
///
/// Owned by a single orchestrator call; never persists across calls.
#[derive(Debug, Default)]
pub struct SeenIds {
    ids: HashSet<String>,
}

impl SeenIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as seen. Returns `true` when the id is new and
    /// non-empty, i.e. the hit carrying it should be kept.
    pub fn insert(&mut self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        self.ids.insert(id.to_string())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// One-shot dedup preserving first-seen order.
#[must_use]
pub fn dedup_hits(hits: Vec<VideoHit>) -> Vec<VideoHit> {
    let mut seen = SeenIds::new();
    hits.into_iter().filter(|hit| seen.insert(&hit.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reel_core::Creator;

    fn hit(id: &str, title: &str) -> VideoHit {
        VideoHit {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            thumbnail_url: String::new(),
            embed_url: None,
            direct_url: None,
            source_name: "Vidora".to_string(),
            duration_secs: 60,
            creator: Creator::new("c", "c"),
            tags: Vec::new(),
            view_count: 0,
            rating_percent: None,
            published_at: None,
            raw_relevance: 0.0,
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let hits = vec![hit("a", "first"), hit("b", "b"), hit("a", "later")];
        let deduped = dedup_hits(hits);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "first");
        assert_eq!(deduped[1].id, "b");
    }

    #[test]
    fn empty_ids_are_dropped() {
        let hits = vec![hit("", "ghost"), hit("a", "a"), hit("", "ghost2")];
        let deduped = dedup_hits(hits);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, "a");
    }

    #[test]
    fn seen_ids_spans_batches() {
        let mut seen = SeenIds::new();
        assert!(seen.insert("a"));
        assert!(seen.insert("b"));
        // Second batch in the same call: "a" already seen.
        assert!(!seen.insert("a"));
        assert!(!seen.insert(""));
        assert_eq!(seen.len(), 2);
        assert!(seen.contains("b"));
        assert!(!seen.contains(""));
    }
}
