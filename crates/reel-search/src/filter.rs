//! Attrition filters applied after normalization.
//!
//! Filtering happens client-side because most upstreams cannot filter by
//! duration or tag server-side. The orchestrator compensates for the
//! attrition by over-fetching (see the engine's batch sizing).

use reel_core::{DurationFilter, SourceFilter, VideoHit};

/// Whether `hit` survives the active filters.
///
/// - Source: `hit.source_name` must equal the requested source
///   (case-insensitive); [`SourceFilter::All`] disables the check.
/// - Duration: the hit's length must fall in the requested bucket; an
///   unknown duration (`0`) matches no named bucket.
/// - Tags: OR semantics; with a non-empty `tag_filters`, at least one of
///   the hit's tags must match one filter (case-insensitive).
#[must_use]
pub fn passes_filters(
    hit: &VideoHit,
    source: &SourceFilter,
    duration: DurationFilter,
    tag_filters: &[String],
) -> bool {
    if !source.matches(&hit.source_name) {
        return false;
    }
    if !duration.matches(hit.duration_secs) {
        return false;
    }
    if !tag_filters.is_empty() && !tag_filters.iter().any(|tag| hit.has_tag(tag)) {
        return false;
    }
    true
}

/// Filter a batch, preserving order.
#[must_use]
pub fn apply_filters(
    hits: Vec<VideoHit>,
    source: &SourceFilter,
    duration: DurationFilter,
    tag_filters: &[String],
) -> Vec<VideoHit> {
    hits.into_iter()
        .filter(|hit| passes_filters(hit, source, duration, tag_filters))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reel_core::Creator;

    fn hit(id: &str, source: &str, secs: u32, tags: &[&str]) -> VideoHit {
        VideoHit {
            id: id.to_string(),
            title: String::new(),
            description: String::new(),
            thumbnail_url: String::new(),
            embed_url: None,
            direct_url: None,
            source_name: source.to_string(),
            duration_secs: secs,
            creator: Creator::new("c1", "someone"),
            tags: tags.iter().map(ToString::to_string).collect(),
            view_count: 0,
            rating_percent: None,
            published_at: None,
            raw_relevance: 0.0,
        }
    }

    #[test]
    fn source_filter_is_case_insensitive() {
        let h = hit("a", "Vidora", 100, &[]);
        let only = SourceFilter::Only("vidora".to_string());
        assert!(passes_filters(&h, &only, DurationFilter::All, &[]));
        let other = SourceFilter::Only("clipmill".to_string());
        assert!(!passes_filters(&h, &other, DurationFilter::All, &[]));
    }

    #[test]
    fn duration_buckets() {
        let source = SourceFilter::All;
        assert!(passes_filters(&hit("a", "x", 599, &[]), &source, DurationFilter::Short, &[]));
        assert!(!passes_filters(&hit("a", "x", 600, &[]), &source, DurationFilter::Short, &[]));
        assert!(passes_filters(&hit("a", "x", 600, &[]), &source, DurationFilter::Medium, &[]));
        assert!(passes_filters(&hit("a", "x", 1200, &[]), &source, DurationFilter::Medium, &[]));
        assert!(passes_filters(&hit("a", "x", 1201, &[]), &source, DurationFilter::Long, &[]));
    }

    #[test]
    fn unknown_duration_matches_no_named_bucket() {
        let source = SourceFilter::All;
        let h = hit("a", "x", 0, &[]);
        assert!(!passes_filters(&h, &source, DurationFilter::Short, &[]));
        assert!(!passes_filters(&h, &source, DurationFilter::Medium, &[]));
        assert!(!passes_filters(&h, &source, DurationFilter::Long, &[]));
        assert!(passes_filters(&h, &source, DurationFilter::All, &[]));
    }

    #[test]
    fn tag_filters_use_or_semantics() {
        let source = SourceFilter::All;
        let filters = vec!["a".to_string(), "b".to_string()];
        // Tagged only "c": excluded.
        assert!(!passes_filters(&hit("x", "s", 1, &["c"]), &source, DurationFilter::All, &filters));
        // Tagged "a" and "d": one match suffices.
        assert!(passes_filters(&hit("x", "s", 1, &["A", "d"]), &source, DurationFilter::All, &filters));
    }

    #[test]
    fn apply_preserves_order() {
        let hits = vec![
            hit("1", "Vidora", 100, &[]),
            hit("2", "Clipmill", 100, &[]),
            hit("3", "Vidora", 2000, &[]),
        ];
        let only = SourceFilter::Only("vidora".to_string());
        let kept = apply_filters(hits, &only, DurationFilter::All, &[]);
        let ids: Vec<&str> = kept.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
