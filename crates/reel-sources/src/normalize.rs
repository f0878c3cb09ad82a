//! Shared normalization helpers for heterogeneous source shapes.
//!
//! Every upstream encodes the same facts differently: durations arrive as
//! `"1:02:10"`, `"12:45"`, or bare seconds; uploader identity ranges from a
//! full profile object to nothing at all. The helpers here fold those shapes
//! into the normalized record fields. All of them are pure, total, and
//! deterministic: malformed input coalesces to a safe default, never to a
//! panic or an error.

use chrono::{DateTime, Utc};

/// Parse a duration that may be `"H:MM:SS"`, `"MM:SS"`, or bare seconds.
///
/// Malformed input (negative, non-numeric, too many segments) yields `0`,
/// the "unknown duration" sentinel that no duration bucket matches.
#[must_use]
pub fn parse_duration(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if !trimmed.contains(':') {
        return trimmed.parse::<u32>().unwrap_or(0);
    }
    let segments: Vec<&str> = trimmed.split(':').collect();
    if segments.len() > 3 {
        return 0;
    }
    let mut total: u64 = 0;
    for segment in segments {
        let Ok(value) = segment.trim().parse::<u64>() else {
            return 0;
        };
        total = total * 60 + value;
    }
    u32::try_from(total).unwrap_or(0)
}

/// Lowercase a display name into a stable id segment.
///
/// Alphanumeric runs are kept, everything else collapses into single
/// dashes. `"Mia West!"` becomes `"mia-west"`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Derive a stable creator id from whatever identity data a source exposes.
///
/// Preference order: the source's explicit id, then the first
/// keyword/category, then a `{source}:{slug-of-name}` synthetic id. The
/// result is never empty as long as `source` is non-empty.
#[must_use]
pub fn creator_id(
    explicit: Option<&str>,
    fallback_tag: Option<&str>,
    source: &str,
    display_name: &str,
) -> String {
    if let Some(id) = explicit {
        let id = id.trim();
        if !id.is_empty() {
            return id.to_string();
        }
    }
    if let Some(tag) = fallback_tag {
        let tag = tag.trim();
        if !tag.is_empty() {
            return tag.to_lowercase();
        }
    }
    format!("{source}:{}", slugify(display_name))
}

/// Whether a creator id is really the site itself rather than a person.
///
/// Sources that republish network uploads attribute them to the site's own
/// pseudo-identity (the source name, or an id carrying a leading/trailing
/// `network` marker). Such creators cannot be subscribed to.
#[must_use]
pub fn is_network_identity(id: &str, source: &str) -> bool {
    let id = id.trim().to_lowercase();
    id == source.to_lowercase() || id.starts_with("network") || id.ends_with("network")
}

/// Convert a 0-5 star rating into a percentage.
///
/// Zero, negative, and non-finite values read as "no rating data".
#[must_use]
pub fn percent_from_stars(stars: f32) -> Option<f32> {
    if !stars.is_finite() || stars <= 0.0 {
        return None;
    }
    Some((stars / 5.0 * 100.0).clamp(0.0, 100.0))
}

/// Clamp an already-percent rating into `0..=100`, treating zero and
/// non-finite values as absent.
#[must_use]
pub fn clamp_percent(percent: f32) -> Option<f32> {
    if !percent.is_finite() || percent <= 0.0 {
        return None;
    }
    Some(percent.clamp(0.0, 100.0))
}

/// Parse an RFC 3339 timestamp, tolerating malformed input as `None`.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Trim and drop empty tags, preserving order and display casing.
///
/// Tag matching downstream is case-insensitive, so the original casing is
/// kept for display.
#[must_use]
pub fn clean_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|tag| tag.as_ref().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duration_formats() {
        assert_eq!(parse_duration("1:02:10"), 3730);
        assert_eq!(parse_duration("12:45"), 765);
        assert_eq!(parse_duration("734"), 734);
        assert_eq!(parse_duration(" 0:59 "), 59);
    }

    #[test]
    fn malformed_durations_become_zero() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("abc"), 0);
        assert_eq!(parse_duration("-5"), 0);
        assert_eq!(parse_duration("1:xx:10"), 0);
        assert_eq!(parse_duration("1:2:3:4"), 0);
    }

    #[test]
    fn slugify_display_names() {
        assert_eq!(slugify("Mia West!"), "mia-west");
        assert_eq!(slugify("  DiveHub  "), "divehub");
        assert_eq!(slugify("4K & Chill"), "4k-chill");
        assert_eq!(slugify("___"), "");
    }

    #[test]
    fn creator_id_preference_order() {
        assert_eq!(
            creator_id(Some("mia-west"), Some("diving"), "vidora", "Mia West"),
            "mia-west"
        );
        assert_eq!(
            creator_id(None, Some("Diving"), "streamvat", "DiveHub"),
            "diving"
        );
        assert_eq!(
            creator_id(None, None, "streamvat", "DiveHub"),
            "streamvat:divehub"
        );
        assert_eq!(creator_id(Some("  "), Some(""), "vidora", "Mia"), "vidora:mia");
    }

    #[test]
    fn network_identities() {
        assert!(is_network_identity("vidora", "vidora"));
        assert!(is_network_identity("VIDORA", "vidora"));
        assert!(is_network_identity("network-uploads", "clipmill"));
        assert!(is_network_identity("clips-network", "clipmill"));
        assert!(!is_network_identity("mia-west", "vidora"));
    }

    #[test]
    fn star_ratings_to_percent() {
        assert_eq!(percent_from_stars(4.5), Some(90.0));
        assert_eq!(percent_from_stars(5.0), Some(100.0));
        assert_eq!(percent_from_stars(6.0), Some(100.0));
        assert_eq!(percent_from_stars(0.0), None);
        assert_eq!(percent_from_stars(-1.0), None);
        assert_eq!(percent_from_stars(f32::NAN), None);
    }

    #[test]
    fn percent_clamping() {
        assert_eq!(clamp_percent(87.0), Some(87.0));
        assert_eq!(clamp_percent(140.0), Some(100.0));
        assert_eq!(clamp_percent(0.0), None);
        assert_eq!(clamp_percent(f32::INFINITY), None);
    }

    #[test]
    fn timestamps() {
        let parsed = parse_timestamp("2024-03-01T12:00:00Z").unwrap();
        assert_eq!(parsed.timestamp(), 1_709_294_400);
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn tag_cleaning() {
        assert_eq!(
            clean_tags(["  Diving ", "OCEAN", "", "4k"]),
            vec!["Diving", "OCEAN", "4k"]
        );
    }
}
