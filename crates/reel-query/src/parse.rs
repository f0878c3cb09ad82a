//! Raw query string parsing.
//!
//! A query like `#drone surf, big waves` carries two different kinds of
//! information: tag filters the catalog can apply server-side, and free
//! text the ranker scores lexically. [`parse`] separates the two.
//!
//! Tag filters come from three places, in order:
//!
//! 1. `#hashtag` markers anywhere in the string.
//! 2. Single-word clauses of a comma-separated query ("drone, nice long
//!    pan" reads as tag `drone` plus text "nice long pan").
//! 3. Category aliases: a clause or the whole remainder that matches a
//!    known display name resolves to its canonical tag.
//!
//! Tag filters are lowercased, deduplicated, stripped of reserved sort
//! keywords, and capped at [`MAX_TAG_FILTERS`].

use reel_core::ParsedQuery;

use crate::aliases::CategoryAliases;

/// Upper bound on tag filters per query.
pub const MAX_TAG_FILTERS: usize = 8;

/// Sort-mode keywords (English and German UI labels). These select a sort
/// on the browse surface and must never leak into tag filters.
const RESERVED_TAGS: &[&str] = &[
    "trending",
    "angesagt",
    "new",
    "neu",
    "best",
    "beste",
    "shorts",
    "kurzclips",
];

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Pulls `#hashtag` markers out of `raw`.
///
/// A hashtag is a `#` followed by at least one alphanumeric, `-`, or `_`
/// character. The marker and its token are removed from the returned text;
/// a `#` with no token chars behind it (as in "c# tutorial") is left in
/// place.
fn extract_hashtags(raw: &str) -> (String, Vec<String>) {
    let mut text = String::with_capacity(raw.len());
    let mut tags = Vec::new();
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '#' {
            text.push(c);
            continue;
        }
        let mut tag = String::new();
        while let Some(&next) = chars.peek() {
            if !is_tag_char(next) {
                break;
            }
            tag.push(next);
            chars.next();
        }
        if tag.is_empty() {
            text.push('#');
        } else {
            tags.push(tag);
            text.push(' ');
        }
    }
    (text, tags)
}

/// Applies the comma heuristic to the post-hashtag remainder.
///
/// Only kicks in when the remainder splits into two or more non-empty
/// clauses: single-word clauses become tag candidates, multi-word clauses
/// are rejoined into the free text. Returns `None` when the heuristic does
/// not apply and the remainder should pass through untouched.
fn split_comma_clauses(remainder: &str) -> Option<(Vec<String>, String)> {
    if !remainder.contains(',') {
        return None;
    }
    let clauses: Vec<&str> = remainder
        .split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .collect();
    if clauses.len() < 2 {
        return None;
    }
    let mut tags = Vec::new();
    let mut text_clauses = Vec::new();
    for clause in clauses {
        if clause.split_whitespace().count() == 1 {
            tags.push(clause.to_string());
        } else {
            text_clauses.push(clause);
        }
    }
    Some((tags, text_clauses.join(" ")))
}

/// Parses a raw search string into free text and tag filters.
///
/// The free text is whitespace-normalized and alias-resolved; tag filters
/// are lowercase, alias-resolved, deduplicated in order of first
/// appearance, free of reserved sort keywords, and at most
/// [`MAX_TAG_FILTERS`] long.
#[must_use]
pub fn parse(raw: &str, aliases: &CategoryAliases) -> ParsedQuery {
    let (after_hashtags, mut candidates) = extract_hashtags(raw);

    let remainder = match split_comma_clauses(&after_hashtags) {
        Some((comma_tags, rest)) => {
            candidates.extend(comma_tags);
            rest
        }
        None => after_hashtags,
    };

    let collapsed = remainder.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = aliases.resolve(&collapsed).to_string();

    let mut tag_filters: Vec<String> = Vec::new();
    for candidate in candidates {
        let canonical = aliases.resolve(candidate.trim()).to_lowercase();
        if canonical.is_empty() || RESERVED_TAGS.contains(&canonical.as_str()) {
            continue;
        }
        if tag_filters.iter().any(|seen| seen == &canonical) {
            continue;
        }
        tag_filters.push(canonical);
        if tag_filters.len() == MAX_TAG_FILTERS {
            break;
        }
    }

    ParsedQuery::new(text, tag_filters)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
