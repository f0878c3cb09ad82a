//! Lexical tokenization of query text.
//!
//! The ranker scores hits by matching query tokens against titles,
//! creators, descriptions, and tags, so the tokenizer has to be cheap,
//! deterministic, and language-neutral. Tokens are maximal runs of
//! Unicode alphanumerics, lowercased, with very short tokens and
//! common English/German filler words removed.

/// Upper bound on tokens handed to the ranker.
pub const MAX_QUERY_TOKENS: usize = 8;

/// Tokens shorter than this (in characters) carry no signal and are dropped.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Filler words that would otherwise dominate lexical overlap.
///
/// English and German, because those are the two query languages the
/// product ships with. Everything here is at least [`MIN_TOKEN_CHARS`]
/// long; shorter fillers are already caught by the length rule.
const STOPWORDS: &[&str] = &[
    // English
    "the", "and", "for", "with", "that", "this", "what", "when", "where",
    "who", "how", "are", "was", "were", "you", "your", "from", "have",
    "has", "had", "not", "but", "all", "any", "can", "will", "just",
    "about", "into", "over", "some", "more", "most", "other", "only",
    "very", "than", "then", "them", "they", "out", "get",
    // German
    "und", "der", "die", "das", "den", "dem", "des", "ein", "eine",
    "einen", "einem", "einer", "mit", "von", "für", "auf", "aus", "bei",
    "nach", "über", "unter", "vor", "nicht", "auch", "aber", "oder",
    "wenn", "dann", "nur", "noch", "schon", "sehr", "wie", "was", "wer",
    "ist", "sind", "war", "hat", "haben", "wird", "werden", "kann",
    "ich", "sie", "wir", "ihr", "mein", "dein", "sein", "ihre", "beim",
    "zum", "zur", "als", "man", "mal", "hier", "alle", "viel", "viele",
    "mehr", "immer", "wieder",
];

/// Splits `text` into ranking tokens.
///
/// Tokens are maximal runs of Unicode alphanumeric characters, lowercased.
/// Tokens shorter than [`MIN_TOKEN_CHARS`], stopwords, and repeats are
/// dropped; at most [`MAX_QUERY_TOKENS`] tokens are returned, in order of
/// first appearance.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for raw in text.split(|c: char| !c.is_alphanumeric()) {
        if raw.is_empty() {
            continue;
        }
        let token: String = raw.chars().flat_map(char::to_lowercase).collect();
        if token.chars().count() < MIN_TOKEN_CHARS {
            continue;
        }
        if STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        if tokens.iter().any(|seen| seen == &token) {
            continue;
        }
        tokens.push(token);
        if tokens.len() == MAX_QUERY_TOKENS {
            break;
        }
    }
    tokens
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
