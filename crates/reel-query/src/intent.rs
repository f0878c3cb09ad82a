//! Query intent classification.
//!
//! Short, vague queries ("mia", "cat dog") are browsing: the user wants
//! good material in the neighborhood, and personalization should pull its
//! weight. Longer or more specific queries are lookups: the user knows
//! what they want and personalization should step back. The ranker reads
//! the classification to rebalance its weights.

use reel_core::QueryIntent;
use serde::{Deserialize, Serialize};

use crate::tokenize::tokenize;

/// Tunable boundaries between browse and exact intent.
///
/// Missing fields deserialize to the shipped defaults, so configuration
/// can override a single knob without restating the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentThresholds {
    /// Query text at least this many characters long is exact.
    pub min_chars: usize,
    /// This many ranking tokens or more is exact.
    pub min_tokens: usize,
    /// Minimum token count for the long-token rule to apply.
    pub phrase_tokens: usize,
    /// A token this long (in characters) marks a multi-token query exact.
    pub long_token_chars: usize,
}

impl Default for IntentThresholds {
    fn default() -> Self {
        Self {
            min_chars: 18,
            min_tokens: 3,
            phrase_tokens: 2,
            long_token_chars: 6,
        }
    }
}

/// Classifies the free-text part of a query.
///
/// Exact when the trimmed text is at least `min_chars` characters, or it
/// tokenizes into at least `min_tokens` tokens, or it tokenizes into at
/// least `phrase_tokens` tokens one of which is `long_token_chars` or
/// longer. Everything else, including empty text, is browse intent.
#[must_use]
pub fn classify_intent(text: &str, thresholds: &IntentThresholds) -> QueryIntent {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return QueryIntent::Browse;
    }
    if trimmed.chars().count() >= thresholds.min_chars {
        return QueryIntent::Exact;
    }
    let tokens = tokenize(trimmed);
    if tokens.len() >= thresholds.min_tokens {
        return QueryIntent::Exact;
    }
    if tokens.len() >= thresholds.phrase_tokens
        && tokens
            .iter()
            .any(|token| token.chars().count() >= thresholds.long_token_chars)
    {
        return QueryIntent::Exact;
    }
    QueryIntent::Browse
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", QueryIntent::Browse)]
    #[case("   ", QueryIntent::Browse)]
    #[case("mia", QueryIntent::Browse)]
    #[case("cat dog", QueryIntent::Browse)]
    #[case("deep sea diving", QueryIntent::Exact)]
    #[case("sunset timelapse", QueryIntent::Exact)]
    #[case("four tokens in here", QueryIntent::Exact)]
    fn classifies_queries_by_shape(#[case] text: &str, #[case] expected: QueryIntent) {
        assert_eq!(classify_intent(text, &IntentThresholds::default()), expected);
    }

    #[test]
    fn char_length_alone_is_enough() {
        // One token, no spaces, but 18+ characters.
        assert_eq!(
            classify_intent("supercalifragilistic", &IntentThresholds::default()),
            QueryIntent::Exact
        );
    }

    #[test]
    fn two_short_tokens_stay_browse() {
        let thresholds = IntentThresholds::default();
        assert_eq!(classify_intent("cat dog", &thresholds), QueryIntent::Browse);
        // Same shape, but one token crosses the long-token bar.
        assert_eq!(classify_intent("cats parkour", &thresholds), QueryIntent::Exact);
    }

    #[test]
    fn thresholds_are_tunable() {
        let strict = IntentThresholds {
            min_chars: 4,
            ..IntentThresholds::default()
        };
        assert_eq!(classify_intent("mia x", &strict), QueryIntent::Exact);
        assert_eq!(classify_intent("mia", &strict), QueryIntent::Browse);
    }

    #[test]
    fn missing_config_fields_fall_back_to_defaults() {
        let parsed: IntentThresholds = serde_json::from_str(r#"{"min_chars": 10}"#)
            .expect("partial thresholds deserialize");
        assert_eq!(parsed.min_chars, 10);
        assert_eq!(parsed.min_tokens, 3);
        assert_eq!(parsed.long_token_chars, 6);
    }
}
