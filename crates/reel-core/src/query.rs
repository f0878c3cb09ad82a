//! Parsed query representation.

use serde::{Deserialize, Serialize};

/// Output of the query parser: normalized free text plus structured tag
/// filters extracted from hashtags and comma-separated single words.
///
/// `tag_filters` is an ordered set: lowercase, deduplicated, capped by the
/// parser, and guaranteed never to contain a reserved sort keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub text: String,
    pub tag_filters: Vec<String>,
}

impl ParsedQuery {
    #[must_use]
    pub fn new(text: impl Into<String>, tag_filters: Vec<String>) -> Self {
        Self {
            text: text.into(),
            tag_filters,
        }
    }

    /// True when neither free text nor tag filters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.tag_filters.is_empty()
    }

    #[must_use]
    pub const fn has_tag_filters(&self) -> bool {
        !self.tag_filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_empty() {
        assert!(ParsedQuery::default().is_empty());
        assert!(!ParsedQuery::new("cats", vec![]).is_empty());
        assert!(!ParsedQuery::new("", vec!["surf".to_string()]).is_empty());
    }
}
