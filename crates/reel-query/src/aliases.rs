//! Category-name to canonical-tag mapping.
//!
//! Browse surfaces label categories with display names ("Music Videos",
//! "Dokumentation") while the catalog and the providers index canonical
//! tags ("music", "docu"). When a user types a category name verbatim,
//! the parser swaps it for the canonical tag so the rest of the pipeline
//! only ever sees tag vocabulary.

use std::collections::HashMap;

/// Built-in display-name aliases shipped with the binary.
///
/// Keys are matched case-insensitively against the whole candidate string,
/// never as a substring, so "music videos tonight" is left alone while
/// "Music Videos" resolves to `music`.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("music videos", "music"),
    ("musikvideos", "music"),
    ("how-to", "howto"),
    ("how to", "howto"),
    ("anleitungen", "howto"),
    ("documentary", "docu"),
    ("dokumentation", "docu"),
    ("behind the scenes", "bts"),
    ("hinter den kulissen", "bts"),
    ("short films", "shortfilm"),
    ("kurzfilme", "shortfilm"),
    ("travel vlogs", "travel"),
    ("reisevlogs", "travel"),
];

/// Lookup table from category display names to canonical tags.
///
/// Starts from the built-in table and can be extended with pairs from
/// configuration. Lookups are case-insensitive whole-string matches.
#[derive(Debug, Clone)]
pub struct CategoryAliases {
    map: HashMap<String, String>,
}

impl Default for CategoryAliases {
    fn default() -> Self {
        let mut map = HashMap::with_capacity(BUILTIN_ALIASES.len());
        for (alias, canonical) in BUILTIN_ALIASES {
            map.insert((*alias).to_string(), (*canonical).to_string());
        }
        Self { map }
    }
}

impl CategoryAliases {
    /// Empty table, for callers that want full control over the mapping.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Builds the default table extended with `pairs` (config overrides).
    ///
    /// Later pairs win over the built-ins and over earlier pairs.
    #[must_use]
    pub fn with_extra<I, A, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let mut aliases = Self::default();
        for (alias, canonical) in pairs {
            aliases.insert(alias.as_ref(), canonical.as_ref());
        }
        aliases
    }

    /// Registers one alias. The key is stored lowercased.
    pub fn insert(&mut self, alias: &str, canonical: &str) {
        self.map
            .insert(alias.trim().to_lowercase(), canonical.trim().to_string());
    }

    /// Canonical tag for `candidate`, if the whole string is a known alias.
    #[must_use]
    pub fn canonical_for(&self, candidate: &str) -> Option<&str> {
        self.map
            .get(&candidate.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Returns the canonical tag when `candidate` is an alias, otherwise
    /// hands the input back unchanged.
    #[must_use]
    pub fn resolve<'a>(&'a self, candidate: &'a str) -> &'a str {
        self.canonical_for(candidate).unwrap_or(candidate)
    }

    /// Number of registered aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
