//! Query understanding for reelmux.
//!
//! Turns a raw search string into a [`reel_core::ParsedQuery`] (free text
//! plus tag filters), breaks the free text into lexical tokens for scoring,
//! and classifies how the query should be ranked
//! ([`reel_core::QueryIntent`]).
//!
//! The pipeline is deliberately small and allocation-light: parsing walks
//! the input once per stage and every stage is a pure function, so the
//! whole module is trivially testable without any provider plumbing.

pub mod aliases;
pub mod intent;
pub mod parse;
pub mod tokenize;

pub use aliases::CategoryAliases;
pub use intent::{classify_intent, IntentThresholds};
pub use parse::{parse, MAX_TAG_FILTERS};
pub use tokenize::{tokenize, MAX_QUERY_TOKENS, MIN_TOKEN_CHARS};
