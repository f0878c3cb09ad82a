//! Sort modes, duration buckets, source filters, and creator tiers.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Filter enums carry their own `matches` predicates so the filter stage stays
//! a thin loop over them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (exclusive) of the Short duration bucket, in seconds.
pub const SHORT_MAX_SECS: u32 = 600;
/// Upper bound (inclusive) of the Medium duration bucket, in seconds.
pub const MEDIUM_MAX_SECS: u32 = 1200;

// ---------------------------------------------------------------------------
// SortMode
// ---------------------------------------------------------------------------

/// Result ordering profile. Selects the ranking weight table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Personalized blend of text match, affinity, quality, and freshness.
    #[default]
    Trending,
    /// Freshness-dominated ordering.
    New,
    /// Quality-dominated ordering.
    Best,
}

impl SortMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::New => "new",
            Self::Best => "best",
        }
    }

    /// Parse a sort keyword, accepting the German UI equivalents.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trending" => Some(Self::Trending),
            "new" | "neu" => Some(Self::New),
            "best" | "beste" => Some(Self::Best),
            _ => None,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DurationFilter
// ---------------------------------------------------------------------------

/// Post-fetch duration bucket.
///
/// A duration of exactly `0` means "unknown" and is excluded by every named
/// bucket; only `All` passes it through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationFilter {
    #[default]
    All,
    /// `0 < secs < 600`
    Short,
    /// `600 <= secs <= 1200`
    Medium,
    /// `secs > 1200`
    Long,
}

impl DurationFilter {
    /// Whether a clip of `secs` seconds falls into this bucket.
    #[must_use]
    pub const fn matches(self, secs: u32) -> bool {
        match self {
            Self::All => true,
            Self::Short => secs > 0 && secs < SHORT_MAX_SECS,
            Self::Medium => secs >= SHORT_MAX_SECS && secs <= MEDIUM_MAX_SECS,
            Self::Long => secs > MEDIUM_MAX_SECS,
        }
    }

    /// True when this filter actually constrains results.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::All)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

impl fmt::Display for DurationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SourceFilter
// ---------------------------------------------------------------------------

/// Restrict results to a single source, or pass everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFilter {
    #[default]
    All,
    /// Keep only hits whose `source_name` equals this label (case-insensitive).
    Only(String),
}

impl SourceFilter {
    #[must_use]
    pub fn matches(&self, source_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.eq_ignore_ascii_case(source_name),
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::All)
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(name) => f.write_str(name),
        }
    }
}

// ---------------------------------------------------------------------------
// CreatorTier
// ---------------------------------------------------------------------------

/// Coarse uploader classification carried through from the sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatorTier {
    #[default]
    Unknown,
    Amateur,
    Pro,
    Studio,
}

impl CreatorTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Amateur => "amateur",
            Self::Pro => "pro",
            Self::Studio => "studio",
        }
    }
}

impl fmt::Display for CreatorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QueryIntent
// ---------------------------------------------------------------------------

/// How specific a query looks. Damps the personalization weight for
/// precise queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    /// Vague or navigational browsing; personalization at full weight.
    #[default]
    Browse,
    /// The user typed something precise; halve the personalization weight.
    Exact,
}

impl QueryIntent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
