//! Search-engine tuning knobs.

use reel_query::IntentThresholds;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_limit() -> u32 {
    24
}

const fn default_max_rounds() -> u32 {
    20
}

const fn default_overfetch_factor() -> u32 {
    3
}

const fn default_overfetch_cap() -> u32 {
    96
}

const fn default_cache_ttl_secs() -> u64 {
    180
}

const fn default_cache_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default page size when the caller does not pass one.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Safety valve on catalog rounds per search call.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Over-fetch multiplier while a source or duration filter is active.
    #[serde(default = "default_overfetch_factor")]
    pub overfetch_factor: u32,

    /// Hard cap on the per-round catalog batch size.
    #[serde(default = "default_overfetch_cap")]
    pub overfetch_cap: u32,

    /// Result-cache entry lifetime, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Result-cache entry count bound.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Query-intent classification thresholds.
    #[serde(default)]
    pub intent: IntentThresholds,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_rounds: default_max_rounds(),
            overfetch_factor: default_overfetch_factor(),
            overfetch_cap: default_overfetch_cap(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
            intent: IntentThresholds::default(),
        }
    }
}

impl SearchConfig {
    /// Reject values that would stall or degenerate the search loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.default_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.max_rounds".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.overfetch_factor == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.overfetch_factor".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = SearchConfig::default();
        assert_eq!(config.default_limit, 24);
        assert_eq!(config.max_rounds, 20);
        assert_eq!(config.overfetch_factor, 3);
        assert_eq!(config.overfetch_cap, 96);
        assert_eq!(config.cache_ttl_secs, 180);
        assert_eq!(config.cache_capacity, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = SearchConfig {
            default_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let config = SearchConfig {
            max_rounds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
