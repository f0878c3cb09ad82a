//! Live-provider selection and endpoint overrides.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The providers enabled out of the box.
fn default_enabled() -> Vec<String> {
    vec![
        "vidora".to_string(),
        "streamvat".to_string(),
        "clipmill".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    /// Provider names to fan out to, in interleave order.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,

    /// Per-provider base-URL overrides, keyed by provider name. Mainly for
    /// pointing a provider at a staging host or a local stub.
    #[serde(default)]
    pub base_urls: HashMap<String, String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_urls: HashMap::new(),
        }
    }
}

impl ProvidersConfig {
    #[must_use]
    pub fn base_url_for(&self, name: &str) -> Option<&str> {
        self.base_urls.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_all_builtin_providers() {
        let config = ProvidersConfig::default();
        assert_eq!(config.enabled, vec!["vidora", "streamvat", "clipmill"]);
        assert!(config.base_urls.is_empty());
    }

    #[test]
    fn base_url_lookup() {
        let mut config = ProvidersConfig::default();
        config
            .base_urls
            .insert("vidora".to_string(), "http://localhost:9000".to_string());
        assert_eq!(config.base_url_for("vidora"), Some("http://localhost:9000"));
        assert_eq!(config.base_url_for("clipmill"), None);
    }
}
