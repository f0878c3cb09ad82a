//! # reel-config
//!
//! Layered configuration loading for Reelmux using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REELMUX_*` prefix, `__` as separator)
//! 2. Project-level `.reelmux/config.toml`
//! 3. User-level `~/.config/reelmux/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REELMUX_CATALOG__BASE_URL` -> `catalog.base_url`,
//! `REELMUX_SEARCH__CACHE_TTL_SECS` -> `search.cache_ttl_secs`, etc. The `__`
//! (double underscore) separates nested config sections, so intent thresholds
//! nest twice: `REELMUX_SEARCH__INTENT__MIN_CHARS` -> `search.intent.min_chars`.
//!
//! # Usage
//!
//! ```no_run
//! use reel_config::ReelConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = ReelConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = ReelConfig::load().expect("config");
//!
//! if config.catalog.is_configured() {
//!     println!("Catalog: {}", config.catalog.base_url);
//! }
//! ```

mod catalog;
mod error;
mod providers;
mod search;

pub use catalog::CatalogConfig;
pub use error::ConfigError;
pub use providers::ProvidersConfig;
pub use search::SearchConfig;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReelConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl ReelConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`REELMUX_*` prefix)
    /// 2. `.reelmux/config.toml` (project-local)
    /// 3. `~/.config/reelmux/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] on a merge or extraction failure,
    /// [`ConfigError::InvalidValue`] when a search knob is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.search.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".reelmux/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("REELMUX_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reelmux").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}
