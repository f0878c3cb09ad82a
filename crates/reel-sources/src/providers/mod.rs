//! Built-in live provider adapters.
//!
//! Each submodule wraps one upstream search API behind the [`Provider`]
//! trait. [`BUILTIN`] fixes the canonical fan-out order; result
//! interleaving follows it, never arrival timing.

pub mod clipmill;
pub mod streamvat;
pub mod vidora;

pub use clipmill::Clipmill;
pub use streamvat::Streamvat;
pub use vidora::Vidora;

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Provider, SourceError};

/// Names of every built-in provider, in canonical fan-out order.
pub const BUILTIN: &[&str] = &[vidora::NAME, streamvat::NAME, clipmill::NAME];

/// Instantiate a built-in provider by name.
///
/// `base_url` overrides the provider's production endpoint (staging
/// deployments, tests).
///
/// # Errors
///
/// Returns [`SourceError::UnknownProvider`] when `name` matches no
/// built-in provider.
pub fn by_name(
    name: &str,
    http: &reqwest::Client,
    base_url: Option<&str>,
) -> Result<Arc<dyn Provider>, SourceError> {
    let key = name.trim().to_ascii_lowercase();
    let provider: Arc<dyn Provider> = match key.as_str() {
        vidora::NAME => match base_url {
            Some(base) => Arc::new(Vidora::with_base_url(http.clone(), base)),
            None => Arc::new(Vidora::new(http.clone())),
        },
        streamvat::NAME => match base_url {
            Some(base) => Arc::new(Streamvat::with_base_url(http.clone(), base)),
            None => Arc::new(Streamvat::new(http.clone())),
        },
        clipmill::NAME => match base_url {
            Some(base) => Arc::new(Clipmill::with_base_url(http.clone(), base)),
            None => Arc::new(Clipmill::new(http.clone())),
        },
        _ => return Err(SourceError::UnknownProvider(key)),
    };
    Ok(provider)
}

/// Instantiate providers for every name in `names`, preserving order.
///
/// `base_urls` maps provider names to endpoint overrides; providers not in
/// the map use their production endpoints.
///
/// # Errors
///
/// Returns [`SourceError::UnknownProvider`] on the first name that matches
/// no built-in provider.
pub fn from_names<I, S>(
    names: I,
    http: &reqwest::Client,
    base_urls: &HashMap<String, String>,
) -> Result<Vec<Arc<dyn Provider>>, SourceError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            let base = base_urls
                .get(&name.trim().to_ascii_lowercase())
                .map(String::as_str);
            by_name(name, http, base)
        })
        .collect()
}

#[cfg(test)]
impl std::fmt::Debug for dyn Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider").field("name", &self.name()).finish()
    }
}
