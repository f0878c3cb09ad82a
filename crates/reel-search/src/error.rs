//! Search error types.

/// Errors from the search pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The catalog RPC failed. Fatal to the call: falling back to a live
    /// fan-out after a catalog *error* is caller policy, not engine policy.
    #[error("catalog error: {0}")]
    Catalog(#[from] reel_sources::SourceError),

    /// The call was cancelled before it completed. Distinct from an empty
    /// result on purpose: a cancelled search produced nothing to show.
    #[error("cancelled")]
    Cancelled,

    /// A newer search superseded this one; its result was discarded.
    #[error("superseded by a newer search")]
    Superseded,
}
