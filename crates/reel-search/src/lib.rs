//! # reel-search
//!
//! The search pipeline for Reelmux: filtering, deduplication, round-robin
//! interleaving, composite relevance ranking, and the fan-out/fallback
//! orchestrator that ties them to the indexed catalog and the live
//! providers.
//!
//! Entry points:
//! - [`SearchEngine`]: one full `search()` call, catalog rounds with live
//!   fallback, then filter/dedup/rank/slice.
//! - [`SearchSession`]: supersede-safe wrapper for interactive callers
//!   (newest search wins, stale completions are discarded).

pub mod cache;
pub mod dedup;
pub mod engine;
pub mod filter;
pub mod interleave;
pub mod rank;
pub mod sequence;
pub mod session;
pub mod signals;

mod error;

pub use cache::{cache_key, ResultCache};
pub use dedup::{dedup_hits, SeenIds};
pub use engine::{EngineConfig, SearchEngine};
pub use error::SearchError;
pub use filter::{apply_filters, passes_filters};
pub use interleave::round_robin;
pub use rank::{rank_hits, score_hit, ModeWeights, RankContext};
pub use sequence::{RequestSequencer, Ticket};
pub use session::SearchSession;
pub use signals::{HeuristicSignals, RankSignals};
