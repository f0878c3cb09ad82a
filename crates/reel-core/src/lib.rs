//! # reel-core
//!
//! Canonical types shared across the reelmux workspace:
//! - [`VideoHit`]: the normalized result record every source maps into
//! - [`Creator`]: uploader identity attached to each hit
//! - Sort mode, duration bucket, and source filter enums
//! - [`ParsedQuery`]: free text plus structured tag filters
//! - [`SearchOptions`] / [`SearchPage`]: the public search contract
//!
//! Everything here is plain data: no I/O, no scoring, no network. The
//! provider adapters (reel-sources) produce these records, the pipeline
//! (reel-search) consumes them.

pub mod enums;
pub mod hit;
pub mod options;
pub mod query;

pub use enums::{CreatorTier, DurationFilter, QueryIntent, SortMode, SourceFilter};
pub use hit::{Creator, VideoHit};
pub use options::{SearchOptions, SearchPage, DEFAULT_LIMIT};
pub use query::ParsedQuery;
