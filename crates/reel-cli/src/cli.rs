use clap::{Args, Parser, Subcommand};

use reel_core::{DurationFilter, SortMode};

/// Top-level CLI parser for the `rlx` binary.
#[derive(Debug, Parser)]
#[command(name = "rlx", version, about = "Reelmux - multi-source video search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Emit JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search the indexed catalog with live-provider fallback
    Search(SearchArgs),
    /// List the configured live providers
    Providers,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query text; `#tags` and comma-separated single words become tag filters
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Page size (defaults to `search.default_limit` from config)
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Number of leading results to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Keep only results from one source (e.g. "vidora")
    #[arg(short, long)]
    pub source: Option<String>,

    /// Duration bucket
    #[arg(short, long, value_parser = parse_duration_filter, default_value = "all")]
    pub duration: DurationFilter,

    /// Ordering profile
    #[arg(long, value_parser = parse_sort_mode, default_value = "trending")]
    pub sort: SortMode,

    /// Skip the indexed catalog and query the live providers directly
    #[arg(long)]
    pub live: bool,

    /// Retry against the live providers when the catalog RPC fails
    #[arg(long, conflicts_with = "live")]
    pub fallback_live: bool,
}

impl SearchArgs {
    /// The words of the query joined back into one string.
    #[must_use]
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

fn parse_duration_filter(s: &str) -> Result<DurationFilter, String> {
    DurationFilter::parse(s)
        .ok_or_else(|| format!("unknown duration '{s}' (expected all, short, medium, or long)"))
}

fn parse_sort_mode(s: &str) -> Result<SortMode, String> {
    SortMode::parse(s).ok_or_else(|| format!("unknown sort '{s}' (expected trending, new, or best)"))
}
