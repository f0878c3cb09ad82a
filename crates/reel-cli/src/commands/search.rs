//! The `rlx search` command: build the engine from config and run one call.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use reel_config::ReelConfig;
use reel_core::{SearchOptions, SourceFilter};
use reel_search::{EngineConfig, SearchEngine, SearchError};
use reel_sources::{providers, HttpCatalog};

use crate::cli::SearchArgs;
use crate::output;

pub async fn handle(args: &SearchArgs, json: bool, config: &ReelConfig) -> anyhow::Result<()> {
    if !args.live && !config.catalog.is_configured() {
        anyhow::bail!(
            "catalog.base_url is not configured; set REELMUX_CATALOG__BASE_URL or pass --live"
        );
    }

    let engine = build_engine(config)?;
    let options = search_options(args, config);
    let query = args.query_text();

    let cancel = CancellationToken::new();
    let ctrl_c = spawn_ctrl_c(cancel.clone());

    let outcome = if args.live {
        engine.search_live(&query, &options, &cancel).await
    } else {
        match engine.search(&query, &options, &cancel).await {
            Err(SearchError::Catalog(error)) if args.fallback_live => {
                tracing::warn!(%error, "catalog search failed, retrying against live providers");
                engine.search_live(&query, &options, &cancel).await
            }
            other => other,
        }
    };
    ctrl_c.abort();

    match outcome {
        Ok(page) => output::print_page(&page, json),
        Err(SearchError::Cancelled) => anyhow::bail!("search cancelled"),
        Err(error) => Err(error.into()),
    }
}

fn build_engine(config: &ReelConfig) -> anyhow::Result<SearchEngine> {
    let client = reel_sources::default_client(config.catalog.timeout_secs);
    let catalog = Arc::new(HttpCatalog::new(client.clone(), &config.catalog.base_url));
    let live = providers::from_names(
        &config.providers.enabled,
        &client,
        &config.providers.base_urls,
    )
    .context("failed to construct live providers")?;

    let engine_config = EngineConfig {
        max_rounds: config.search.max_rounds,
        overfetch_factor: config.search.overfetch_factor,
        overfetch_cap: config.search.overfetch_cap,
        cache_ttl: Duration::from_secs(config.search.cache_ttl_secs),
        cache_capacity: config.search.cache_capacity,
        intent: config.search.intent,
    };
    Ok(SearchEngine::new(catalog, live, engine_config))
}

fn search_options(args: &SearchArgs, config: &ReelConfig) -> SearchOptions {
    let source = args.source.as_ref().map_or(SourceFilter::All, |name| {
        if name.eq_ignore_ascii_case("all") {
            SourceFilter::All
        } else {
            SourceFilter::Only(name.clone())
        }
    });

    SearchOptions::new()
        .with_limit(args.limit.unwrap_or(config.search.default_limit))
        .with_offset(args.offset)
        .with_source(source)
        .with_duration(args.duration)
        .with_sort(args.sort)
}

fn spawn_ctrl_c(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use reel_core::DurationFilter;

    fn args(argv: &[&str]) -> SearchArgs {
        let cli = crate::cli::Cli::try_parse_from(argv).expect("argv parses");
        match cli.command {
            crate::cli::Commands::Search(args) => args,
            crate::cli::Commands::Providers => panic!("expected search"),
        }
    }

    #[test]
    fn options_default_limit_comes_from_config() {
        let mut config = ReelConfig::default();
        config.search.default_limit = 12;
        let options = search_options(&args(&["rlx", "search", "reef"]), &config);
        assert_eq!(options.limit, 12);
        assert_eq!(options.offset, 0);
        assert_eq!(options.source, SourceFilter::All);
    }

    #[test]
    fn explicit_limit_beats_config() {
        let config = ReelConfig::default();
        let options = search_options(&args(&["rlx", "search", "reef", "--limit", "5"]), &config);
        assert_eq!(options.limit, 5);
    }

    #[test]
    fn source_all_maps_to_the_sentinel() {
        let config = ReelConfig::default();
        let options =
            search_options(&args(&["rlx", "search", "reef", "--source", "All"]), &config);
        assert_eq!(options.source, SourceFilter::All);
    }

    #[test]
    fn named_source_is_kept_verbatim() {
        let config = ReelConfig::default();
        let options = search_options(
            &args(&["rlx", "search", "reef", "--source", "vidora", "--duration", "long"]),
            &config,
        );
        assert_eq!(options.source, SourceFilter::Only("vidora".to_string()));
        assert_eq!(options.duration, DurationFilter::Long);
        assert!(options.has_attrition_filter());
    }

    #[test]
    fn engine_builds_from_default_config() {
        let engine = build_engine(&ReelConfig::default()).expect("engine builds");
        assert_eq!(engine.provider_names(), vec!["vidora", "streamvat", "clipmill"]);
    }
}
