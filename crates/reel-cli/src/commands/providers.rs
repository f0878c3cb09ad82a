//! The `rlx providers` command: show the provider roster and endpoints.

use serde::Serialize;

use reel_config::ReelConfig;
use reel_sources::providers::BUILTIN;

use crate::output;

#[derive(Debug, Serialize)]
pub struct ProviderRow {
    pub name: String,
    pub enabled: bool,
    pub base_url: String,
}

pub fn handle(json: bool, config: &ReelConfig) -> anyhow::Result<()> {
    let rows = provider_rows(config);

    for name in &config.providers.enabled {
        let known = BUILTIN
            .iter()
            .any(|builtin| builtin.eq_ignore_ascii_case(name));
        if !known {
            tracing::warn!(provider = %name, "enabled provider is not built in and will fail to load");
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let headers = ["NAME", "ENABLED", "BASE URL"];
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.name.clone(),
                if row.enabled { "yes" } else { "no" }.to_string(),
                row.base_url.clone(),
            ]
        })
        .collect();
    println!("{}", output::render_table(&headers, &table_rows));
    Ok(())
}

fn provider_rows(config: &ReelConfig) -> Vec<ProviderRow> {
    BUILTIN
        .iter()
        .map(|name| {
            let enabled = config
                .providers
                .enabled
                .iter()
                .any(|enabled| enabled.eq_ignore_ascii_case(name));
            let base_url = config
                .providers
                .base_url_for(name)
                .unwrap_or("(default)")
                .to_string();
            ProviderRow {
                name: (*name).to_string(),
                enabled,
                base_url,
            }
        })
        .collect()
}
