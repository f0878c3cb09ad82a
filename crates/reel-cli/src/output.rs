//! Terminal output: aligned tables for humans, JSON for everything else.

use chrono::{DateTime, Utc};

use reel_core::{SearchPage, VideoHit};

const TITLE_WIDTH: usize = 46;

/// Print one result page in the requested format.
pub fn print_page(page: &SearchPage, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    if page.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let headers = ["#", "TITLE", "SOURCE", "LENGTH", "CREATOR", "VIEWS", "RATING", "PUBLISHED"];
    let rows: Vec<Vec<String>> = page
        .hits
        .iter()
        .enumerate()
        .map(|(index, hit)| hit_row(index + 1, hit))
        .collect();
    println!("{}", render_table(&headers, &rows));

    let count = page.len();
    if page.exhausted {
        println!("\n{count} result(s), end of results.");
    } else {
        println!("\n{count} result(s), more available.");
    }
    Ok(())
}

fn hit_row(position: usize, hit: &VideoHit) -> Vec<String> {
    vec![
        position.to_string(),
        truncate_text(&hit.title, TITLE_WIDTH),
        hit.source_name.clone(),
        format_duration(hit.duration_secs),
        truncate_text(&hit.creator.display_name, 20),
        format_views(hit.view_count),
        format_rating(hit.rating_percent),
        format_date(hit.published_at),
    ]
}

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(String::len)
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(widths.iter().copied())
        .map(|(header, width)| format!("{header:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string();

    let divider = "-".repeat(header_line.len());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .copied()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                if looks_numeric(value) {
                    format!("{value:>width$}")
                } else {
                    format!("{value:<width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = vec![header_line, divider];
    lines.extend(row_lines);
    lines.join("\n")
}

fn looks_numeric(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ':' | '%' | 'K' | 'M' | '-'))
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn format_duration(secs: u32) -> String {
    if secs == 0 {
        return "-".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}K", views as f64 / 1_000.0)
    } else {
        views.to_string()
    }
}

fn format_rating(rating: Option<f32>) -> String {
    rating.map_or_else(|| "-".to_string(), |percent| format!("{percent:.0}%"))
}

fn format_date(published: Option<DateTime<Utc>>) -> String {
    published.map_or_else(|| "-".to_string(), |ts| ts.format("%Y-%m-%d").to_string())
}
