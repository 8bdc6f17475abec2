//! Pure presentation layer: result records in, display lines out. No I/O.

use std::borrow::Cow;

use colored::{ColoredString, Colorize};

use crate::models::{ColorTier, DetailResult, RatingResult, RecentSummary, Subject};

/// Char-safe truncation with an ellipsis marker, used for logged response
/// bodies. Never splits inside a multi-byte character and only appends the
/// marker when something was actually cut.
pub fn truncate(value: &str, max_chars: usize) -> Cow<'_, str> {
    match value.char_indices().nth(max_chars) {
        None => Cow::Borrowed(value),
        Some((idx, _)) => Cow::Owned(format!("{}...", &value[..idx])),
    }
}

fn tier_colored(text: &str, tier: ColorTier) -> ColoredString {
    match tier {
        ColorTier::Unranked => text.magenta(),
        ColorTier::Low => text.white(),
        ColorTier::Mid => text.blue(),
        ColorTier::High => text.red(),
    }
}

fn or_na(field: Option<&str>) -> &str {
    field.unwrap_or("N/A")
}

fn pct_or_na(field: Option<&str>) -> String {
    match field {
        Some(v) => format!("{v}%"),
        None => "N/A".to_string(),
    }
}

/// The banner line preceding the group blocks.
pub fn format_header() -> String {
    "### FACEIT ELO RATINGS ###".red().to_string()
}

/// One group block: a `=== NAME ===` header plus one `name - rating` line
/// per result, ratings colored by tier.
pub fn format_group(name: &str, results: &[RatingResult]) -> Vec<String> {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(format!("=== {} ===", name.to_uppercase()).yellow().to_string());
    for result in results {
        lines.push(format!(
            "  {} - {}",
            result.display_name.green(),
            tier_colored(&result.rating_text, result.tier)
        ));
    }
    lines
}

/// The single-subject detail report: rating, lifetime block, recent block.
/// Blocks that could not be retrieved get an explanatory line rather than
/// being silently omitted.
pub fn format_detail(subject: &Subject, detail: &DetailResult) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(
        format!("### FACEIT STATS: {} ###", subject.display_name)
            .red()
            .to_string(),
    );
    lines.push(format!(
        "  Elo: {}",
        tier_colored(&detail.rating.rating_text, detail.rating.tier)
    ));

    lines.push("=== LIFETIME ===".yellow().to_string());
    match &detail.lifetime {
        Some(stats) => {
            lines.push(format!("  Matches: {}", or_na(stats.matches.as_deref())));
            lines.push(format!(
                "  Win rate: {}",
                pct_or_na(stats.win_rate_pct.as_deref())
            ));
            lines.push(format!(
                "  Average K/D: {}",
                or_na(stats.avg_kd_ratio.as_deref())
            ));
            lines.push(format!(
                "  Average HS: {}",
                pct_or_na(stats.avg_headshots_pct.as_deref())
            ));
            lines.push(format!("  ADR: {}", or_na(stats.adr.as_deref())));
            if !stats.recent_results.is_empty() {
                lines.push(format!(
                    "  Recent results: {}",
                    format_result_sequence(&stats.recent_results)
                ));
            }
        }
        None => lines.push("  could not retrieve lifetime statistics".to_string()),
    }

    lines.push("=== RECENT MATCHES ===".yellow().to_string());
    match &detail.recent {
        Some(summary) => lines.extend(format_recent_summary(summary)),
        None => lines.push("  could not retrieve recent statistics".to_string()),
    }

    lines
}

fn format_recent_summary(summary: &RecentSummary) -> Vec<String> {
    vec![
        format!(
            "  Last {} matches: {} W / {} L ({:.1}% win rate)",
            summary.matches, summary.wins, summary.losses, summary.win_rate_pct
        ),
        format!("  Average K/D: {:.2}", summary.avg_kd_ratio),
        format!("  Average HS: {:.1}%", summary.avg_headshots_pct),
        format!("  Average ADR: {:.1}", summary.avg_adr),
    ]
}

fn format_result_sequence(results: &[String]) -> String {
    results
        .iter()
        .map(|r| if r == "1" { "W" } else { "L" })
        .collect::<Vec<_>>()
        .join(" ")
}
