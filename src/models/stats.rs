use serde::{Deserialize, Serialize};

/// Lifetime aggregate statistics for one linked account. The upstream mixes
/// numeric and string formatting, so every field is kept as the display
/// string it arrived as; absent fields render "N/A".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub matches: Option<String>,
    pub win_rate_pct: Option<String>,
    pub avg_kd_ratio: Option<String>,
    pub avg_headshots_pct: Option<String>,
    pub adr: Option<String>,
    /// Most recent results, newest first, "1" = win.
    pub recent_results: Vec<String>,
}

/// One match inside the recent-match window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentMatch {
    pub kd_ratio: Option<String>,
    /// "1" = win, anything else counts as a loss.
    pub result: Option<String>,
    pub headshots_pct: Option<String>,
    pub adr: Option<String>,
}

/// Aggregates computed over a fetched recent-match window.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentSummary {
    pub matches: usize,
    pub wins: usize,
    pub losses: usize,
    /// Win percentage, one decimal place.
    pub win_rate_pct: f64,
    pub avg_kd_ratio: f64,
    pub avg_headshots_pct: f64,
    pub avg_adr: f64,
}
