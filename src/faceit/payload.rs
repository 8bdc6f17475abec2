//! Structured response types for the FACEIT Data API v4. Every nested field
//! is optional and decoded defensively; an absent field is "not present",
//! never an error.

use serde::Deserialize;

use crate::models::{LifetimeStats, RecentMatch};

/// `GET /players?game={game}&game_player_id={id}`
#[derive(Debug, Deserialize)]
pub struct PlayerResponse {
    pub player_id: Option<String>,
    pub games: Option<PlayerGames>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerGames {
    pub cs2: Option<GameEntry>,
    pub csgo: Option<GameEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GameEntry {
    pub faceit_elo: Option<i64>,
}

impl PlayerResponse {
    /// Elo for the configured game, falling back across the known game keys.
    pub fn elo_for(&self, game: &str) -> Option<i64> {
        let games = self.games.as_ref()?;
        let entry = match game {
            "csgo" => games.csgo.as_ref(),
            _ => games.cs2.as_ref(),
        }?;
        entry.faceit_elo
    }
}

/// `GET /players/{player_id}/stats/{game}`
#[derive(Debug, Deserialize)]
pub struct PlayerStatsResponse {
    pub lifetime: Option<LifetimePayload>,
}

/// The upstream uses human-readable spaced key names here.
#[derive(Debug, Deserialize)]
pub struct LifetimePayload {
    #[serde(rename = "Matches")]
    pub matches: Option<String>,
    #[serde(rename = "Win Rate %")]
    pub win_rate_pct: Option<String>,
    #[serde(rename = "Average K/D Ratio")]
    pub avg_kd_ratio: Option<String>,
    #[serde(rename = "Average Headshots %")]
    pub avg_headshots_pct: Option<String>,
    #[serde(rename = "ADR")]
    pub adr: Option<String>,
    #[serde(rename = "Recent Results", default)]
    pub recent_results: Vec<String>,
}

impl From<LifetimePayload> for LifetimeStats {
    fn from(p: LifetimePayload) -> Self {
        LifetimeStats {
            matches: p.matches,
            win_rate_pct: p.win_rate_pct,
            avg_kd_ratio: p.avg_kd_ratio,
            avg_headshots_pct: p.avg_headshots_pct,
            adr: p.adr,
            recent_results: p.recent_results,
        }
    }
}

/// `GET /players/{player_id}/games/{game}/stats?limit={n}`
#[derive(Debug, Deserialize)]
pub struct MatchHistoryResponse {
    #[serde(default)]
    pub items: Vec<MatchItem>,
}

#[derive(Debug, Deserialize)]
pub struct MatchItem {
    pub stats: Option<MatchStatsPayload>,
}

#[derive(Debug, Deserialize)]
pub struct MatchStatsPayload {
    #[serde(rename = "K/D Ratio")]
    pub kd_ratio: Option<String>,
    #[serde(rename = "Result")]
    pub result: Option<String>,
    #[serde(rename = "Headshots %")]
    pub headshots_pct: Option<String>,
    #[serde(rename = "ADR")]
    pub adr: Option<String>,
}

impl From<MatchStatsPayload> for RecentMatch {
    fn from(p: MatchStatsPayload) -> Self {
        RecentMatch {
            kd_ratio: p.kd_ratio,
            result: p.result,
            headshots_pct: p.headshots_pct,
            adr: p.adr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_response_with_missing_nested_fields() {
        let p: PlayerResponse = serde_json::from_str(r#"{"player_id": "abc"}"#).unwrap();
        assert_eq!(p.player_id.as_deref(), Some("abc"));
        assert_eq!(p.elo_for("cs2"), None);

        let p: PlayerResponse =
            serde_json::from_str(r#"{"games": {"cs2": {"faceit_elo": 2100}}}"#).unwrap();
        assert_eq!(p.elo_for("cs2"), Some(2100));
        assert_eq!(p.elo_for("csgo"), None);
    }

    #[test]
    fn lifetime_payload_decodes_spaced_keys() {
        let raw = r#"{
            "lifetime": {
                "Matches": "812",
                "Win Rate %": "52",
                "Average K/D Ratio": "1.12",
                "Recent Results": ["1", "0", "1"]
            }
        }"#;
        let stats: PlayerStatsResponse = serde_json::from_str(raw).unwrap();
        let lifetime = stats.lifetime.unwrap();
        assert_eq!(lifetime.matches.as_deref(), Some("812"));
        assert_eq!(lifetime.avg_headshots_pct, None);
        assert_eq!(lifetime.recent_results, vec!["1", "0", "1"]);
    }

    #[test]
    fn match_history_tolerates_items_without_stats() {
        let raw = r#"{"items": [{"stats": {"Result": "1", "K/D Ratio": "1.5"}}, {}]}"#;
        let history: MatchHistoryResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(history.items.len(), 2);
        assert!(history.items[1].stats.is_none());
    }
}
