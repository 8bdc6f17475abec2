use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::PLACEHOLDER_API_KEY;
use crate::format::truncate;
use crate::models::{LifetimeStats, RecentMatch, Result, ScoutError, UNKNOWN_ELO};

use super::client::{ClientConfig, LookupClient};
use super::payload::{MatchHistoryResponse, PlayerResponse, PlayerStatsResponse};

/// How much of a response body the debug log may show.
const LOG_BODY_LIMIT: usize = 200;

/// HTTP client against the FACEIT Data API v4. All trait operations fail
/// closed: internal errors are logged and mapped to the sentinel / `None`
/// at the boundary, never propagated.
pub struct FaceitClient {
    rating_http: reqwest::Client,
    stats_http: reqwest::Client,
    config: ClientConfig,
}

impl FaceitClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let rating_http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.rating_timeout_secs))
            .build()?;
        let stats_http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.stats_timeout_secs))
            .build()?;

        Ok(Self {
            rating_http,
            stats_http,
            config,
        })
    }

    pub fn from_settings(settings: &crate::config::Settings) -> Result<Self> {
        Self::new(ClientConfig::from_settings(settings))
    }

    fn check_credentials(&self) -> Result<()> {
        if self.config.api_key.is_empty() || self.config.api_key == PLACEHOLDER_API_KEY {
            return Err(ScoutError::ConfigError(
                "FACEIT API key is missing or still the placeholder".to_string(),
            ));
        }
        Ok(())
    }

    /// Issue one authenticated GET and return the raw body. The body is
    /// logged truncated when debug mode is on.
    async fn get_body(
        &self,
        http: &reqwest::Client,
        endpoint: &'static str,
        url: &str,
    ) -> Result<String> {
        if self.config.debug {
            debug!(endpoint, url, "API request");
        }

        let response = http
            .get(url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::UpstreamStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if self.config.debug {
            debug!(endpoint, body = %truncate(&body, LOG_BODY_LIMIT), "API response");
        }
        Ok(body)
    }

    async fn fetch_player(&self, local_id: &str) -> Result<PlayerResponse> {
        self.check_credentials()?;
        if local_id.is_empty() {
            return Err(ScoutError::EmptyLookupKey);
        }

        let url = format!(
            "{}/players?game={}&game_player_id={}",
            self.config.base_url, self.config.game, local_id
        );
        let body = self.get_body(&self.rating_http, "players", &url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn try_fetch_elo(&self, local_id: &str) -> Result<i64> {
        let player = self.fetch_player(local_id).await?;
        player
            .elo_for(&self.config.game)
            .ok_or(ScoutError::MissingField("games.<game>.faceit_elo"))
    }

    async fn try_resolve_account_id(&self, local_id: &str) -> Result<String> {
        let player = self.fetch_player(local_id).await?;
        player.player_id.ok_or(ScoutError::MissingField("player_id"))
    }

    async fn try_fetch_lifetime_stats(&self, account_id: &str) -> Result<LifetimeStats> {
        self.check_credentials()?;
        if account_id.is_empty() {
            return Err(ScoutError::EmptyLookupKey);
        }

        let url = format!(
            "{}/players/{}/stats/{}",
            self.config.base_url, account_id, self.config.game
        );
        let body = self.get_body(&self.stats_http, "player_stats", &url).await?;
        let stats: PlayerStatsResponse = serde_json::from_str(&body)?;
        stats
            .lifetime
            .map(LifetimeStats::from)
            .ok_or(ScoutError::MissingField("lifetime"))
    }

    async fn try_fetch_recent_matches(
        &self,
        account_id: &str,
        limit: u32,
    ) -> Result<Vec<RecentMatch>> {
        self.check_credentials()?;
        if account_id.is_empty() {
            return Err(ScoutError::EmptyLookupKey);
        }

        let url = format!(
            "{}/players/{}/games/{}/stats?limit={}",
            self.config.base_url, account_id, self.config.game, limit
        );
        let body = self
            .get_body(&self.stats_http, "match_history", &url)
            .await?;
        let history: MatchHistoryResponse = serde_json::from_str(&body)?;
        Ok(history
            .items
            .into_iter()
            .filter_map(|item| item.stats)
            .map(RecentMatch::from)
            .collect())
    }
}

#[async_trait]
impl LookupClient for FaceitClient {
    async fn fetch_elo(&self, local_id: &str) -> i64 {
        match self.try_fetch_elo(local_id).await {
            Ok(elo) => elo,
            Err(e) => {
                debug!(local_id, error = %e, "Elo lookup failed");
                UNKNOWN_ELO
            }
        }
    }

    async fn resolve_account_id(&self, local_id: &str) -> Option<String> {
        match self.try_resolve_account_id(local_id).await {
            Ok(id) => Some(id),
            Err(e) => {
                debug!(local_id, error = %e, "account resolution failed");
                None
            }
        }
    }

    async fn fetch_lifetime_stats(&self, account_id: &str) -> Option<LifetimeStats> {
        match self.try_fetch_lifetime_stats(account_id).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                debug!(account_id, error = %e, "lifetime stats lookup failed");
                None
            }
        }
    }

    async fn fetch_recent_matches(&self, account_id: &str, limit: u32) -> Option<Vec<RecentMatch>> {
        match self.try_fetch_recent_matches(account_id, limit).await {
            Ok(matches) => Some(matches),
            Err(e) => {
                debug!(account_id, error = %e, "match history lookup failed");
                None
            }
        }
    }
}
