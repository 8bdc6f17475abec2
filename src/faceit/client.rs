use async_trait::async_trait;

use crate::models::{LifetimeStats, RecentMatch};

/// Remote lookup seam the aggregator depends on. Every operation fails
/// closed: implementations convert transport, decode and timeout failures
/// into the `-1` sentinel or `None` and never return an error.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Resolve a host-side id (Steam id) to an Elo rating. `-1` = unknown.
    async fn fetch_elo(&self, local_id: &str) -> i64;

    /// Resolve a host-side id to the service's own account id. `None` when
    /// no account is linked or the lookup failed.
    async fn resolve_account_id(&self, local_id: &str) -> Option<String>;

    /// Lifetime aggregate stats for a resolved account.
    async fn fetch_lifetime_stats(&self, account_id: &str) -> Option<LifetimeStats>;

    /// Up to `limit` most recent matches for a resolved account.
    async fn fetch_recent_matches(&self, account_id: &str, limit: u32) -> Option<Vec<RecentMatch>>;
}

/// Connection configuration shared by the lookup clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub game: String,
    pub rating_timeout_secs: u64,
    pub stats_timeout_secs: u64,
    pub debug: bool,
}

impl ClientConfig {
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self {
            api_key: settings.api.key.clone(),
            base_url: settings.api.base_url.clone(),
            game: settings.api.game.clone(),
            rating_timeout_secs: settings.api.rating_timeout_secs,
            stats_timeout_secs: settings.api.stats_timeout_secs,
            debug: settings.debug,
        }
    }
}
