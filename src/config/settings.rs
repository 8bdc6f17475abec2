use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default credential shipped in generated config files; lookups refuse to
/// run until it is replaced.
pub const PLACEHOLDER_API_KEY: &str = "placeholder-api-key-here";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub command: CommandSettings,
    pub stats: StatsSettings,
    pub debug: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// FACEIT Data API key (https://developer.faceit.com).
    pub key: String,
    pub base_url: String,
    pub game: String,
    /// Timeout for the lightweight player lookup calls.
    pub rating_timeout_secs: u64,
    /// Timeout for the heavier stats calls.
    pub stats_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSettings {
    /// The invoker must hold ANY of these; an empty list means unrestricted.
    pub required_permissions: Vec<String>,
    pub visibility: Visibility,
}

/// Who receives the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the invoker.
    #[serde(rename = "self")]
    SelfOnly,
    /// The invoker plus everyone the host reports as admin.
    Admin,
    /// Everyone on the roster.
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSettings {
    /// How many recent matches to fetch in detail mode.
    pub recent_window: u32,
    /// Compatibility policy: an unparseable numeric sample contributes 0 to
    /// the mean and stays in the denominator. Set false to exclude such
    /// samples entirely.
    pub count_unparseable_as_zero: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                key: PLACEHOLDER_API_KEY.to_string(),
                base_url: "https://open.faceit.com/data/v4".to_string(),
                game: "cs2".to_string(),
                rating_timeout_secs: 5,
                stats_timeout_secs: 10,
            },
            command: CommandSettings {
                required_permissions: vec!["faceit".to_string()],
                visibility: Visibility::SelfOnly,
            },
            stats: StatsSettings {
                recent_window: 30,
                count_unparseable_as_zero: true,
            },
            debug: false,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("FACEIT_SCOUT").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    /// False for an empty or still-placeholder key; every lookup must
    /// short-circuit to "unknown" in that case.
    pub fn api_key_is_valid(&self) -> bool {
        !self.api.key.is_empty() && self.api.key != PLACEHOLDER_API_KEY
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.stats.recent_window == 0 {
            return Err("stats.recent_window must be at least 1".to_string());
        }
        if self.api.rating_timeout_secs == 0 || self.api.stats_timeout_secs == 0 {
            return Err("API timeouts must be non-zero".to_string());
        }
        if self.api.base_url.is_empty() {
            return Err("api.base_url must not be empty".to_string());
        }
        Ok(())
    }
}
