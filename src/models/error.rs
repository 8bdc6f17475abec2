use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {endpoint}")]
    UpstreamStatus {
        endpoint: &'static str,
        status: u16,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing field in payload: {0}")]
    MissingField(&'static str),

    #[error("Empty lookup key")]
    EmptyLookupKey,
}

pub type Result<T> = std::result::Result<T, ScoutError>;
