pub mod aggregate;
pub mod command;
pub mod config;
pub mod faceit;
pub mod format;
pub mod models;

pub use aggregate::Aggregator;
pub use command::{CliHost, CommandOrchestrator, Host};
pub use config::{Settings, Visibility};
pub use faceit::{FaceitClient, LookupClient};
pub use models::{
    ColorTier, DetailResult, NamedGroup, RatingResult, Result, ScoutError, Subject, UNKNOWN_ELO,
};
