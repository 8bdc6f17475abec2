pub mod error;
pub mod stats;
pub mod subject;

pub use error::{Result, ScoutError};
pub use stats::{LifetimeStats, RecentMatch, RecentSummary};
pub use subject::{ColorTier, DetailResult, NamedGroup, RatingResult, Subject, UNKNOWN_ELO};
