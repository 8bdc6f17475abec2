use serde::{Deserialize, Serialize};

use super::stats::{LifetimeStats, RecentSummary};

/// Sentinel returned by rating lookups when the Elo could not be resolved.
pub const UNKNOWN_ELO: i64 = -1;

/// One roster entrant at the moment a lookup begins. A snapshot: the
/// underlying player may disconnect while lookups are in flight, so later
/// stages must not assume it still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub display_name: String,
    /// The host-side identifier (Steam id) used as the FACEIT lookup key.
    pub local_id: String,
}

impl Subject {
    pub fn new(display_name: impl Into<String>, local_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            local_id: local_id.into(),
        }
    }
}

/// An ordered, display-significant group of subjects (e.g. one team).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedGroup {
    pub name: String,
    pub subjects: Vec<Subject>,
}

/// Display tier of a rating, used purely for color emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTier {
    Unranked,
    Low,
    Mid,
    High,
}

impl ColorTier {
    /// Pure classifier. 2750 is inclusive in Mid.
    pub fn from_elo(elo: i64) -> Self {
        if elo == UNKNOWN_ELO {
            return ColorTier::Unranked;
        }
        if elo < 2000 {
            ColorTier::Low
        } else if elo <= 2750 {
            ColorTier::Mid
        } else {
            ColorTier::High
        }
    }
}

/// One display-ready rating line, derived from a Subject and a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingResult {
    pub display_name: String,
    pub rating_text: String,
    pub tier: ColorTier,
}

impl RatingResult {
    pub fn from_elo(display_name: impl Into<String>, elo: i64) -> Self {
        let rating_text = if elo == UNKNOWN_ELO {
            "N/A".to_string()
        } else {
            elo.to_string()
        };
        Self {
            display_name: display_name.into(),
            rating_text,
            tier: ColorTier::from_elo(elo),
        }
    }

    pub fn unknown(display_name: impl Into<String>) -> Self {
        Self::from_elo(display_name, UNKNOWN_ELO)
    }
}

/// Single-subject detail lookup outcome. Absent stats blocks are normal,
/// reportable outcomes, not errors.
#[derive(Debug, Clone)]
pub struct DetailResult {
    pub rating: RatingResult,
    pub lifetime: Option<LifetimeStats>,
    pub recent: Option<RecentSummary>,
}
