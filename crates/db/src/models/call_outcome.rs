//! Outcome codes recorded in `call_outcomes`.
//!
//! Only read here: the history feeds the recency, callback and resolution
//! facts attached to each eligible target.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallOutcome {
    Interested,
    NotInterested,
    NoAnswer,
    Callback,
    OrderTaken,
}

impl CallOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interested => "INTERESTED",
            Self::NotInterested => "NOT_INTERESTED",
            Self::NoAnswer => "NO_ANSWER",
            Self::Callback => "CALLBACK",
            Self::OrderTaken => "ORDER_TAKEN",
        }
    }

    /// A target with any resolving outcome in its history is never
    /// scheduled again.
    pub fn resolves_target(self) -> bool {
        matches!(self, Self::Interested | Self::NotInterested)
    }
}
