//! Campaign naming and lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a caller-supplied campaign name.
pub const MAX_CAMPAIGN_NAME_LEN: usize = 200;

/// Campaign lifecycle status. Generation always creates `Active` campaigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Completed,
    Cancelled,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Only active campaigns move, and only to a terminal status.
    pub fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Active, Self::Completed) | (Self::Active, Self::Cancelled)
        )
    }

    pub fn validate_transition(self, to: Self) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Invalid campaign transition: {self} -> {to}"
            )))
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown campaign status: {other}"
            ))),
        }
    }
}

/// Name used when the request does not supply one.
pub fn default_campaign_name(range: &DateRange) -> String {
    if range.days() == 1 {
        format!("Campaign {}", range.start())
    } else {
        format!("Campaign {} - {}", range.start(), range.end())
    }
}

/// Pick the campaign's display name: the trimmed requested name, or the
/// generated default when none (or only whitespace) was given.
pub fn campaign_display_name(requested: Option<&str>, range: &DateRange) -> String {
    match requested.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default_campaign_name(range),
    }
}

/// Campaign row to create for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCampaign {
    pub name: String,
    pub description: Option<String>,
    pub range: DateRange,
    pub target_regions: Vec<String>,
    pub target_cities: Vec<String>,
    pub target_callers: Vec<DbId>,
}
