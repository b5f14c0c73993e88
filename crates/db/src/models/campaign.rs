//! Campaign rows from the `campaigns` table.
//!
//! Campaigns are created only by schedule generation, inside the same
//! transaction as their assignments, so there is no create DTO here: the
//! insert takes `callplan_core::campaign::NewCampaign` directly.

use callplan_core::campaign::CampaignStatus;
use callplan_core::error::CoreError;
use callplan_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A campaign row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub target_regions: Vec<String>,
    pub target_cities: Vec<String>,
    pub target_callers: Vec<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
}

impl Campaign {
    pub fn status(&self) -> Result<CampaignStatus, CoreError> {
        self.status.parse()
    }
}
