//! Assignment rows: one target handed to one caller on one date.

use callplan_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `assignments` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Assignment {
    pub id: DbId,
    pub date: NaiveDate,
    pub target_id: DbId,
    pub caller_id: DbId,
    pub campaign_id: Option<DbId>,
    pub completed: bool,
    pub created_at: Timestamp,
}
