//! Caller rows from the `callers` table.

use callplan_core::caller::Caller as DomainCaller;
use callplan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A caller row from the `callers` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Caller {
    pub id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub daily_target: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Caller {
    /// Scheduling view of the row. Negative quotas read as zero.
    pub fn into_domain(self) -> DomainCaller {
        DomainCaller {
            id: self.id,
            username: self.username,
            display_name: self.display_name,
            daily_target: u32::try_from(self.daily_target).unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for registering a caller.
#[derive(Debug, Deserialize)]
pub struct CreateCaller {
    pub username: String,
    pub display_name: Option<String>,
    /// Defaults to 50 when omitted.
    pub daily_target: Option<i32>,
}
