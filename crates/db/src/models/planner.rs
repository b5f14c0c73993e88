//! Aggregate rows behind the planner's region catalogue.

use callplan_core::caller::Caller;
use callplan_core::planner::{CallerAvailability, GeographicAvailability};
use callplan_core::types::DbId;
use sqlx::FromRow;

/// Unresolved targets reserved for one schedulable caller.
#[derive(Debug, Clone, FromRow)]
pub struct CallerAvailabilityRow {
    pub caller_id: DbId,
    pub username: String,
    pub display_name: Option<String>,
    pub available: i64,
}

impl CallerAvailabilityRow {
    pub fn into_domain(self) -> CallerAvailability {
        let caller = Caller {
            id: self.caller_id,
            username: self.username,
            display_name: self.display_name,
            daily_target: 0,
        };
        CallerAvailability {
            caller_label: caller.label().to_string(),
            available: self.available,
        }
    }
}

/// Unresolved targets per geographic region.
#[derive(Debug, Clone, FromRow)]
pub struct RegionAvailabilityRow {
    pub region: String,
    pub available: i64,
    pub reserved: i64,
}

impl From<RegionAvailabilityRow> for GeographicAvailability {
    fn from(row: RegionAvailabilityRow) -> Self {
        Self {
            region: row.region,
            available: row.available,
            reserved: row.reserved,
        }
    }
}
