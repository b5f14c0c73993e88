//! Call target rows and the eligible-target projection used by generation.

use callplan_core::target::CallTarget as DomainTarget;
use callplan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `call_targets` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CallTarget {
    pub id: DbId,
    pub name: String,
    pub region: String,
    pub cities: Vec<String>,
    pub preferred_caller_id: Option<DbId>,
    pub wants_special_category: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCallTarget {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub cities: Vec<String>,
    pub preferred_caller_id: Option<DbId>,
    #[serde(default)]
    pub wants_special_category: bool,
}

// ---------------------------------------------------------------------------
// Eligible projection
// ---------------------------------------------------------------------------

/// A target joined with the facts derived from its outcome history.
#[derive(Debug, Clone, FromRow)]
pub struct EligibleTarget {
    pub id: DbId,
    pub region: String,
    pub cities: Vec<String>,
    pub preferred_caller_id: Option<DbId>,
    pub wants_special_category: bool,
    pub last_contacted_at: Option<Timestamp>,
    pub has_pending_callback: bool,
    pub is_resolved: bool,
}

impl EligibleTarget {
    pub fn into_domain(self) -> DomainTarget {
        DomainTarget {
            id: self.id,
            region: self.region,
            cities: self.cities,
            preferred_caller_id: self.preferred_caller_id,
            wants_special_category: self.wants_special_category,
            last_contacted_at: self.last_contacted_at,
            has_pending_callback: self.has_pending_callback,
            is_resolved: self.is_resolved,
        }
    }
}
