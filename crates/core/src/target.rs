//! Call targets as seen by the scheduling engine.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// A contactable entity, with the fields derived from its call history.
///
/// The engine never mutates targets; they are rebuilt from the store on
/// every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallTarget {
    pub id: DbId,
    pub region: String,
    pub cities: Vec<String>,
    pub preferred_caller_id: Option<DbId>,
    pub wants_special_category: bool,
    /// Time of the most recent logged call, if any.
    pub last_contacted_at: Option<Timestamp>,
    /// The most recent logged outcome asked for a callback.
    pub has_pending_callback: bool,
    /// Some logged outcome marked the target interested or rejected.
    pub is_resolved: bool,
}

impl CallTarget {
    /// A target with no history, no preference, and no cities.
    pub fn new(id: DbId, region: impl Into<String>) -> Self {
        Self {
            id,
            region: region.into(),
            cities: Vec::new(),
            preferred_caller_id: None,
            wants_special_category: false,
            last_contacted_at: None,
            has_pending_callback: false,
            is_resolved: false,
        }
    }

    pub fn was_never_contacted(&self) -> bool {
        self.last_contacted_at.is_none()
    }

    /// Whether any of the target's cities contains any of `substrings`.
    pub fn serves_any_city(&self, substrings: &[String]) -> bool {
        self.cities
            .iter()
            .any(|city| substrings.iter().any(|s| city.contains(s.as_str())))
    }
}
