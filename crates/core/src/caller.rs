//! Callers and their daily quotas.

use serde::Serialize;

use crate::types::DbId;

/// An agent who makes calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub id: DbId,
    /// Account name, unique across callers.
    pub username: String,
    pub display_name: Option<String>,
    /// Assignments per day. Zero takes the caller out of scheduling.
    pub daily_target: u32,
}

impl Caller {
    pub fn new(id: DbId, username: impl Into<String>, daily_target: u32) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: None,
            daily_target,
        }
    }

    /// Human-facing name: display name when set, account name otherwise.
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }

    pub fn is_schedulable(&self) -> bool {
        self.daily_target > 0
    }
}

/// Callers taking part in a run, in the order they receive slots.
///
/// Callers with a zero quota are dropped. When `explicit` is non-empty only
/// those callers participate, ordered as they were selected; otherwise the
/// incoming order is kept.
pub fn select_participants(callers: Vec<Caller>, explicit: &[DbId]) -> Vec<Caller> {
    let mut participants: Vec<Caller> = callers
        .into_iter()
        .filter(Caller::is_schedulable)
        .filter(|c| explicit.is_empty() || explicit.contains(&c.id))
        .collect();

    if !explicit.is_empty() {
        participants.sort_by_key(|c| explicit.iter().position(|id| *id == c.id));
    }
    participants
}

/// Theoretical number of slots across the run: `sum(daily_target) * days`.
pub fn requested_capacity(callers: &[Caller], days: u32) -> u64 {
    let per_day: u64 = callers.iter().map(|c| u64::from(c.daily_target)).sum();
    per_day * u64::from(days)
}
