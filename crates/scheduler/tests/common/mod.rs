//! In-memory [`ScheduleStore`] for exercising generation runs without a
//! database.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use callplan_core::caller::Caller;
use callplan_core::campaign::NewCampaign;
use callplan_core::region::EligibilityPredicate;
use callplan_core::target::CallTarget;
use callplan_core::types::DbId;
use callplan_scheduler::{CommitOutcome, ScheduleBatch, ScheduleStore, StoreError};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAssignment {
    pub date: NaiveDate,
    pub target_id: DbId,
    pub caller_id: DbId,
    pub campaign_id: DbId,
}

#[derive(Debug, Default)]
pub struct State {
    pub callers: Vec<Caller>,
    pub inactive: Vec<DbId>,
    pub targets: Vec<CallTarget>,
    pub campaigns: Vec<(DbId, NewCampaign)>,
    pub assignments: Vec<StoredAssignment>,
    pub fail_commit: bool,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new(callers: Vec<Caller>, targets: Vec<CallTarget>) -> Self {
        Self {
            state: Mutex::new(State {
                callers,
                targets,
                ..Default::default()
            }),
        }
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn assignments(&self) -> Vec<StoredAssignment> {
        self.with_state(|s| s.assignments.clone())
    }

    pub fn campaign_count(&self) -> usize {
        self.with_state(|s| s.campaigns.len())
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn caller_directory(&self) -> Result<Vec<Caller>, StoreError> {
        Ok(self.with_state(|s| {
            s.callers
                .iter()
                .filter(|c| !s.inactive.contains(&c.id))
                .cloned()
                .collect()
        }))
    }

    async fn schedulable_callers(&self, ids: &[DbId]) -> Result<Vec<Caller>, StoreError> {
        let mut callers: Vec<Caller> = self
            .caller_directory()
            .await?
            .into_iter()
            .filter(|c| c.daily_target > 0 && (ids.is_empty() || ids.contains(&c.id)))
            .collect();
        callers.sort_by_key(|c| c.id);
        Ok(callers)
    }

    async fn eligible_targets(
        &self,
        predicate: &EligibilityPredicate,
    ) -> Result<Vec<CallTarget>, StoreError> {
        let mut targets: Vec<CallTarget> = self.with_state(|s| {
            s.targets
                .iter()
                .filter(|t| predicate.matches(t))
                .cloned()
                .collect()
        });
        targets.sort_by_key(|t| t.id);
        Ok(targets)
    }

    async fn commit_schedule(&self, batch: &ScheduleBatch) -> Result<CommitOutcome, StoreError> {
        self.with_state(|s| {
            if s.fail_commit {
                return Err(StoreError::Unavailable("commit refused".to_string()));
            }

            let before = s.assignments.len();
            if let Some(scope) = &batch.clear {
                let targets = &s.targets;
                s.assignments.retain(|a| {
                    let target = targets.iter().find(|t| t.id == a.target_id);
                    !target.is_some_and(|t| scope.covers(a.date, a.caller_id, t))
                });
            }
            let cleared = (before - s.assignments.len()) as u64;

            let campaign_id = s.campaigns.len() as DbId + 1;
            s.campaigns.push((campaign_id, batch.campaign.clone()));
            s.assignments
                .extend(batch.assignments.iter().map(|a| StoredAssignment {
                    date: a.date,
                    target_id: a.target_id,
                    caller_id: a.caller_id,
                    campaign_id,
                }));

            Ok(CommitOutcome {
                campaign_id,
                cleared,
                inserted: batch.assignments.len() as u64,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

pub fn caller(id: DbId, username: &str, daily_target: u32) -> Caller {
    Caller::new(id, username, daily_target)
}

pub fn target(id: DbId, region: &str) -> CallTarget {
    CallTarget::new(id, region)
}

pub fn reserved(id: DbId, region: &str, caller_id: DbId) -> CallTarget {
    CallTarget {
        preferred_caller_id: Some(caller_id),
        ..CallTarget::new(id, region)
    }
}
