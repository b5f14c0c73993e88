//! Persistence seam of a generation run.

use async_trait::async_trait;
use callplan_core::caller::Caller;
use callplan_core::campaign::NewCampaign;
use callplan_core::clearing::ClearScope;
use callplan_core::distribution::PlannedAssignment;
use callplan_core::region::EligibilityPredicate;
use callplan_core::target::CallTarget;
use callplan_core::types::DbId;

use crate::error::StoreError;

/// Everything one run writes, committed as a unit.
#[derive(Debug, Clone)]
pub struct ScheduleBatch {
    /// Existing assignments to delete first. `None` in append mode.
    pub clear: Option<ClearScope>,
    pub campaign: NewCampaign,
    pub assignments: Vec<PlannedAssignment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    pub campaign_id: DbId,
    pub cleared: u64,
    pub inserted: u64,
}

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Active callers that virtual region names may refer to.
    async fn caller_directory(&self) -> Result<Vec<Caller>, StoreError>;

    /// Active callers with a positive quota, ordered by id. An empty `ids`
    /// slice means all of them.
    async fn schedulable_callers(&self, ids: &[DbId]) -> Result<Vec<Caller>, StoreError>;

    /// Unresolved targets matching the predicate, with history facts filled in.
    async fn eligible_targets(
        &self,
        predicate: &EligibilityPredicate,
    ) -> Result<Vec<CallTarget>, StoreError>;

    /// Apply the batch atomically. On error nothing is written.
    async fn commit_schedule(&self, batch: &ScheduleBatch) -> Result<CommitOutcome, StoreError>;
}
