//! [`ScheduleStore`] over the Postgres repositories.

use async_trait::async_trait;
use callplan_core::caller::Caller;
use callplan_core::region::EligibilityPredicate;
use callplan_core::target::CallTarget;
use callplan_core::types::DbId;
use callplan_db::repositories::{CallTargetRepo, CallerRepo, ScheduleRepo};
use callplan_db::DbPool;

use crate::error::StoreError;
use crate::store::{CommitOutcome, ScheduleBatch, ScheduleStore};

#[derive(Debug, Clone)]
pub struct PgScheduleStore {
    pool: DbPool,
}

impl PgScheduleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn caller_directory(&self) -> Result<Vec<Caller>, StoreError> {
        let rows = CallerRepo::list_directory(&self.pool).await?;
        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    async fn schedulable_callers(&self, ids: &[DbId]) -> Result<Vec<Caller>, StoreError> {
        let rows = CallerRepo::list_schedulable(&self.pool, ids).await?;
        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    async fn eligible_targets(
        &self,
        predicate: &EligibilityPredicate,
    ) -> Result<Vec<CallTarget>, StoreError> {
        let rows = CallTargetRepo::list_eligible(&self.pool, predicate).await?;
        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    async fn commit_schedule(&self, batch: &ScheduleBatch) -> Result<CommitOutcome, StoreError> {
        let committed = ScheduleRepo::commit(
            &self.pool,
            batch.clear.as_ref(),
            &batch.campaign,
            &batch.assignments,
        )
        .await?;
        Ok(CommitOutcome {
            campaign_id: committed.campaign.id,
            cleared: committed.cleared,
            inserted: committed.inserted,
        })
    }
}
