//! Atomic commit of one generation run.

use callplan_core::campaign::NewCampaign;
use callplan_core::clearing::ClearScope;
use callplan_core::distribution::PlannedAssignment;
use sqlx::PgPool;

use crate::models::campaign::Campaign;
use crate::repositories::{AssignmentRepo, CampaignRepo};

/// What a committed run wrote.
#[derive(Debug, Clone)]
pub struct CommittedSchedule {
    pub campaign: Campaign,
    pub cleared: u64,
    pub inserted: u64,
}

pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Clear the scope (when given), create the campaign and insert its
    /// assignments, all in one transaction.
    ///
    /// On any error the transaction is dropped without committing and the
    /// store is left exactly as before.
    pub async fn commit(
        pool: &PgPool,
        clear: Option<&ClearScope>,
        campaign: &NewCampaign,
        assignments: &[PlannedAssignment],
    ) -> Result<CommittedSchedule, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let cleared = match clear {
            Some(scope) => AssignmentRepo::delete_in_scope(&mut *tx, scope).await?,
            None => 0,
        };

        let campaign = CampaignRepo::create(&mut *tx, campaign).await?;
        let inserted = AssignmentRepo::insert_batch(&mut *tx, campaign.id, assignments).await?;

        tx.commit().await?;

        tracing::debug!(
            campaign_id = campaign.id,
            cleared,
            inserted,
            "Schedule committed",
        );

        Ok(CommittedSchedule {
            campaign,
            cleared,
            inserted,
        })
    }
}
