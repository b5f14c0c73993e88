//! Repository for the `assignments` table.

use callplan_core::clearing::ClearScope;
use callplan_core::date_range::DateRange;
use callplan_core::distribution::PlannedAssignment;
use callplan_core::types::DbId;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use crate::filters::{bind_scope, scope_sql, ScopeBinds};
use crate::models::assignment::Assignment;

const COLUMNS: &str = "id, date, target_id, caller_id, campaign_id, completed, created_at";

pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Delete every assignment inside the scope. Returns the number removed.
    ///
    /// Resolution of the target is not considered: a resolved target's
    /// future assignments inside the scope are removed too.
    pub async fn delete_in_scope(
        conn: &mut PgConnection,
        scope: &ClearScope,
    ) -> Result<u64, sqlx::Error> {
        let binds = scope
            .target_scope
            .as_ref()
            .map(ScopeBinds::from)
            .unwrap_or_default();
        let query = format!(
            "DELETE FROM assignments a
             WHERE a.date BETWEEN $1 AND $2
               AND (cardinality($3::bigint[]) = 0 OR a.caller_id = ANY($3::bigint[]))
               AND (NOT $4::bool OR EXISTS (
                    SELECT 1 FROM call_targets t
                    WHERE t.id = a.target_id AND {scope}))",
            scope = scope_sql("t", 5),
        );
        let result = bind_scope!(
            sqlx::query(&query)
                .bind(scope.range.start())
                .bind(scope.range.end())
                .bind(scope.caller_ids.as_slice())
                .bind(scope.target_scope.is_some()),
            binds
        )
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Insert planned assignments under one campaign. Returns the number inserted.
    pub async fn insert_batch(
        conn: &mut PgConnection,
        campaign_id: DbId,
        assignments: &[PlannedAssignment],
    ) -> Result<u64, sqlx::Error> {
        if assignments.is_empty() {
            return Ok(0);
        }

        let dates: Vec<NaiveDate> = assignments.iter().map(|a| a.date).collect();
        let target_ids: Vec<DbId> = assignments.iter().map(|a| a.target_id).collect();
        let caller_ids: Vec<DbId> = assignments.iter().map(|a| a.caller_id).collect();

        let result = sqlx::query(
            "INSERT INTO assignments (date, target_id, caller_id, campaign_id)
             SELECT u.date, u.target_id, u.caller_id, $4
             FROM UNNEST($1::date[], $2::bigint[], $3::bigint[]) AS u(date, target_id, caller_id)",
        )
        .bind(dates.as_slice())
        .bind(target_ids.as_slice())
        .bind(caller_ids.as_slice())
        .bind(campaign_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Assignments dated inside the range, by date then caller then id.
    pub async fn list_in_range(
        pool: &PgPool,
        range: &DateRange,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE date BETWEEN $1 AND $2
             ORDER BY date, caller_id, id"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(range.start())
            .bind(range.end())
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE campaign_id = $1
             ORDER BY date, caller_id, id"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }
}
