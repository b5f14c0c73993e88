//! Repository for `call_targets`, joined with the outcome history.

use callplan_core::region::EligibilityPredicate;
use sqlx::PgPool;

use crate::filters::{bind_scope, scope_sql, ScopeBinds};
use crate::models::call_target::{CallTarget, CreateCallTarget, EligibleTarget};
use crate::models::planner::{CallerAvailabilityRow, RegionAvailabilityRow};

const COLUMNS: &str = "id, name, region, cities, preferred_caller_id, \
    wants_special_category, created_at, updated_at";

/// Outcome-derived facts for the target aliased `t`, exposed as `h`.
const HISTORY_JOIN: &str = "LEFT JOIN LATERAL (
        SELECT MAX(o.called_at) AS last_contacted_at,
               (ARRAY_AGG(o.outcome ORDER BY o.called_at DESC, o.id DESC))[1] AS last_outcome,
               BOOL_OR(o.outcome IN ('INTERESTED', 'NOT_INTERESTED')) AS is_resolved
        FROM call_outcomes o
        WHERE o.target_id = t.id
    ) h ON true";

/// True for targets with no resolving outcome.
const UNRESOLVED: &str = "NOT EXISTS (
        SELECT 1 FROM call_outcomes o
        WHERE o.target_id = t.id AND o.outcome IN ('INTERESTED', 'NOT_INTERESTED'))";

pub struct CallTargetRepo;

impl CallTargetRepo {
    pub async fn create(pool: &PgPool, input: &CreateCallTarget) -> Result<CallTarget, sqlx::Error> {
        let query = format!(
            "INSERT INTO call_targets
                (name, region, cities, preferred_caller_id, wants_special_category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CallTarget>(&query)
            .bind(&input.name)
            .bind(&input.region)
            .bind(input.cities.as_slice())
            .bind(input.preferred_caller_id)
            .bind(input.wants_special_category)
            .fetch_one(pool)
            .await
    }

    /// Unresolved targets inside the predicate's scope, with derived
    /// history facts, ordered by id.
    pub async fn list_eligible(
        pool: &PgPool,
        predicate: &EligibilityPredicate,
    ) -> Result<Vec<EligibleTarget>, sqlx::Error> {
        let binds = ScopeBinds::from(predicate);
        let query = format!(
            "SELECT t.id, t.region, t.cities, t.preferred_caller_id, t.wants_special_category,
                    h.last_contacted_at,
                    COALESCE(h.last_outcome = 'CALLBACK', false) AS has_pending_callback,
                    COALESCE(h.is_resolved, false) AS is_resolved
             FROM call_targets t
             {HISTORY_JOIN}
             WHERE NOT COALESCE(h.is_resolved, false)
               AND {scope}
             ORDER BY t.id",
            scope = scope_sql("t", 1),
        );
        bind_scope!(sqlx::query_as::<_, EligibleTarget>(&query), binds)
            .fetch_all(pool)
            .await
    }

    /// Unresolved targets per geographic region, with the reserved share.
    pub async fn region_availability(
        pool: &PgPool,
    ) -> Result<Vec<RegionAvailabilityRow>, sqlx::Error> {
        let query = format!(
            "SELECT t.region,
                    COUNT(*) AS available,
                    COUNT(t.preferred_caller_id) AS reserved
             FROM call_targets t
             WHERE {UNRESOLVED}
             GROUP BY t.region
             ORDER BY t.region"
        );
        sqlx::query_as::<_, RegionAvailabilityRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Unresolved targets reserved for each schedulable caller. Callers
    /// without any are omitted.
    pub async fn caller_availability(
        pool: &PgPool,
    ) -> Result<Vec<CallerAvailabilityRow>, sqlx::Error> {
        let query = format!(
            "SELECT c.id AS caller_id, c.username, c.display_name, COUNT(t.id) AS available
             FROM callers c
             JOIN call_targets t ON t.preferred_caller_id = c.id
             WHERE c.is_active AND c.daily_target > 0 AND {UNRESOLVED}
             GROUP BY c.id, c.username, c.display_name
             ORDER BY c.id"
        );
        sqlx::query_as::<_, CallerAvailabilityRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Unresolved, unreserved targets in the special category.
    pub async fn special_category_availability(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM call_targets t
             WHERE t.wants_special_category
               AND t.preferred_caller_id IS NULL
               AND {UNRESOLVED}"
        );
        let row: (i64,) = sqlx::query_as(&query).fetch_one(pool).await?;
        Ok(row.0)
    }
}
