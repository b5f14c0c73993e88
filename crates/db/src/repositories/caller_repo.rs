//! Repository for the `callers` table.

use callplan_core::types::DbId;
use sqlx::PgPool;

use crate::models::caller::{Caller, CreateCaller};

const COLUMNS: &str =
    "id, username, display_name, daily_target, is_active, created_at, updated_at";

/// Default quota applied when a new caller does not specify one.
const DEFAULT_DAILY_TARGET: i32 = 50;

pub struct CallerRepo;

impl CallerRepo {
    pub async fn create(pool: &PgPool, input: &CreateCaller) -> Result<Caller, sqlx::Error> {
        let query = format!(
            "INSERT INTO callers (username, display_name, daily_target)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Caller>(&query)
            .bind(&input.username)
            .bind(&input.display_name)
            .bind(input.daily_target.unwrap_or(DEFAULT_DAILY_TARGET))
            .fetch_one(pool)
            .await
    }

    /// Every active caller, including those with a zero quota.
    ///
    /// This is the directory virtual region names are resolved against.
    pub async fn list_directory(pool: &PgPool) -> Result<Vec<Caller>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM callers WHERE is_active ORDER BY id");
        sqlx::query_as::<_, Caller>(&query).fetch_all(pool).await
    }

    /// Active callers with a positive daily target, ordered by id.
    ///
    /// An empty `ids` slice means no id filter.
    pub async fn list_schedulable(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Caller>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM callers
             WHERE is_active AND daily_target > 0
               AND (cardinality($1::bigint[]) = 0 OR id = ANY($1::bigint[]))
             ORDER BY id"
        );
        sqlx::query_as::<_, Caller>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
