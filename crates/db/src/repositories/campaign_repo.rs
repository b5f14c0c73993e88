//! Repository for the `campaigns` table.

use callplan_core::campaign::{CampaignStatus, NewCampaign};
use callplan_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::campaign::Campaign;

const COLUMNS: &str = "id, name, description, start_date, end_date, target_regions, \
    target_cities, target_callers, status, created_at, completed_at, cancelled_at";

pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert an active campaign on the given connection.
    pub async fn create(
        conn: &mut PgConnection,
        input: &NewCampaign,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns
                (name, description, start_date, end_date,
                 target_regions, target_cities, target_callers, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.range.start())
            .bind(input.range.end())
            .bind(input.target_regions.as_slice())
            .bind(input.target_cities.as_slice())
            .bind(input.target_callers.as_slice())
            .bind(CampaignStatus::Active.as_str())
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
