//! Region catalogue for the schedule planner.

use callplan_core::planner::{build_region_catalogue, RegionOption};
use callplan_db::repositories::CallTargetRepo;
use callplan_db::DbPool;

use crate::error::StoreError;

/// Selectable region names with their current unresolved target counts.
pub async fn region_catalogue(pool: &DbPool) -> Result<Vec<RegionOption>, StoreError> {
    let callers: Vec<_> = CallTargetRepo::caller_availability(pool)
        .await?
        .into_iter()
        .map(|row| row.into_domain())
        .collect();
    let special = CallTargetRepo::special_category_availability(pool).await?;
    let regions: Vec<_> = CallTargetRepo::region_availability(pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let options = build_region_catalogue(&callers, special, &regions);
    tracing::debug!(options = options.len(), "Region catalogue built");
    Ok(options)
}
