//! Handlers for schedule generation and the planner region catalogue.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use callplan_core::error::CoreError;
use callplan_core::request::{parse_start_date, GenerateRequest};
use callplan_core::types::DbId;
use callplan_scheduler::catalogue::region_catalogue;
use callplan_scheduler::PgScheduleStore;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
   Request DTOs
   -------------------------------------------------------------------------- */

/// Body of `POST /schedule/generate`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateScheduleRequest {
    /// `YYYY-MM-DD`.
    pub start_date: Option<String>,
    #[validate(range(min = 1, max = 30))]
    pub days: Option<u32>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub caller_ids: Vec<DbId>,
    #[serde(default)]
    pub append: bool,
    #[validate(length(max = 200))]
    pub campaign_name: Option<String>,
}

impl GenerateScheduleRequest {
    fn into_request(self) -> AppResult<GenerateRequest> {
        let start_date = self
            .start_date
            .as_deref()
            .map(parse_start_date)
            .transpose()?;

        Ok(GenerateRequest {
            start_date,
            days: self.days,
            regions: self.regions,
            cities: self.cities,
            caller_ids: self.caller_ids,
            append: self.append,
            campaign_name: self.campaign_name,
        })
    }
}

/* --------------------------------------------------------------------------
   Handlers
   -------------------------------------------------------------------------- */

/// POST /schedule/generate
///
/// Run one generation and return its summary. Responds 201 because every
/// successful run records a new campaign.
pub async fn generate_schedule(
    State(state): State<AppState>,
    Json(input): Json<GenerateScheduleRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let request = input.into_request()?;

    let store = PgScheduleStore::new(state.pool.clone());
    let summary = callplan_scheduler::generate(&store, &request).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}

/// GET /schedule/regions
pub async fn list_regions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let options = region_catalogue(&state.pool).await?;
    Ok(Json(DataResponse { data: options }))
}
