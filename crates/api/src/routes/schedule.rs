use axum::routing::{get, post};
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// Routes mounted at `/api/v1/schedule`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(schedule::generate_schedule))
        .route("/regions", get(schedule::list_regions))
}
