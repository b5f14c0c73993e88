pub mod health;
pub mod schedule;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /schedule/generate                               generate a schedule (POST)
/// /schedule/regions                                planner region catalogue
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/schedule", schedule::router())
}
