use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use callplan_core::error::{CoreError, GenerateError};
use callplan_scheduler::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain errors and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A schedule generation run was refused or failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(db) => AppError::Database(db),
            StoreError::Unavailable(msg) => AppError::InternalError(msg),
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Generation run outcomes ---
            AppError::Generate(run_err) => match run_err {
                GenerateError::InvalidRequest(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                GenerateError::RegionCallerMismatch { .. } => (
                    StatusCode::CONFLICT,
                    "REGION_CALLER_MISMATCH",
                    run_err.to_string(),
                ),
                GenerateError::NoCallersConfigured => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "NO_CALLERS_CONFIGURED",
                    run_err.to_string(),
                ),
                GenerateError::NoAvailableTargets { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "NO_AVAILABLE_TARGETS",
                    run_err.to_string(),
                ),
                GenerateError::StorageFailure(err) => {
                    tracing::error!(error = %err, "Schedule storage failure");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        match &self {
            AppError::Generate(GenerateError::RegionCallerMismatch { callers }) => {
                body["callers"] = json!(callers);
            }
            AppError::Generate(GenerateError::NoAvailableTargets { requested_capacity }) => {
                body["requested_capacity"] = json!(requested_capacity);
            }
            _ => {}
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
