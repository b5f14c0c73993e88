use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure modes of a single schedule generation run.
///
/// Every variant is recoverable by whoever invoked the run. Nothing here is
/// retried internally.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Malformed or missing input. Fix and resubmit.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A virtual caller region names callers that are not part of the
    /// explicit caller selection.
    #[error("Virtual regions reference callers outside the selection: {}", .callers.join(", "))]
    RegionCallerMismatch { callers: Vec<String> },

    /// No caller with a positive daily target among the selection.
    #[error("No callers with daily targets configured")]
    NoCallersConfigured,

    /// The filters matched no unresolved targets.
    #[error("No available targets in the selected area (requested capacity {requested_capacity})")]
    NoAvailableTargets { requested_capacity: u64 },

    /// The store could not commit the run. Nothing was written.
    #[error("Storage failure: {0}")]
    StorageFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<CoreError> for GenerateError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => GenerateError::InvalidRequest(msg),
            other => GenerateError::StorageFailure(Box::new(other)),
        }
    }
}
