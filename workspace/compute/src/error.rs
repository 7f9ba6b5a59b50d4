use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// A referenced store, route, machine or snapshot does not exist
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Input rejected before touching the database, e.g. a commission
    /// percentage outside [0, 100]
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error from the database operations (constraint violation, connectivity)
    #[error("Storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

impl ComputeError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        let err = ComputeError::NotFound { entity, id };
        warn!(?err, "Referenced entity is missing");
        err
    }

    pub fn validation(message: impl Into<String>) -> Self {
        let err = ComputeError::Validation(message.into());
        warn!(?err, "Validation failed");
        err
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
