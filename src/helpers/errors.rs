//! Translation of domain errors into HTTP error responses.

use std::fmt::Display;

use axum::{http::StatusCode, response::Json};
use compute::ComputeError;
use tracing::{error, warn};
use uuid::Uuid;

use crate::schemas::ErrorResponse;

/// Error half of every handler's return type.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// `"Commission record"` becomes `COMMISSION_RECORD_NOT_FOUND`.
fn not_found_code(entity: &str) -> String {
    format!("{}_NOT_FOUND", entity.to_uppercase().replace(' ', "_"))
}

pub fn not_found(entity: &str, id: Uuid) -> ApiError {
    warn!("{} with id {} not found", entity, id);
    api_error(
        StatusCode::NOT_FOUND,
        &not_found_code(entity),
        format!("{} with id {} not found", entity, id),
    )
}

pub fn validation(message: impl Into<String>) -> ApiError {
    let message = message.into();
    warn!("Rejected request: {}", message);
    api_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
}

pub fn database(context: &str, err: impl Display) -> ApiError {
    error!("{}: {}", context, err);
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "DATABASE_ERROR",
        format!("{}: {}", context, err),
    )
}

pub fn from_compute(err: ComputeError) -> ApiError {
    from_compute_ref(&err)
}

/// Same mapping for errors shared out of the cache loader.
pub fn from_compute_ref(err: &ComputeError) -> ApiError {
    match err {
        ComputeError::NotFound { entity, id } => not_found(entity, *id),
        ComputeError::Validation(message) => validation(message.as_str()),
        ComputeError::Storage(db_error) => database("Database operation failed", db_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;
    use std::sync::Arc;

    #[test]
    fn test_compute_errors_map_to_status_codes() {
        let (status, Json(body)) = from_compute(ComputeError::NotFound {
            entity: "Store",
            id: Uuid::new_v4(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "STORE_NOT_FOUND");
        assert!(!body.success);

        let (status, Json(body)) =
            from_compute(ComputeError::Validation("percentage out of range".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "VALIDATION_ERROR");

        let (status, Json(body)) =
            from_compute(ComputeError::Storage(DbErr::Custom("disk full".to_string())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "DATABASE_ERROR");
    }

    #[test]
    fn test_shared_compute_error_keeps_its_status() {
        let shared = Arc::new(ComputeError::Storage(DbErr::Custom("locked".to_string())));
        let (status, Json(body)) = from_compute_ref(&shared);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.contains("locked"));
    }

    #[test]
    fn test_not_found_code_for_multi_word_entity() {
        assert_eq!(not_found_code("Commission record"), "COMMISSION_RECORD_NOT_FOUND");
    }
}
