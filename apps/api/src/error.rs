//! Error types for the API layer.
//!
//! Every failure a handler can produce funnels into [`ApiError`], which maps
//! to an HTTP status plus a JSON body. Reports never return partial results:
//! if one sub-aggregate fails, the whole request fails with the mapped
//! status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use restock_core::PeriodError;
use restock_db::DbError;

/// API errors, mapped to HTTP statuses in `IntoResponse`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed period selector or custom bounds → 400.
    #[error("{0}")]
    InvalidPeriod(#[from] PeriodError),

    /// Missing or invalid bearer token → 401.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Referenced entity absent → 404.
    #[error("{0} not found")]
    NotFound(String),

    /// Payload failed validation → 422.
    #[error("{0}")]
    Validation(String),

    /// Storage failure → 500. Not retried here; retry policy, if any,
    /// belongs to the storage client.
    #[error("Internal error")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            // Internal details stay in the logs, not the response body.
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Classify database errors: missing rows are the client's 404, constraint
/// violations are the client's 422, everything else is on us.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::NotFound(format!("{entity} {id}")),
            DbError::UniqueViolation { field, .. } => {
                ApiError::Validation(format!("Duplicate value for {field}"))
            }
            DbError::ForeignKeyViolation { .. } => {
                ApiError::Validation("Referenced entity does not exist".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!(detail = %detail, "Request failed with internal error");
        }

        let status = self.status();
        let body = Json(json!({
            "success": false,
            "message": self.message(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_error_maps_to_400() {
        let err = ApiError::from(PeriodError::UnknownMode("weekly".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_db_not_found_maps_to_404() {
        let err = ApiError::from(DbError::not_found("Product", "p1"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_fk_violation_maps_to_422() {
        let err = ApiError::from(DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = ApiError::Internal("connection refused to 10.0.0.3".to_string());
        assert_eq!(err.message(), "Internal server error");
    }
}
