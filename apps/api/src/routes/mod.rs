//! # Route Modules
//!
//! One module per API surface, each exposing a `router()` merged here.
//! Everything except `/ping` sits behind the bearer-auth middleware.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  /ping                          liveness, public                    │
//! │                                                                     │
//! │  /categories /suppliers /stores                                     │
//! │  /products /orders /sales       CRUD, paginated lists               │
//! │                                                                     │
//! │  /reports/*                     period-scoped analytics             │
//! │  /dashboard /stats/*            trailing-window snapshot + series   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod categories;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod reports;
pub mod sales;
pub mod stores;
pub mod suppliers;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use restock_db::Page;

use crate::error::{ApiError, ApiResult};
use crate::{auth, AppState};

/// Assembles the full application router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(categories::router())
        .merge(suppliers::router())
        .merge(stores::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(sales::router())
        .merge(reports::router())
        .merge(dashboard::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/ping", get(ping))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe. Public on purpose.
async fn ping() -> &'static str {
    "pong"
}

// =============================================================================
// Shared Query Types
// =============================================================================

/// `?page=N` for paginated CRUD listings (1-based).
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Period selector shared by the report endpoints:
/// `?period=month|year|all|custom&start=YYYY-MM-DD&end=YYYY-MM-DD&limit=N`.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<u32>,
}

// =============================================================================
// Response Envelopes
// =============================================================================
// CRUD responses use the `{success, message, data, meta?}` envelope the
// back-office client consumes.

/// `200 {success, message, data}`.
pub(crate) fn data_envelope<T: Serialize>(message: &str, data: T) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": message,
        "data": data,
    }))
}

/// `201 {success, message, data}`.
pub(crate) fn created_envelope<T: Serialize>(message: &str, data: T) -> Response {
    (StatusCode::CREATED, data_envelope(message, data)).into_response()
}

/// `200 {success, message}` for deletions.
pub(crate) fn deleted_envelope(message: &str) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": message,
    }))
}

/// `200 {success, message, data, meta}` for paginated listings.
pub(crate) fn list_envelope<T: Serialize>(message: &str, page: Page<T>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": message,
        "data": page.items,
        "meta": {
            "current_page": page.current_page,
            "last_page": page.last_page,
            "per_page": page.per_page,
            "total": page.total,
        },
    }))
}

// =============================================================================
// Payload Validation Helpers
// =============================================================================

/// Rejects empty or whitespace-only required strings.
pub(crate) fn require_non_empty(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Rejects negative monetary amounts.
pub(crate) fn require_non_negative(field: &str, value: f64) -> ApiResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::Validation(format!("{field} must be non-negative")));
    }
    Ok(())
}

/// Rejects integers below a minimum (quantities, thresholds).
pub(crate) fn require_at_least(field: &str, value: i64, min: i64) -> ApiResult<()> {
    if value < min {
        return Err(ApiError::Validation(format!("{field} must be at least {min}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("name", "Beverages").is_ok());
        assert!(require_non_empty("name", "   ").is_err());
        assert!(require_non_empty("name", "").is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("buying_price", 0.0).is_ok());
        assert!(require_non_negative("buying_price", 12.5).is_ok());
        assert!(require_non_negative("buying_price", -0.01).is_err());
        assert!(require_non_negative("buying_price", f64::NAN).is_err());
    }

    #[test]
    fn test_require_at_least() {
        assert!(require_at_least("quantity", 1, 1).is_ok());
        assert!(require_at_least("quantity", 0, 1).is_err());
    }
}
