//! `/suppliers` CRUD routes.
//!
//! Logo upload from the legacy back office is intentionally unsupported;
//! suppliers are plain contact records here.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use restock_core::{Supplier, DEFAULT_PAGE_SIZE};
use restock_db::repository::generate_id;

use crate::error::{ApiError, ApiResult};
use crate::routes::{
    created_envelope, data_envelope, deleted_envelope, list_envelope, require_non_empty,
    PageQuery,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/suppliers", get(list).post(create))
        .route("/suppliers/{id}", get(show).put(update).delete(destroy))
}

#[derive(Debug, Deserialize)]
struct CreateSupplier {
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    takes_back_returns: bool,
}

#[derive(Debug, Deserialize, Default)]
struct UpdateSupplier {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    takes_back_returns: Option<bool>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Value>> {
    let page = state
        .db
        .suppliers()
        .list(query.page.unwrap_or(1), DEFAULT_PAGE_SIZE)
        .await?;

    Ok(list_envelope("Suppliers retrieved", page))
}

async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let supplier = state
        .db
        .suppliers()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Supplier {id}")))?;

    Ok(data_envelope("Supplier retrieved", supplier))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplier>,
) -> ApiResult<Response> {
    require_non_empty("name", &payload.name)?;

    let now = Utc::now();
    let supplier = Supplier {
        id: generate_id(),
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        address: payload.address,
        takes_back_returns: payload.takes_back_returns,
        created_at: now,
        updated_at: now,
    };

    state.db.suppliers().insert(&supplier).await?;

    Ok(created_envelope("Supplier created", supplier))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSupplier>,
) -> ApiResult<Json<Value>> {
    let repo = state.db.suppliers();
    let mut supplier = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Supplier {id}")))?;

    if let Some(name) = payload.name {
        require_non_empty("name", &name)?;
        supplier.name = name;
    }
    if let Some(email) = payload.email {
        supplier.email = Some(email);
    }
    if let Some(phone) = payload.phone {
        supplier.phone = Some(phone);
    }
    if let Some(address) = payload.address {
        supplier.address = Some(address);
    }
    if let Some(takes_back_returns) = payload.takes_back_returns {
        supplier.takes_back_returns = takes_back_returns;
    }

    repo.update(&supplier).await?;

    Ok(data_envelope("Supplier updated", supplier))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    state.db.suppliers().delete(&id).await?;

    Ok(deleted_envelope("Supplier deleted"))
}
