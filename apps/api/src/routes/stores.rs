//! `/stores` CRUD routes.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use restock_core::{Store, DEFAULT_PAGE_SIZE};
use restock_db::repository::generate_id;

use crate::error::{ApiError, ApiResult};
use crate::routes::{
    created_envelope, data_envelope, deleted_envelope, list_envelope, require_non_empty,
    PageQuery,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stores", get(list).post(create))
        .route("/stores/{id}", get(show).put(update).delete(destroy))
}

#[derive(Debug, Deserialize)]
struct CreateStore {
    name: String,
    location: Option<String>,
    manager_name: Option<String>,
    phone: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct UpdateStore {
    name: Option<String>,
    location: Option<String>,
    manager_name: Option<String>,
    phone: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Value>> {
    let page = state
        .db
        .stores()
        .list(query.page.unwrap_or(1), DEFAULT_PAGE_SIZE)
        .await?;

    Ok(list_envelope("Stores retrieved", page))
}

async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let store = state
        .db
        .stores()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Store {id}")))?;

    Ok(data_envelope("Store retrieved", store))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateStore>,
) -> ApiResult<Response> {
    require_non_empty("name", &payload.name)?;

    let now = Utc::now();
    let store = Store {
        id: generate_id(),
        name: payload.name,
        location: payload.location,
        manager_name: payload.manager_name,
        phone: payload.phone,
        created_at: now,
        updated_at: now,
    };

    state.db.stores().insert(&store).await?;

    Ok(created_envelope("Store created", store))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStore>,
) -> ApiResult<Json<Value>> {
    let repo = state.db.stores();
    let mut store = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Store {id}")))?;

    if let Some(name) = payload.name {
        require_non_empty("name", &name)?;
        store.name = name;
    }
    if let Some(location) = payload.location {
        store.location = Some(location);
    }
    if let Some(manager_name) = payload.manager_name {
        store.manager_name = Some(manager_name);
    }
    if let Some(phone) = payload.phone {
        store.phone = Some(phone);
    }

    repo.update(&store).await?;

    Ok(data_envelope("Store updated", store))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    state.db.stores().delete(&id).await?;

    Ok(deleted_envelope("Store deleted"))
}
