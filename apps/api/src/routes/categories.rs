//! `/categories` CRUD routes.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use restock_core::{Category, DEFAULT_PAGE_SIZE};
use restock_db::repository::generate_id;

use crate::error::{ApiError, ApiResult};
use crate::routes::{
    created_envelope, data_envelope, deleted_envelope, list_envelope, require_non_empty,
    PageQuery,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list).post(create))
        .route("/categories/{id}", get(show).put(update).delete(destroy))
}

#[derive(Debug, Deserialize)]
struct CreateCategory {
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct UpdateCategory {
    name: Option<String>,
    description: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Value>> {
    let page = state
        .db
        .categories()
        .list(query.page.unwrap_or(1), DEFAULT_PAGE_SIZE)
        .await?;

    Ok(list_envelope("Categories retrieved", page))
}

async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let category = state
        .db
        .categories()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category {id}")))?;

    Ok(data_envelope("Category retrieved", category))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategory>,
) -> ApiResult<Response> {
    require_non_empty("name", &payload.name)?;

    let now = Utc::now();
    let category = Category {
        id: generate_id(),
        name: payload.name,
        description: payload.description,
        created_at: now,
        updated_at: now,
    };

    state.db.categories().insert(&category).await?;

    Ok(created_envelope("Category created", category))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCategory>,
) -> ApiResult<Json<Value>> {
    let repo = state.db.categories();
    let mut category = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category {id}")))?;

    if let Some(name) = payload.name {
        require_non_empty("name", &name)?;
        category.name = name;
    }
    if let Some(description) = payload.description {
        category.description = Some(description);
    }

    repo.update(&category).await?;

    Ok(data_envelope("Category updated", category))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    state.db.categories().delete(&id).await?;

    Ok(deleted_envelope("Category deleted"))
}
