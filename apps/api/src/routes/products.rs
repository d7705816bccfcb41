//! `/products` CRUD routes.
//!
//! Monetary fields cross this boundary as two-decimal JSON numbers; the
//! records underneath store integer cents.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use restock_core::{Money, Product, DEFAULT_PAGE_SIZE};
use restock_db::repository::generate_id;

use crate::error::{ApiError, ApiResult};
use crate::routes::{
    created_envelope, data_envelope, deleted_envelope, list_envelope, require_at_least,
    require_non_empty, require_non_negative, PageQuery,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/{id}", get(show).put(update).delete(destroy))
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize)]
struct ProductDto {
    id: String,
    name: String,
    category_id: String,
    supplier_id: Option<String>,
    store_id: Option<String>,
    buying_price: f64,
    selling_price: Option<f64>,
    quantity: i64,
    threshold: i64,
    expiry_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        ProductDto {
            buying_price: product.buying_price().to_major_units(),
            selling_price: product.selling_price().map(|m| m.to_major_units()),
            id: product.id,
            name: product.name,
            category_id: product.category_id,
            supplier_id: product.supplier_id,
            store_id: product.store_id,
            quantity: product.quantity,
            threshold: product.threshold,
            expiry_date: product.expiry_date,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateProduct {
    name: String,
    category_id: String,
    buying_price: f64,
    selling_price: Option<f64>,
    quantity: i64,
    threshold: i64,
    expiry_date: Option<NaiveDate>,
    supplier_id: Option<String>,
    store_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct UpdateProduct {
    name: Option<String>,
    category_id: Option<String>,
    buying_price: Option<f64>,
    selling_price: Option<f64>,
    quantity: Option<i64>,
    threshold: Option<i64>,
    expiry_date: Option<NaiveDate>,
    supplier_id: Option<String>,
    store_id: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

async fn list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Value>> {
    let page = state
        .db
        .products()
        .list(query.page.unwrap_or(1), DEFAULT_PAGE_SIZE)
        .await?;

    Ok(list_envelope("Products retrieved", page.map(ProductDto::from)))
}

async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {id}")))?;

    Ok(data_envelope("Product retrieved", ProductDto::from(product)))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> ApiResult<Response> {
    require_non_empty("name", &payload.name)?;
    require_non_empty("category_id", &payload.category_id)?;
    require_non_negative("buying_price", payload.buying_price)?;
    if let Some(selling_price) = payload.selling_price {
        require_non_negative("selling_price", selling_price)?;
    }
    require_at_least("quantity", payload.quantity, 0)?;
    require_at_least("threshold", payload.threshold, 0)?;

    let now = Utc::now();
    let product = Product {
        id: generate_id(),
        name: payload.name,
        category_id: payload.category_id,
        supplier_id: payload.supplier_id,
        store_id: payload.store_id,
        buying_price_cents: Money::from_major_units(payload.buying_price).cents(),
        selling_price_cents: payload
            .selling_price
            .map(|p| Money::from_major_units(p).cents()),
        quantity: payload.quantity,
        threshold: payload.threshold,
        expiry_date: payload.expiry_date,
        created_at: now,
        updated_at: now,
    };

    state.db.products().insert(&product).await?;

    Ok(created_envelope("Product created", ProductDto::from(product)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProduct>,
) -> ApiResult<Json<Value>> {
    let repo = state.db.products();
    let mut product = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {id}")))?;

    if let Some(name) = payload.name {
        require_non_empty("name", &name)?;
        product.name = name;
    }
    if let Some(category_id) = payload.category_id {
        require_non_empty("category_id", &category_id)?;
        product.category_id = category_id;
    }
    if let Some(buying_price) = payload.buying_price {
        require_non_negative("buying_price", buying_price)?;
        product.buying_price_cents = Money::from_major_units(buying_price).cents();
    }
    if let Some(selling_price) = payload.selling_price {
        require_non_negative("selling_price", selling_price)?;
        product.selling_price_cents = Some(Money::from_major_units(selling_price).cents());
    }
    if let Some(quantity) = payload.quantity {
        require_at_least("quantity", quantity, 0)?;
        product.quantity = quantity;
    }
    if let Some(threshold) = payload.threshold {
        require_at_least("threshold", threshold, 0)?;
        product.threshold = threshold;
    }
    if let Some(expiry_date) = payload.expiry_date {
        product.expiry_date = Some(expiry_date);
    }
    if let Some(supplier_id) = payload.supplier_id {
        product.supplier_id = Some(supplier_id);
    }
    if let Some(store_id) = payload.store_id {
        product.store_id = Some(store_id);
    }

    repo.update(&product).await?;

    Ok(data_envelope("Product updated", ProductDto::from(product)))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    state.db.products().delete(&id).await?;

    Ok(deleted_envelope("Product deleted"))
}
