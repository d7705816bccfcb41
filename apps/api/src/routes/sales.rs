//! `/sales` CRUD routes.
//!
//! Sales are written with frozen price snapshots. `total_value` is accepted
//! from the client for compatibility with the legacy back office, but it is
//! validated against `quantity × selling_price` here. The write side owns
//! that consistency, the reporting side just trusts the stored snapshot.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use restock_core::{Money, Sale, DEFAULT_PAGE_SIZE};
use restock_db::repository::generate_id;

use crate::error::{ApiError, ApiResult};
use crate::routes::{
    created_envelope, data_envelope, deleted_envelope, list_envelope, require_at_least,
    require_non_empty, require_non_negative, PageQuery,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list).post(create))
        .route("/sales/{id}", get(show).put(update).delete(destroy))
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize)]
struct SaleDto {
    id: String,
    product_id: String,
    store_id: Option<String>,
    quantity: i64,
    selling_price: f64,
    buying_price: f64,
    total_value: f64,
    sale_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Sale> for SaleDto {
    fn from(sale: Sale) -> Self {
        SaleDto {
            selling_price: sale.selling_price().to_major_units(),
            buying_price: sale.buying_price().to_major_units(),
            total_value: sale.total_value().to_major_units(),
            id: sale.id,
            product_id: sale.product_id,
            store_id: sale.store_id,
            quantity: sale.quantity,
            sale_date: sale.sale_date,
            created_at: sale.created_at,
            updated_at: sale.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateSale {
    product_id: String,
    store_id: Option<String>,
    quantity: i64,
    sale_date: NaiveDate,
    selling_price: f64,
    buying_price: f64,
    total_value: f64,
}

#[derive(Debug, Deserialize, Default)]
struct UpdateSale {
    product_id: Option<String>,
    store_id: Option<String>,
    quantity: Option<i64>,
    sale_date: Option<NaiveDate>,
    selling_price: Option<f64>,
    buying_price: Option<f64>,
    total_value: Option<f64>,
}

/// The stored total must match its factors at write time.
fn check_total_consistency(quantity: i64, selling_price_cents: i64, total_cents: i64) -> ApiResult<()> {
    if total_cents != selling_price_cents * quantity {
        return Err(ApiError::Validation(
            "total_value must equal quantity × selling_price".to_string(),
        ));
    }
    Ok(())
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
        .sales()
        .list(query.page.unwrap_or(1), DEFAULT_PAGE_SIZE)
        .await?;

    Ok(list_envelope("Sales retrieved", page.map(SaleDto::from)))
}

async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let sale = state
        .db
        .sales()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Sale {id}")))?;

    Ok(data_envelope("Sale retrieved", SaleDto::from(sale)))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSale>,
) -> ApiResult<Response> {
    require_non_empty("product_id", &payload.product_id)?;
    require_at_least("quantity", payload.quantity, 1)?;
    require_non_negative("selling_price", payload.selling_price)?;
    require_non_negative("buying_price", payload.buying_price)?;
    require_non_negative("total_value", payload.total_value)?;

    let selling_price_cents = Money::from_major_units(payload.selling_price).cents();
    let total_value_cents = Money::from_major_units(payload.total_value).cents();
    check_total_consistency(payload.quantity, selling_price_cents, total_value_cents)?;

    let now = Utc::now();
    let sale = Sale {
        id: generate_id(),
        product_id: payload.product_id,
        store_id: payload.store_id,
        quantity: payload.quantity,
        selling_price_cents,
        buying_price_cents: Money::from_major_units(payload.buying_price).cents(),
        total_value_cents,
        sale_date: payload.sale_date,
        created_at: now,
        updated_at: now,
    };

    state.db.sales().insert(&sale).await?;

    Ok(created_envelope("Sale created", SaleDto::from(sale)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSale>,
) -> ApiResult<Json<Value>> {
    let repo = state.db.sales();
    let mut sale = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Sale {id}")))?;

    if let Some(product_id) = payload.product_id {
        require_non_empty("product_id", &product_id)?;
        sale.product_id = product_id;
    }
    if let Some(store_id) = payload.store_id {
        sale.store_id = Some(store_id);
    }
    if let Some(quantity) = payload.quantity {
        require_at_least("quantity", quantity, 1)?;
        sale.quantity = quantity;
    }
    if let Some(sale_date) = payload.sale_date {
        sale.sale_date = sale_date;
    }
    if let Some(selling_price) = payload.selling_price {
        require_non_negative("selling_price", selling_price)?;
        sale.selling_price_cents = Money::from_major_units(selling_price).cents();
    }
    if let Some(buying_price) = payload.buying_price {
        require_non_negative("buying_price", buying_price)?;
        sale.buying_price_cents = Money::from_major_units(buying_price).cents();
    }
    if let Some(total_value) = payload.total_value {
        require_non_negative("total_value", total_value)?;
        sale.total_value_cents = Money::from_major_units(total_value).cents();
    }

    check_total_consistency(sale.quantity, sale.selling_price_cents, sale.total_value_cents)?;

    repo.update(&sale).await?;

    Ok(data_envelope("Sale updated", SaleDto::from(sale)))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    state.db.sales().delete(&id).await?;

    Ok(deleted_envelope("Sale deleted"))
}
