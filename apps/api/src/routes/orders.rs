//! `/orders` CRUD routes (purchase orders).

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use restock_core::{Money, OrderStatus, PurchaseOrder, DEFAULT_PAGE_SIZE};
use restock_db::repository::generate_id;

use crate::error::{ApiError, ApiResult};
use crate::routes::{
    created_envelope, data_envelope, deleted_envelope, list_envelope, require_at_least,
    require_non_empty, require_non_negative, PageQuery,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list).post(create))
        .route("/orders/{id}", get(show).put(update).delete(destroy))
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize)]
struct PurchaseOrderDto {
    id: String,
    product_id: String,
    supplier_id: String,
    quantity: i64,
    order_value: f64,
    order_date: DateTime<Utc>,
    expected_date: Option<NaiveDate>,
    status: OrderStatus,
    received: bool,
    received_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PurchaseOrder> for PurchaseOrderDto {
    fn from(order: PurchaseOrder) -> Self {
        PurchaseOrderDto {
            order_value: order.order_value().to_major_units(),
            id: order.id,
            product_id: order.product_id,
            supplier_id: order.supplier_id,
            quantity: order.quantity,
            order_date: order.order_date,
            expected_date: order.expected_date,
            status: order.status,
            received: order.received,
            received_date: order.received_date,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateOrder {
    product_id: String,
    supplier_id: String,
    quantity: i64,
    /// quantity × unit cost, frozen at order time
    order_value: f64,
    order_date: DateTime<Utc>,
    expected_date: Option<NaiveDate>,
    status: String,
    received: bool,
    received_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Default)]
struct UpdateOrder {
    product_id: Option<String>,
    supplier_id: Option<String>,
    quantity: Option<i64>,
    order_value: Option<f64>,
    order_date: Option<DateTime<Utc>>,
    expected_date: Option<NaiveDate>,
    status: Option<String>,
    received: Option<bool>,
    received_date: Option<DateTime<Utc>>,
}

fn parse_status(raw: &str) -> ApiResult<OrderStatus> {
    OrderStatus::parse(raw)
        .ok_or_else(|| ApiError::Validation(format!("Unknown order status: '{raw}'")))
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
        .purchase_orders()
        .list(query.page.unwrap_or(1), DEFAULT_PAGE_SIZE)
        .await?;

    Ok(list_envelope(
        "Purchase orders retrieved",
        page.map(PurchaseOrderDto::from),
    ))
}

async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let order = state
        .db
        .purchase_orders()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Purchase order {id}")))?;

    Ok(data_envelope(
        "Purchase order retrieved",
        PurchaseOrderDto::from(order),
    ))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrder>,
) -> ApiResult<Response> {
    require_non_empty("product_id", &payload.product_id)?;
    require_non_empty("supplier_id", &payload.supplier_id)?;
    require_at_least("quantity", payload.quantity, 1)?;
    require_non_negative("order_value", payload.order_value)?;
    let status = parse_status(&payload.status)?;

    let now = Utc::now();
    let order = PurchaseOrder {
        id: generate_id(),
        product_id: payload.product_id,
        supplier_id: payload.supplier_id,
        quantity: payload.quantity,
        order_value_cents: Money::from_major_units(payload.order_value).cents(),
        order_date: payload.order_date,
        expected_date: payload.expected_date,
        status,
        received: payload.received,
        received_date: payload.received_date,
        created_at: now,
        updated_at: now,
    };

    state.db.purchase_orders().insert(&order).await?;

    Ok(created_envelope(
        "Purchase order created",
        PurchaseOrderDto::from(order),
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrder>,
) -> ApiResult<Json<Value>> {
    let repo = state.db.purchase_orders();
    let mut order = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Purchase order {id}")))?;

    if let Some(product_id) = payload.product_id {
        require_non_empty("product_id", &product_id)?;
        order.product_id = product_id;
    }
    if let Some(supplier_id) = payload.supplier_id {
        require_non_empty("supplier_id", &supplier_id)?;
        order.supplier_id = supplier_id;
    }
    if let Some(quantity) = payload.quantity {
        require_at_least("quantity", quantity, 1)?;
        order.quantity = quantity;
    }
    if let Some(order_value) = payload.order_value {
        require_non_negative("order_value", order_value)?;
        order.order_value_cents = Money::from_major_units(order_value).cents();
    }
    if let Some(order_date) = payload.order_date {
        order.order_date = order_date;
    }
    if let Some(expected_date) = payload.expected_date {
        order.expected_date = Some(expected_date);
    }
    if let Some(status) = payload.status {
        order.status = parse_status(&status)?;
    }
    if let Some(received) = payload.received {
        order.received = received;
    }
    if let Some(received_date) = payload.received_date {
        order.received_date = Some(received_date);
    }

    repo.update(&order).await?;

    Ok(data_envelope(
        "Purchase order updated",
        PurchaseOrderDto::from(order),
    ))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    state.db.purchase_orders().delete(&id).await?;

    Ok(deleted_envelope("Purchase order deleted"))
}
