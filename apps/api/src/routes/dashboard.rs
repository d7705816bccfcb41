//! `/dashboard` and `/stats/*` endpoints.
//!
//! The dashboard snapshot works over a trailing 7-day window ending at the
//! injected "now", deliberately not calendar-aligned, unlike the report
//! periods. Stock levels, outstanding quantities and status-scoped purchase
//! figures are global by design: the window only applies to the
//! created-since counters, the sales block and the purchase count/cost pair.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;

use restock_core::{DateRange, Money, OrderStatus, DASHBOARD_WINDOW_DAYS};

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(summary))
        .route("/stats/sales_vs_purchases", get(sales_vs_purchases))
        .route("/stats/top-products", get(top_products))
        .route("/stats/low-stock", get(low_stock))
        .route("/stats/order_summary", get(order_summary))
}

/// How many rows the dashboard's top-sellers and low-stock panels show.
const TOP_SELLER_LIMIT: u32 = 5;
const LOW_STOCK_LIMIT: u32 = 10;

// =============================================================================
// GET /dashboard
// =============================================================================

#[derive(Debug, Serialize)]
struct DashboardSummary {
    /// Created in the trailing window.
    total_categories: i64,
    total_products: i64,
    total_suppliers: i64,
    /// Global on-hand quantity, unscoped.
    quantity_in_hand: i64,
    /// Quantity on outstanding (not yet delivered) purchase orders.
    to_be_received: i64,
    sales_last7: SalesWindow,
    purchase_last7: PurchaseWindow,
    low_stock_count: i64,
    out_of_stock_count: i64,
    delayed_orders: i64,
}

#[derive(Debug, Serialize)]
struct SalesWindow {
    units: i64,
    revenue: f64,
    profit: f64,
    cost: f64,
}

#[derive(Debug, Serialize)]
struct PurchaseWindow {
    /// Orders placed in the window.
    orders: i64,
    /// Σ order_value of orders placed in the window.
    cost: f64,
    /// Σ order_value of Returned orders (status-scoped, not windowed).
    returned: f64,
    returned_count: i64,
    /// Σ order_value of orders currently out for delivery.
    on_the_way_cost: f64,
}

async fn summary(State(state): State<AppState>) -> ApiResult<Json<DashboardSummary>> {
    let now = Utc::now();
    let window_start = now - Duration::days(DASHBOARD_WINDOW_DAYS);
    // sale_date is date-granular; the window cut degrades to whole days there.
    let sales_window = DateRange {
        start: Some(window_start.date_naive()),
        end: None,
    };

    let reports = state.db.reports();

    let total_categories = reports.categories_created_since(window_start).await?;
    let total_products = reports.products_created_since(window_start).await?;
    let total_suppliers = reports.suppliers_created_since(window_start).await?;
    let quantity_in_hand = reports.quantity_in_hand().await?;
    let to_be_received = reports.outstanding_order_quantity().await?;

    let sales_units = reports.sales_units(&sales_window).await?;
    let sales_totals = reports.sales_totals(&sales_window).await?;

    let purchase_orders = reports.purchases_count_since(window_start).await?;
    let purchase_cost = reports.purchases_value_since(window_start).await?;
    let returned_value = reports
        .purchases_value(&DateRange::unbounded(), OrderStatus::Returned)
        .await?;
    let returned_count = reports.status_count(OrderStatus::Returned).await?;
    let on_the_way_value = reports
        .purchases_value(&DateRange::unbounded(), OrderStatus::OutForDelivery)
        .await?;

    let delayed_orders = reports.delayed_orders_count(now.date_naive()).await?;
    let low_stock_count = reports.low_stock_count().await?;
    let out_of_stock_count = reports.out_of_stock_count().await?;

    Ok(Json(DashboardSummary {
        total_categories,
        total_products,
        total_suppliers,
        quantity_in_hand,
        to_be_received,
        sales_last7: SalesWindow {
            units: sales_units,
            revenue: sales_totals.revenue().to_major_units(),
            profit: sales_totals.profit().to_major_units(),
            cost: sales_totals.cost().to_major_units(),
        },
        purchase_last7: PurchaseWindow {
            orders: purchase_orders,
            cost: Money::from_cents(purchase_cost).to_major_units(),
            returned: Money::from_cents(returned_value).to_major_units(),
            returned_count,
            on_the_way_cost: Money::from_cents(on_the_way_value).to_major_units(),
        },
        low_stock_count,
        out_of_stock_count,
        delayed_orders,
    }))
}

// =============================================================================
// GET /stats/sales_vs_purchases
// =============================================================================

#[derive(Debug, Serialize)]
struct SalesVsPurchasesPoint {
    /// `YYYY-MM` bucket key.
    month: String,
    sales: f64,
    purchases: f64,
}

async fn sales_vs_purchases(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SalesVsPurchasesPoint>>> {
    let year = Utc::now().year();
    let reports = state.db.reports();

    let sales_rows = reports.monthly_sales_value(year).await?;
    let purchase_rows = reports.monthly_purchases_value(year).await?;

    let mut sales = [0i64; 12];
    for row in sales_rows {
        if (1..=12).contains(&row.month) {
            sales[(row.month - 1) as usize] = row.total_cents;
        }
    }
    let mut purchases = [0i64; 12];
    for row in purchase_rows {
        if (1..=12).contains(&row.month) {
            purchases[(row.month - 1) as usize] = row.total_cents;
        }
    }

    let series = (0..12)
        .map(|i| SalesVsPurchasesPoint {
            month: format!("{year}-{:02}", i + 1),
            sales: Money::from_cents(sales[i]).to_major_units(),
            purchases: Money::from_cents(purchases[i]).to_major_units(),
        })
        .collect();

    Ok(Json(series))
}

// =============================================================================
// GET /stats/order_summary
// =============================================================================

#[derive(Debug, Serialize)]
struct OrderSummaryPoint {
    month: String,
    ordered: i64,
    delivered: i64,
}

async fn order_summary(State(state): State<AppState>) -> ApiResult<Json<Vec<OrderSummaryPoint>>> {
    let year = Utc::now().year();
    let reports = state.db.reports();

    // Ordered buckets by order_date; delivered buckets by *expected_date*,
    // mirroring the upstream model which has no delivered-at column.
    let ordered_rows = reports.monthly_ordered_counts(year).await?;
    let delivered_rows = reports.monthly_delivered_counts(year).await?;

    let mut ordered = [0i64; 12];
    for row in ordered_rows {
        if (1..=12).contains(&row.month) {
            ordered[(row.month - 1) as usize] = row.count;
        }
    }
    let mut delivered = [0i64; 12];
    for row in delivered_rows {
        if (1..=12).contains(&row.month) {
            delivered[(row.month - 1) as usize] = row.count;
        }
    }

    let series = (0..12)
        .map(|i| OrderSummaryPoint {
            month: format!("{year}-{:02}", i + 1),
            ordered: ordered[i],
            delivered: delivered[i],
        })
        .collect();

    Ok(Json(series))
}

// =============================================================================
// GET /stats/top-products
// =============================================================================

#[derive(Debug, Serialize)]
struct TopProductPoint {
    product: String,
    sold: i64,
    remaining: i64,
    price: Option<f64>,
}

async fn top_products(State(state): State<AppState>) -> ApiResult<Json<Vec<TopProductPoint>>> {
    let since = window_start_date(Utc::now());

    let rows = state
        .db
        .reports()
        .top_products_by_units(since, TOP_SELLER_LIMIT)
        .await?;

    let items = rows
        .into_iter()
        .map(|row| TopProductPoint {
            product: row.product_name,
            sold: row.sold_quantity,
            remaining: row.remaining_quantity,
            price: row
                .selling_price_cents
                .map(|cents| Money::from_cents(cents).to_major_units()),
        })
        .collect();

    Ok(Json(items))
}

// =============================================================================
// GET /stats/low-stock
// =============================================================================

#[derive(Debug, Serialize)]
struct LowStockPoint {
    id: String,
    name: String,
    quantity: i64,
    threshold: i64,
}

async fn low_stock(State(state): State<AppState>) -> ApiResult<Json<Vec<LowStockPoint>>> {
    let rows = state.db.reports().low_stock_products(LOW_STOCK_LIMIT).await?;

    let items = rows
        .into_iter()
        .map(|row| LowStockPoint {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            threshold: row.threshold,
        })
        .collect();

    Ok(Json(items))
}

/// First sale date inside the trailing window ending at `now`.
fn window_start_date(now: DateTime<Utc>) -> chrono::NaiveDate {
    (now - Duration::days(DASHBOARD_WINDOW_DAYS)).date_naive()
}
