//! `/reports/*` endpoints: period-scoped analytics.
//!
//! Each handler resolves the requested period against the injected current
//! date, fans out the aggregate queries for the current and previous ranges,
//! and folds the pair into percentage deltas. No partial results: any failed
//! sub-aggregate fails the request.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use restock_core::{
    percent_change, Money, OrderStatus, Period, SalesTotals, DEFAULT_CATEGORY_LIMIT,
    DEFAULT_PRODUCT_LIMIT,
};
use restock_db::repository::reports::KeyedTurnover;

use crate::error::ApiResult;
use crate::routes::PeriodQuery;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/overview", get(overview))
        .route("/reports/best-categories", get(best_categories))
        .route("/reports/profit-vs-revenue", get(profit_vs_revenue))
        .route("/reports/best-products", get(best_products))
}

/// Month labels for the profit-vs-revenue series, January first.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// =============================================================================
// Shared Payload Pieces
// =============================================================================

/// `{mode, start, end}` echo of the resolved period.
#[derive(Debug, Serialize)]
struct PeriodInfo {
    mode: &'static str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl PeriodInfo {
    fn from_period(period: &Period) -> Self {
        PeriodInfo {
            mode: period.mode.as_str(),
            start: period.range.start,
            end: period.range.end,
        }
    }
}

/// `{start, end}` echo for the ranking endpoints.
#[derive(Debug, Serialize)]
struct PeriodBounds {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl PeriodBounds {
    fn from_period(period: &Period) -> Self {
        PeriodBounds {
            start: period.range.start,
            end: period.range.end,
        }
    }
}

/// Turns previous-period grouped turnovers into an id → cents lookup.
fn turnover_map(rows: Vec<KeyedTurnover>) -> HashMap<String, i64> {
    rows.into_iter()
        .map(|row| (row.id, row.turnover_cents))
        .collect()
}

// =============================================================================
// GET /reports/overview
// =============================================================================

#[derive(Debug, Serialize)]
struct OverviewResponse {
    period: PeriodInfo,
    overview: OverviewBody,
}

#[derive(Debug, Serialize)]
struct OverviewBody {
    total_profit: f64,
    revenue: f64,
    /// Cost of the goods sold in the period (the "Sales" tile).
    sales_cost: f64,
    /// Σ order_value of Delivered purchase orders in the period.
    net_purchase_value: f64,
    /// Alias of revenue, kept as its own field for the client.
    net_sales_value: f64,
    mom_profit_pct: Option<f64>,
    yoy_profit_pct: Option<f64>,
}

async fn overview(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<OverviewResponse>> {
    let today = Utc::now().date_naive();
    let period = Period::resolve(
        query.period.as_deref(),
        query.start.as_deref(),
        query.end.as_deref(),
        today,
    )?;

    let reports = state.db.reports();

    let totals = reports.sales_totals(&period.range).await?;
    let net_purchase = reports
        .purchases_value(&period.range, OrderStatus::Delivered)
        .await?;

    // Period-over-period: the mode's previous comparable range, when the
    // current range is fully bounded.
    let mom_profit_pct = match period.previous_range() {
        Some(prev) => {
            let prev_totals = reports.sales_totals(&prev).await?;
            percent_change(totals.profit_cents, prev_totals.profit_cents)
        }
        None => None,
    };

    // Year-over-year: identical calendar dates one year earlier.
    let yoy_profit_pct = if period.range.is_unbounded() {
        None
    } else {
        let last_year = reports.sales_totals(&period.range.previous_year()).await?;
        percent_change(totals.profit_cents, last_year.profit_cents)
    };

    Ok(Json(OverviewResponse {
        period: PeriodInfo::from_period(&period),
        overview: OverviewBody {
            total_profit: totals.profit().to_major_units(),
            revenue: totals.revenue().to_major_units(),
            sales_cost: totals.cost().to_major_units(),
            net_purchase_value: Money::from_cents(net_purchase).to_major_units(),
            net_sales_value: totals.revenue().to_major_units(),
            mom_profit_pct,
            yoy_profit_pct,
        },
    }))
}

// =============================================================================
// GET /reports/best-categories
// =============================================================================

#[derive(Debug, Serialize)]
struct BestCategoriesResponse {
    period: PeriodBounds,
    items: Vec<BestCategoryItem>,
}

#[derive(Debug, Serialize)]
struct BestCategoryItem {
    category: String,
    turnover: f64,
    increase_pct: Option<f64>,
}

async fn best_categories(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<BestCategoriesResponse>> {
    let today = Utc::now().date_naive();
    let limit = query.limit.unwrap_or(DEFAULT_CATEGORY_LIMIT);
    let period = Period::resolve(
        query.period.as_deref(),
        query.start.as_deref(),
        query.end.as_deref(),
        today,
    )?;

    let reports = state.db.reports();
    let current = reports
        .top_categories_by_turnover(&period.range, limit)
        .await?;

    let previous = match period.previous_range() {
        Some(prev) => turnover_map(reports.category_turnovers(&prev).await?),
        None => HashMap::new(),
    };

    let items = current
        .into_iter()
        .map(|row| {
            let baseline = previous.get(&row.category_id).copied().unwrap_or(0);
            BestCategoryItem {
                category: row.category_name,
                turnover: Money::from_cents(row.turnover_cents).to_major_units(),
                increase_pct: percent_change(row.turnover_cents, baseline),
            }
        })
        .collect();

    Ok(Json(BestCategoriesResponse {
        period: PeriodBounds::from_period(&period),
        items,
    }))
}

// =============================================================================
// GET /reports/profit-vs-revenue
// =============================================================================

#[derive(Debug, Deserialize)]
struct YearQuery {
    year: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ProfitVsRevenueResponse {
    year: i32,
    series: Vec<MonthProfitPoint>,
}

#[derive(Debug, Serialize)]
struct MonthProfitPoint {
    month: &'static str,
    revenue: f64,
    profit: f64,
}

async fn profit_vs_revenue(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<ProfitVsRevenueResponse>> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let rows = state.db.reports().monthly_sales_totals(year).await?;

    // Exactly 12 entries; months without data stay at zero.
    let mut by_month = [SalesTotals::default(); 12];
    for row in rows {
        if (1..=12).contains(&row.month) {
            by_month[(row.month - 1) as usize] =
                SalesTotals::new(row.revenue_cents, row.cost_cents);
        }
    }

    let series = by_month
        .iter()
        .enumerate()
        .map(|(i, totals)| MonthProfitPoint {
            month: MONTH_LABELS[i],
            revenue: totals.revenue().to_major_units(),
            profit: totals.profit().to_major_units(),
        })
        .collect();

    Ok(Json(ProfitVsRevenueResponse { year, series }))
}

// =============================================================================
// GET /reports/best-products
// =============================================================================

#[derive(Debug, Serialize)]
struct BestProductsResponse {
    period: PeriodBounds,
    items: Vec<BestProductItem>,
}

#[derive(Debug, Serialize)]
struct BestProductItem {
    product_id: String,
    product: String,
    category: Option<String>,
    /// Live stock snapshot, not period-scoped.
    remaining_quantity: i64,
    sold_quantity: i64,
    turnover: f64,
    increase_pct: Option<f64>,
}

async fn best_products(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<BestProductsResponse>> {
    let today = Utc::now().date_naive();
    let limit = query.limit.unwrap_or(DEFAULT_PRODUCT_LIMIT);
    let period = Period::resolve(
        query.period.as_deref(),
        query.start.as_deref(),
        query.end.as_deref(),
        today,
    )?;

    let reports = state.db.reports();
    let current = reports
        .top_products_by_turnover(&period.range, limit)
        .await?;

    let previous = match period.previous_range() {
        Some(prev) => turnover_map(reports.product_turnovers(&prev).await?),
        None => HashMap::new(),
    };

    let items = current
        .into_iter()
        .map(|row| {
            let baseline = previous.get(&row.product_id).copied().unwrap_or(0);
            BestProductItem {
                increase_pct: percent_change(row.turnover_cents, baseline),
                product_id: row.product_id,
                product: row.product_name,
                category: row.category_name,
                remaining_quantity: row.remaining_quantity,
                sold_quantity: row.sold_quantity,
                turnover: Money::from_cents(row.turnover_cents).to_major_units(),
            }
        })
        .collect();

    Ok(Json(BestProductsResponse {
        period: PeriodBounds::from_period(&period),
        items,
    }))
}
