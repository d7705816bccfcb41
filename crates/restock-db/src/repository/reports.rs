//! # Reports Repository
//!
//! Read-only aggregation queries across sales, purchase orders and products.
//! This is the data-access half of the reporting engine; period resolution
//! and percentage math live in restock-core, and the API layer composes the
//! two.
//!
//! ## Query Families
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Reports Repository                              │
//! │                                                                     │
//! │  Scalar aggregates     sales_totals, purchases_value, counts        │
//! │  Rankings              top_categories / top_products by turnover    │
//! │  Monthly series        revenue/cost, sales-vs-purchases, orders     │
//! │  Dashboard counters    created-since, stock levels, delayed orders  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Range Filtering
//! Every period-scoped query guards its bounds with
//! `(?N IS NULL OR column >= ?N)`: an open bound binds NULL and the filter
//! collapses away, so `period=all` genuinely scans everything: a sale dated
//! ten years ago is included. DATE columns (`sale_date`, `expected_date`)
//! compare against calendar dates; timestamp columns (`order_date`) compare
//! against `[start-of-day, start-of-next-day)` UTC instants.
//!
//! All sums are monetary cents (i64); `COALESCE(SUM(...), 0)` turns an empty
//! match into zero, never NULL.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use chrono::{DateTime, NaiveDate, Utc};
use restock_core::{DateRange, OrderStatus, SalesTotals};

// =============================================================================
// Row Types
// =============================================================================

/// One category in a turnover ranking.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryTurnoverRow {
    pub category_id: String,
    pub category_name: String,
    pub turnover_cents: i64,
}

/// One product in a turnover ranking, enriched with its live stock level
/// and (nullable) category name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductTurnoverRow {
    pub product_id: String,
    pub product_name: String,
    pub category_name: Option<String>,
    pub sold_quantity: i64,
    pub remaining_quantity: i64,
    pub turnover_cents: i64,
}

/// Turnover keyed by entity id, for previous-period lookups.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KeyedTurnover {
    pub id: String,
    pub turnover_cents: i64,
}

/// One month of sales revenue/cost. `month` is 1-12.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlySalesRow {
    pub month: i64,
    pub revenue_cents: i64,
    pub cost_cents: i64,
}

/// One month of a summed monetary value. `month` is 1-12.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyValueRow {
    pub month: i64,
    pub total_cents: i64,
}

/// One month of a row count. `month` is 1-12.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyCountRow {
    pub month: i64,
    pub count: i64,
}

/// One product in the units-sold ranking (dashboard top sellers).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopSellerRow {
    pub product_name: String,
    pub sold_quantity: i64,
    pub remaining_quantity: i64,
    pub selling_price_cents: Option<i64>,
}

/// One product at or below its reorder threshold.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LowStockRow {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub threshold: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Read-only reporting queries. Never mutates anything.
#[derive(Debug, Clone)]
pub struct ReportsRepository {
    pool: SqlitePool,
}

impl ReportsRepository {
    /// Creates a new ReportsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportsRepository { pool }
    }

    // =========================================================================
    // Scalar Sales Aggregates
    // =========================================================================

    /// Revenue, cost and profit over sales whose `sale_date` falls in the
    /// range. Zeros (not NULLs) when nothing matches.
    pub async fn sales_totals(&self, range: &DateRange) -> DbResult<SalesTotals> {
        let (revenue, cost): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(selling_price_cents * quantity), 0),
                COALESCE(SUM(buying_price_cents * quantity), 0)
            FROM sales
            WHERE (?1 IS NULL OR sale_date >= ?1)
              AND (?2 IS NULL OR sale_date <= ?2)
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(SalesTotals::new(revenue, cost))
    }

    /// Units sold over sales whose `sale_date` falls in the range.
    pub async fn sales_units(&self, range: &DateRange) -> DbResult<i64> {
        let units: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(quantity), 0)
            FROM sales
            WHERE (?1 IS NULL OR sale_date >= ?1)
              AND (?2 IS NULL OR sale_date <= ?2)
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(units)
    }

    // =========================================================================
    // Scalar Purchase Aggregates
    // =========================================================================

    /// Σ order_value over purchase orders with the given status whose
    /// `order_date` falls in the range. The overview's "net purchase value"
    /// is this with `OrderStatus::Delivered`; the dashboard's returned and
    /// in-transit values use it with an unbounded range.
    pub async fn purchases_value(
        &self,
        range: &DateRange,
        status: OrderStatus,
    ) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(order_value_cents), 0)
            FROM purchase_orders
            WHERE status = ?3
              AND (?1 IS NULL OR order_date >= ?1)
              AND (?2 IS NULL OR order_date < ?2)
            "#,
        )
        .bind(range.start_bound_utc())
        .bind(range.end_bound_utc())
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Σ order_value over purchase orders placed at or after `since`, any
    /// status. The dashboard's trailing window is a true timestamp cut, not
    /// calendar-aligned.
    pub async fn purchases_value_since(&self, since: DateTime<Utc>) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(order_value_cents), 0) FROM purchase_orders WHERE order_date >= ?1",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Number of purchase orders placed at or after `since`, any status.
    pub async fn purchases_count_since(&self, since: DateTime<Utc>) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM purchase_orders WHERE order_date >= ?1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Number of purchase orders currently in the given status.
    pub async fn status_count(&self, status: OrderStatus) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM purchase_orders WHERE status = ?1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    // =========================================================================
    // Rankings
    // =========================================================================

    /// Top `limit` categories by turnover within the range.
    ///
    /// Turnover is Σ(selling_price × quantity) over the frozen sale
    /// snapshots. Ordering is descending turnover with ascending category id
    /// as the deterministic tie-break.
    pub async fn top_categories_by_turnover(
        &self,
        range: &DateRange,
        limit: u32,
    ) -> DbResult<Vec<CategoryTurnoverRow>> {
        debug!(limit, "Ranking categories by turnover");

        let rows = sqlx::query_as::<_, CategoryTurnoverRow>(
            r#"
            SELECT
                c.id AS category_id,
                c.name AS category_name,
                SUM(s.selling_price_cents * s.quantity) AS turnover_cents
            FROM sales s
            JOIN products p ON s.product_id = p.id
            JOIN categories c ON p.category_id = c.id
            WHERE (?1 IS NULL OR s.sale_date >= ?1)
              AND (?2 IS NULL OR s.sale_date <= ?2)
            GROUP BY c.id, c.name
            ORDER BY turnover_cents DESC, c.id ASC
            LIMIT ?3
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Turnover per category over the range, unranked and unlimited.
    /// Used to look up previous-period baselines for ranked rows.
    pub async fn category_turnovers(&self, range: &DateRange) -> DbResult<Vec<KeyedTurnover>> {
        let rows = sqlx::query_as::<_, KeyedTurnover>(
            r#"
            SELECT
                c.id AS id,
                SUM(s.selling_price_cents * s.quantity) AS turnover_cents
            FROM sales s
            JOIN products p ON s.product_id = p.id
            JOIN categories c ON p.category_id = c.id
            WHERE (?1 IS NULL OR s.sale_date >= ?1)
              AND (?2 IS NULL OR s.sale_date <= ?2)
            GROUP BY c.id
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Top `limit` products by turnover within the range, each enriched with
    /// units sold in the range, the product's *live* stock level and its
    /// category name (NULL for uncategorized joins).
    pub async fn top_products_by_turnover(
        &self,
        range: &DateRange,
        limit: u32,
    ) -> DbResult<Vec<ProductTurnoverRow>> {
        debug!(limit, "Ranking products by turnover");

        let rows = sqlx::query_as::<_, ProductTurnoverRow>(
            r#"
            SELECT
                p.id AS product_id,
                p.name AS product_name,
                c.name AS category_name,
                SUM(s.quantity) AS sold_quantity,
                p.quantity AS remaining_quantity,
                SUM(s.selling_price_cents * s.quantity) AS turnover_cents
            FROM sales s
            JOIN products p ON s.product_id = p.id
            LEFT JOIN categories c ON p.category_id = c.id
            WHERE (?1 IS NULL OR s.sale_date >= ?1)
              AND (?2 IS NULL OR s.sale_date <= ?2)
            GROUP BY p.id, p.name, c.name, p.quantity
            ORDER BY turnover_cents DESC, p.id ASC
            LIMIT ?3
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Turnover per product over the range, unranked and unlimited.
    pub async fn product_turnovers(&self, range: &DateRange) -> DbResult<Vec<KeyedTurnover>> {
        let rows = sqlx::query_as::<_, KeyedTurnover>(
            r#"
            SELECT
                product_id AS id,
                SUM(selling_price_cents * quantity) AS turnover_cents
            FROM sales
            WHERE (?1 IS NULL OR sale_date >= ?1)
              AND (?2 IS NULL OR sale_date <= ?2)
            GROUP BY product_id
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Top `limit` products by *units sold* since the given date (dashboard
    /// top sellers over the trailing window).
    pub async fn top_products_by_units(
        &self,
        since: NaiveDate,
        limit: u32,
    ) -> DbResult<Vec<TopSellerRow>> {
        let rows = sqlx::query_as::<_, TopSellerRow>(
            r#"
            SELECT
                p.name AS product_name,
                SUM(s.quantity) AS sold_quantity,
                p.quantity AS remaining_quantity,
                p.selling_price_cents AS selling_price_cents
            FROM sales s
            JOIN products p ON s.product_id = p.id
            WHERE s.sale_date >= ?1
            GROUP BY p.id, p.name, p.quantity, p.selling_price_cents
            ORDER BY sold_quantity DESC, p.id ASC
            LIMIT ?2
            "#,
        )
        .bind(since)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // =========================================================================
    // Monthly Series
    // =========================================================================
    // The SQL returns only months that have data; the API layer expands each
    // series to exactly 12 zero-filled entries.

    /// Revenue and cost per month of `year`, bucketed by `sale_date`.
    pub async fn monthly_sales_totals(&self, year: i32) -> DbResult<Vec<MonthlySalesRow>> {
        let rows = sqlx::query_as::<_, MonthlySalesRow>(
            r#"
            SELECT
                CAST(strftime('%m', sale_date) AS INTEGER) AS month,
                SUM(selling_price_cents * quantity) AS revenue_cents,
                SUM(buying_price_cents * quantity) AS cost_cents
            FROM sales
            WHERE strftime('%Y', sale_date) = ?1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(format!("{year:04}"))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Σ total_value of sales per month of `year`, bucketed by `sale_date`.
    /// Reads the frozen `total_value_cents` snapshots.
    pub async fn monthly_sales_value(&self, year: i32) -> DbResult<Vec<MonthlyValueRow>> {
        let rows = sqlx::query_as::<_, MonthlyValueRow>(
            r#"
            SELECT
                CAST(strftime('%m', sale_date) AS INTEGER) AS month,
                SUM(total_value_cents) AS total_cents
            FROM sales
            WHERE strftime('%Y', sale_date) = ?1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(format!("{year:04}"))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Σ order_value of purchase orders per month of `year`, bucketed by
    /// `order_date`, any status.
    pub async fn monthly_purchases_value(&self, year: i32) -> DbResult<Vec<MonthlyValueRow>> {
        let rows = sqlx::query_as::<_, MonthlyValueRow>(
            r#"
            SELECT
                CAST(strftime('%m', order_date) AS INTEGER) AS month,
                SUM(order_value_cents) AS total_cents
            FROM purchase_orders
            WHERE strftime('%Y', order_date) = ?1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(format!("{year:04}"))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Purchase orders placed per month of `year`, bucketed by `order_date`.
    pub async fn monthly_ordered_counts(&self, year: i32) -> DbResult<Vec<MonthlyCountRow>> {
        let rows = sqlx::query_as::<_, MonthlyCountRow>(
            r#"
            SELECT
                CAST(strftime('%m', order_date) AS INTEGER) AS month,
                COUNT(*) AS count
            FROM purchase_orders
            WHERE strftime('%Y', order_date) = ?1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(format!("{year:04}"))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Delivered purchase orders per month of `year`, bucketed by
    /// `expected_date`. Bucketing by the *expected* date (not a delivery
    /// timestamp) mirrors the upstream data model, which has no separate
    /// delivered-at column.
    pub async fn monthly_delivered_counts(&self, year: i32) -> DbResult<Vec<MonthlyCountRow>> {
        let rows = sqlx::query_as::<_, MonthlyCountRow>(
            r#"
            SELECT
                CAST(strftime('%m', expected_date) AS INTEGER) AS month,
                COUNT(*) AS count
            FROM purchase_orders
            WHERE status = ?1
              AND expected_date IS NOT NULL
              AND strftime('%Y', expected_date) = ?2
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(OrderStatus::Delivered)
        .bind(format!("{year:04}"))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // =========================================================================
    // Dashboard Counters
    // =========================================================================
    // All evaluated as of call time. Only the explicitly windowed queries
    // take a bound; stock levels and status counts are global by design.

    /// Categories created at or after `since`.
    pub async fn categories_created_since(&self, since: DateTime<Utc>) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE created_at >= ?1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Products created at or after `since`.
    pub async fn products_created_since(&self, since: DateTime<Utc>) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE created_at >= ?1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Suppliers created at or after `since`.
    pub async fn suppliers_created_since(&self, since: DateTime<Utc>) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM suppliers WHERE created_at >= ?1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Total on-hand quantity across all products.
    pub async fn quantity_in_hand(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Total quantity on outstanding (not yet delivered) purchase orders.
    pub async fn outstanding_order_quantity(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity), 0) FROM purchase_orders WHERE status != ?1",
        )
        .bind(OrderStatus::Delivered)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Orders past their expected date and still not delivered, as of
    /// `today`.
    pub async fn delayed_orders_count(&self, today: NaiveDate) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM purchase_orders
            WHERE expected_date IS NOT NULL
              AND expected_date < ?1
              AND status != ?2
            "#,
        )
        .bind(today)
        .bind(OrderStatus::Delivered)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Products at or below their reorder threshold.
    pub async fn low_stock_count(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE quantity <= threshold")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Products with nothing on hand.
    pub async fn out_of_stock_count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE quantity = 0")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Up to `limit` products at or below their reorder threshold, the most
    /// depleted first.
    pub async fn low_stock_products(&self, limit: u32) -> DbResult<Vec<LowStockRow>> {
        let rows = sqlx::query_as::<_, LowStockRow>(
            r#"
            SELECT id, name, quantity, threshold
            FROM products
            WHERE quantity <= threshold
            ORDER BY quantity ASC, id ASC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
