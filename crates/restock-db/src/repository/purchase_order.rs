//! # Purchase Order Repository
//!
//! Database operations for purchase orders.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Purchase Order Lifecycle                         │
//! │                                                                     │
//! │   Confirmed ──► Out for delivery ──► Delivered (received = 1)       │
//! │       │                │                                            │
//! │       │                ├──► Delayed (past expected_date)            │
//! │       │                │                                            │
//! │       └────────────────┴──► Returned                                │
//! │                                                                     │
//! │  `order_value_cents` is frozen at order time (quantity × unit       │
//! │  cost). Reports read the frozen value, never today's prices.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{page_offset, Page};
use restock_core::PurchaseOrder;

const ORDER_COLUMNS: &str = r#"
    id, product_id, supplier_id, quantity, order_value_cents,
    order_date, expected_date, status, received, received_date,
    created_at, updated_at
"#;

/// Repository for purchase order database operations.
#[derive(Debug, Clone)]
pub struct PurchaseOrderRepository {
    pool: SqlitePool,
}

impl PurchaseOrderRepository {
    /// Creates a new PurchaseOrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseOrderRepository { pool }
    }

    /// Lists purchase orders, paginated, most recent orders first.
    pub async fn list(&self, page: u32, per_page: u32) -> DbResult<Page<PurchaseOrder>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchase_orders")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM purchase_orders ORDER BY order_date DESC, id LIMIT ?1 OFFSET ?2"
        );
        let items = sqlx::query_as::<_, PurchaseOrder>(&sql)
            .bind(i64::from(per_page))
            .bind(page_offset(page, per_page))
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page.max(1), per_page, total))
    }

    /// Gets a purchase order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PurchaseOrder>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM purchase_orders WHERE id = ?1");
        let order = sqlx::query_as::<_, PurchaseOrder>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Inserts a new purchase order.
    pub async fn insert(&self, order: &PurchaseOrder) -> DbResult<()> {
        debug!(
            id = %order.id,
            product_id = %order.product_id,
            status = order.status.as_str(),
            "Inserting purchase order"
        );

        sqlx::query(
            r#"
            INSERT INTO purchase_orders (
                id, product_id, supplier_id, quantity, order_value_cents,
                order_date, expected_date, status, received, received_date,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&order.id)
        .bind(&order.product_id)
        .bind(&order.supplier_id)
        .bind(order.quantity)
        .bind(order.order_value_cents)
        .bind(order.order_date)
        .bind(order.expected_date)
        .bind(order.status)
        .bind(order.received)
        .bind(order.received_date)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing purchase order.
    pub async fn update(&self, order: &PurchaseOrder) -> DbResult<()> {
        debug!(id = %order.id, status = order.status.as_str(), "Updating purchase order");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE purchase_orders SET
                product_id = ?2,
                supplier_id = ?3,
                quantity = ?4,
                order_value_cents = ?5,
                order_date = ?6,
                expected_date = ?7,
                status = ?8,
                received = ?9,
                received_date = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&order.id)
        .bind(&order.product_id)
        .bind(&order.supplier_id)
        .bind(order.quantity)
        .bind(order.order_value_cents)
        .bind(order.order_date)
        .bind(order.expected_date)
        .bind(order.status)
        .bind(order.received)
        .bind(order.received_date)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Purchase order", &order.id));
        }

        Ok(())
    }

    /// Deletes a purchase order.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting purchase order");

        let result = sqlx::query("DELETE FROM purchase_orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Purchase order", id));
        }

        Ok(())
    }
}
