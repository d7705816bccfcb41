//! # Sale Repository
//!
//! Database operations for sales.
//!
//! ## Snapshot Pattern
//! Each sale row freezes `selling_price_cents`, `buying_price_cents` and
//! `total_value_cents` at the moment of sale. Later price changes on the
//! product never rewrite history: the reporting engine aggregates these
//! frozen snapshots. Consistency of `total_value = quantity × selling_price`
//! is the writer's job (validated at the API boundary), never recomputed
//! during reporting.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{page_offset, Page};
use restock_core::Sale;

const SALE_COLUMNS: &str = r#"
    id, product_id, store_id, quantity,
    selling_price_cents, buying_price_cents, total_value_cents,
    sale_date, created_at, updated_at
"#;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Lists sales, paginated, most recent sale dates first.
    pub async fn list(&self, page: u32, per_page: u32) -> DbResult<Page<Sale>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY sale_date DESC, id LIMIT ?1 OFFSET ?2"
        );
        let items = sqlx::query_as::<_, Sale>(&sql)
            .bind(i64::from(per_page))
            .bind(page_offset(page, per_page))
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page.max(1), per_page, total))
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sql = format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1");
        let sale = sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Inserts a new sale.
    pub async fn insert(&self, sale: &Sale) -> DbResult<()> {
        debug!(
            id = %sale.id,
            product_id = %sale.product_id,
            quantity = sale.quantity,
            "Inserting sale"
        );

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, product_id, store_id, quantity,
                selling_price_cents, buying_price_cents, total_value_cents,
                sale_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(&sale.store_id)
        .bind(sale.quantity)
        .bind(sale.selling_price_cents)
        .bind(sale.buying_price_cents)
        .bind(sale.total_value_cents)
        .bind(sale.sale_date)
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing sale.
    pub async fn update(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, "Updating sale");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE sales SET
                product_id = ?2,
                store_id = ?3,
                quantity = ?4,
                selling_price_cents = ?5,
                buying_price_cents = ?6,
                total_value_cents = ?7,
                sale_date = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(&sale.store_id)
        .bind(sale.quantity)
        .bind(sale.selling_price_cents)
        .bind(sale.buying_price_cents)
        .bind(sale.total_value_cents)
        .bind(sale.sale_date)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", &sale.id));
        }

        Ok(())
    }

    /// Deletes a sale.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        Ok(())
    }
}
