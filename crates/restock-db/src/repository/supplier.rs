//! Supplier repository: CRUD over the `suppliers` table.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{page_offset, Page};
use restock_core::Supplier;

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists suppliers, paginated, ordered by name.
    pub async fn list(&self, page: u32, per_page: u32) -> DbResult<Page<Supplier>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, email, phone, address, takes_back_returns,
                   created_at, updated_at
            FROM suppliers
            ORDER BY name, id
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(i64::from(per_page))
        .bind(page_offset(page, per_page))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(items, page.max(1), per_page, total))
    }

    /// Gets a supplier by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, email, phone, address, takes_back_returns,
                   created_at, updated_at
            FROM suppliers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Inserts a new supplier.
    pub async fn insert(&self, supplier: &Supplier) -> DbResult<()> {
        debug!(id = %supplier.id, name = %supplier.name, "Inserting supplier");

        sqlx::query(
            r#"
            INSERT INTO suppliers (
                id, name, email, phone, address, takes_back_returns,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.email)
        .bind(&supplier.phone)
        .bind(&supplier.address)
        .bind(supplier.takes_back_returns)
        .bind(supplier.created_at)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing supplier.
    pub async fn update(&self, supplier: &Supplier) -> DbResult<()> {
        debug!(id = %supplier.id, "Updating supplier");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                name = ?2,
                email = ?3,
                phone = ?4,
                address = ?5,
                takes_back_returns = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.email)
        .bind(&supplier.phone)
        .bind(&supplier.address)
        .bind(supplier.takes_back_returns)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", &supplier.id));
        }

        Ok(())
    }

    /// Deletes a supplier. Products referencing it fall back to NULL via
    /// ON DELETE SET NULL; purchase orders cascade.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting supplier");

        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }
}
