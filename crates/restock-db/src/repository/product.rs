//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Snapshot Boundary
//! The product row carries the *current* prices and stock level. Sales and
//! purchase orders freeze their own copies at transaction time, so nothing
//! here is consulted when reports replay history; only the live
//! `quantity` is read, as the "remaining stock" snapshot on ranked rows.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{page_offset, Page};
use restock_core::Product;

const PRODUCT_COLUMNS: &str = r#"
    id, name, category_id, supplier_id, store_id,
    buying_price_cents, selling_price_cents,
    quantity, threshold, expiry_date,
    created_at, updated_at
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let page = repo.list(1, 10).await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products, paginated, ordered by name.
    pub async fn list(&self, page: u32, per_page: u32) -> DbResult<Page<Product>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name, id LIMIT ?1 OFFSET ?2"
        );
        let items = sqlx::query_as::<_, Product>(&sql)
            .bind(i64::from(per_page))
            .bind(page_offset(page, per_page))
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page.max(1), per_page, total))
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Errors
    /// `DbError::ForeignKeyViolation` when `category_id`/`supplier_id`/
    /// `store_id` reference rows that do not exist.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, category_id, supplier_id, store_id,
                buying_price_cents, selling_price_cents,
                quantity, threshold, expiry_date,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category_id)
        .bind(&product.supplier_id)
        .bind(&product.store_id)
        .bind(product.buying_price_cents)
        .bind(product.selling_price_cents)
        .bind(product.quantity)
        .bind(product.threshold)
        .bind(product.expiry_date)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                category_id = ?3,
                supplier_id = ?4,
                store_id = ?5,
                buying_price_cents = ?6,
                selling_price_cents = ?7,
                quantity = ?8,
                threshold = ?9,
                expiry_date = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category_id)
        .bind(&product.supplier_id)
        .bind(&product.store_id)
        .bind(product.buying_price_cents)
        .bind(product.selling_price_cents)
        .bind(product.quantity)
        .bind(product.threshold)
        .bind(product.expiry_date)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product. Its sales and purchase orders cascade.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
