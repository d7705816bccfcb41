//! Store repository: CRUD over the `stores` table.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{page_offset, Page};
use restock_core::Store;

/// Repository for store database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Lists stores, paginated, ordered by name.
    pub async fn list(&self, page: u32, per_page: u32) -> DbResult<Page<Store>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Store>(
            r#"
            SELECT id, name, location, manager_name, phone, created_at, updated_at
            FROM stores
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

    /// Gets a store by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            SELECT id, name, location, manager_name, phone, created_at, updated_at
            FROM stores
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Inserts a new store.
    pub async fn insert(&self, store: &Store) -> DbResult<()> {
        debug!(id = %store.id, name = %store.name, "Inserting store");

        sqlx::query(
            r#"
            INSERT INTO stores (
                id, name, location, manager_name, phone, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&store.id)
        .bind(&store.name)
        .bind(&store.location)
        .bind(&store.manager_name)
        .bind(&store.phone)
        .bind(store.created_at)
        .bind(store.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing store.
    pub async fn update(&self, store: &Store) -> DbResult<()> {
        debug!(id = %store.id, "Updating store");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE stores SET
                name = ?2,
                location = ?3,
                manager_name = ?4,
                phone = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&store.id)
        .bind(&store.name)
        .bind(&store.location)
        .bind(&store.manager_name)
        .bind(&store.phone)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Store", &store.id));
        }

        Ok(())
    }

    /// Deletes a store.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting store");

        let result = sqlx::query("DELETE FROM stores WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Store", id));
        }

        Ok(())
    }
}
