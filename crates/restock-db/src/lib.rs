//! # restock-db: Database Layer for Restock
//!
//! This crate provides database access for the Restock backend.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (one per entity, plus the
//!   read-only cross-entity reports repository)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use restock_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/restock.db")).await?;
//!
//! // CRUD repositories
//! let page = db.products().list(1, 10).await?;
//!
//! // Reporting queries
//! let totals = db.reports().sales_totals(&range).await?;
//! ```
//!
//! ## Repositories Return Plain Records
//!
//! Repositories hand back flat data records with explicit foreign-key ids.
//! There is no live object graph and no lazy relationship traversal; where a
//! report needs joined data (e.g. a product's category name), the join is a
//! single explicit SQL query in the reports repository.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::purchase_order::PurchaseOrderRepository;
pub use repository::reports::ReportsRepository;
pub use repository::sale::SaleRepository;
pub use repository::store::StoreRepository;
pub use repository::supplier::SupplierRepository;
pub use repository::Page;
