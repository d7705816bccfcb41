//! # restock-core: Pure Business Logic for Restock
//!
//! This crate is the **heart** of the Restock backend. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Restock Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    apps/api (Axum)                            │  │
//! │  │   /reports/* ── /dashboard ── /stats/* ── CRUD routes         │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │              ★ restock-core (THIS CRATE) ★                    │  │
//! │  │                                                               │  │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌──────────┐       │  │
//! │  │   │  types  │  │  money  │  │  period  │  │ metrics  │       │  │
//! │  │   │ Product │  │  Money  │  │  Period  │  │ percent_ │       │  │
//! │  │   │  Sale   │  │ (cents) │  │DateRange │  │  change  │       │  │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └──────────┘       │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO AMBIENT CLOCK • PURE FUNCTIONS    │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │                 restock-db (Database Layer)                   │  │
//! │  │           SQLite queries, migrations, repositories            │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, PurchaseOrder, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`period`] - Report period resolution and previous-range derivation
//! - [`metrics`] - Comparative metrics (percentage change)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **No Ambient Clock**: "today"/"now" is always an explicit parameter,
//!    so period logic is testable against any date
//! 4. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 5. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod metrics;
pub mod money;
pub mod period;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use restock_core::Money` instead of
// `use restock_core::money::Money`

pub use error::PeriodError;
pub use metrics::percent_change;
pub use money::Money;
pub use period::{DateRange, Period, PeriodMode};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of rows per page for paginated CRUD listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default limit for the best-categories ranking.
pub const DEFAULT_CATEGORY_LIMIT: u32 = 3;

/// Default limit for the best-products ranking.
pub const DEFAULT_PRODUCT_LIMIT: u32 = 5;

/// Length in days of the dashboard's trailing window.
pub const DASHBOARD_WINDOW_DAYS: i64 = 7;
