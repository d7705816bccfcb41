//! # Restock API
//!
//! HTTP/JSON server for the Restock backend: CRUD over the catalog entities
//! plus the reporting surface (overview, rankings, monthly series, dashboard
//! snapshot).
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Client ──► Axum Router ──► bearer-auth middleware ──► handler      │
//! │                                                          │          │
//! │                     restock-core (periods, percent math) │          │
//! │                     restock-db   (repositories)  ◄───────┘          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router is exposed as [`app`] so integration tests can drive the whole
//! service in-process via `tower::ServiceExt::oneshot`.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use restock_db::Database;

use crate::auth::JwtVerifier;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: JwtVerifier,
}

impl AppState {
    pub fn new(db: Database, jwt: JwtVerifier) -> Self {
        AppState { db, jwt }
    }
}

/// Builds the complete application router over the given state.
pub fn app(state: AppState) -> axum::Router {
    routes::router(state)
}
