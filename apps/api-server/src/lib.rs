//! # Resto API Server
//!
//! HTTP/JSON surface for the Resto POS settlement backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         API Server Routes (/api)                        │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  /orders       │  │  /bills        │  │  /table-transfer           ││
//! │  │                │  │                │  │                            ││
//! │  │ • place        │  │ • create       │  │ • transfer                 ││
//! │  │ • add item     │  │ • split        │  │ • correct                  ││
//! │  │ • update / void│  │ • pay          │  │ • list / get / delete      ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Collaborators                                                    │  │
//! │  │  /menu/*  /menu-ingredients  /ingredients  /outlets              │  │
//! │  │  /reservations  /tables  /staff  /customers  /visits  /health    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  AppState { db: Database, config } is built once in main and cloned    │
//! │  into every handler.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `RESTO_HTTP_PORT` - listen port (default: 8080)
//! - `RESTO_DATABASE_PATH` - SQLite file (default: ./data/resto.db)
//! - `RESTO_DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `RESTO_RESTOCK_ON_VOID` - give stock back on void (default: false)

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult, ErrorCode};

use resto_db::Database;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the application router with every route nested under `/api`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
