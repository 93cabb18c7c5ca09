//! # Route Handlers
//!
//! One module per resource. Each exposes `routes()` returning a
//! `Router<AppState>`; [`router`] merges them for nesting under `/api`.
//!
//! Handlers stay thin: extract, call one repository operation, map the
//! result. Business rules live in resto-core and resto-db.

use axum::Router;

use crate::AppState;

pub mod bills;
pub mod catalog;
pub mod customers;
pub mod health;
pub mod ingredients;
pub mod orders;
pub mod outlets;
pub mod reservations;
pub mod staff;
pub mod tables;
pub mod transfers;
pub mod visits;

/// All API routes, without the `/api` prefix.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(orders::routes())
        .merge(bills::routes())
        .merge(transfers::routes())
        .merge(catalog::routes())
        .merge(ingredients::routes())
        .merge(outlets::routes())
        .merge(reservations::routes())
        .merge(tables::routes())
        .merge(staff::routes())
        .merge(customers::routes())
        .merge(visits::routes())
}
