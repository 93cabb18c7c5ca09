//! # Repository Module
//!
//! Database repository implementations for Resto POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and Their Seams                         │
//! │                                                                         │
//! │  OrderRepository ────────┬──► CatalogRepository::menu_item_in          │
//! │   place_order / add_item │    CatalogRepository::recipe_in             │
//! │                          └──► IngredientRepository::consume_in         │
//! │                                                                         │
//! │  BillRepository ─────────────► OutletRepository::charge_rates_in       │
//! │   create_bill / split                                                  │
//! │                                                                         │
//! │  CustomerVisitRepository ──┬─► CustomerRepository::live_in           │
//! │   create / update / delete └─► CustomerRepository::refresh_visit_*   │
//! │                                                                         │
//! │  `*_in` functions take `&mut SqliteConnection` so they run on the      │
//! │  caller's open transaction. Everything else takes the pool.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::CatalogRepository`] - Categories, menu items, recipe lines
//! - [`ingredient::IngredientRepository`] - Stock and movement ledger
//! - [`outlet::OutletRepository`] - Outlets and their charge rates
//! - [`order::OrderRepository`] - Order placement and lifecycle
//! - [`bill::BillRepository`] - Bills, splits, payments
//! - [`transfer::TransferRepository`] - Table transfers
//! - [`reservation::ReservationRepository`] - Reservations
//! - [`table::TableRepository`] - Dining tables per outlet
//! - [`staff::StaffRepository`] - Staff and their PINs
//! - [`customer::CustomerRepository`] - Guest profiles
//! - [`visit::CustomerVisitRepository`] - Visit history

pub mod bill;
pub mod catalog;
pub mod customer;
pub mod ingredient;
pub mod order;
pub mod outlet;
pub mod reservation;
pub mod staff;
pub mod table;
pub mod transfer;
pub mod visit;
