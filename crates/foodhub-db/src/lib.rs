//! # foodhub-db: Database Layer for FoodHub
//!
//! This crate provides database access and the order service.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FoodHub Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (PUT /api/order/status)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     foodhub-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ OrderService  │───►│  Repositories │    │  Migrations  │  │   │
//! │  │   │ (service.rs)  │    │ (order.rs)    │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                                │   │
//! │  │                        ┌───────▼───────┐                        │   │
//! │  │                        │   Database    │                        │   │
//! │  │                        │   (pool.rs)   │                        │   │
//! │  │                        └───────────────┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (FOODHUB_DB_PATH)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (order, catalog)
//! - [`service`] - Order placement and status transitions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use foodhub_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("foodhub.db")).await?;
//! let order_id = db.order_service().place_order(request).await?;
//! db.order_service().update_status(order_id, OrderStatus::Confirmed).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use service::{OrderService, PlacedOrder, MAX_STATUS_UPDATE_ATTEMPTS};

pub use repository::catalog::{CatalogRepository, NewCustomer, NewMenuItem};
pub use repository::order::OrderRepository;
