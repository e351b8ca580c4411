//! # Repository Module
//!
//! Database repository implementations for FoodHub.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  OrderService                                                          │
//! │       │                                                                 │
//! │       │  db.orders().save_order_with_items(&new_order)                 │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── save_order_with_items(&self, order)   (one transaction)           │
//! │  ├── get_by_id / get_by_customer / get_by_status / get_all             │
//! │  ├── get_items(&self, order_id)                                        │
//! │  └── update_status(&self, id, expected, new)                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Plain structs in, plain structs out: no lazy loading, no session.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`order::OrderRepository`] - Order headers and items
//! - [`catalog::CatalogRepository`] - Customer and menu item inserts

pub mod catalog;
pub mod order;
