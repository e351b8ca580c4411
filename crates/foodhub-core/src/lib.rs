//! # foodhub-core: Pure Ordering Logic for FoodHub
//!
//! This crate holds the order rules of FoodHub as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FoodHub Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    POST /api/orders ──► PUT /api/order/status ──► GET ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ parsed requests                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    foodhub-db                                   │   │
//! │  │    OrderService ──► OrderRepository ──► SQLite                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ calls                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ foodhub-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │  status   │  │   │
//! │  │   │   Order   │  │   Money   │  │  builder  │  │   guard   │  │   │
//! │  │   │ OrderItem │  │  (cents)  │  │  totals   │  │  table    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO CLOCK                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, OrderItem, OrderStatus, requests)
//! - [`money`] - Money type with integer arithmetic
//! - [`order`] - Order aggregate builder (validation + totals)
//! - [`status`] - Status transition guard
//! - [`validation`] - Field-level rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use foodhub_core::{build_order, check_transition, Money, OrderLineRequest, OrderStatus, PlaceOrderRequest};
//!
//! let order = build_order(
//!     PlaceOrderRequest {
//!         customer_id: 1,
//!         delivery_address: "221B Baker St".to_string(),
//!         items: vec![OrderLineRequest {
//!             menu_item_id: 5,
//!             quantity: 2,
//!             unit_price: Money::from_cents(950),
//!             subtotal: Money::from_cents(1900),
//!         }],
//!         total_amount: None,
//!     },
//!     Utc::now(),
//! )
//! .unwrap();
//! assert_eq!(order.total_amount().to_decimal_string(), "19.00");
//!
//! // Skipping stages is rejected
//! assert!(check_transition(1, order.status(), OrderStatus::Delivered).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod order;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{OrderError, OrderResult, ValidationError};
pub use money::Money;
pub use order::build_order;
pub use status::check_transition;
pub use types::*;
