//! # Domain Types
//!
//! Core domain types used throughout FoodHub ordering.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Persisted (read side)             Requested (write side)               │
//! │  ┌─────────────────┐               ┌─────────────────────┐              │
//! │  │     Order       │               │  PlaceOrderRequest  │              │
//! │  │  id             │               │  customer_id        │              │
//! │  │  customer_id    │               │  delivery_address   │              │
//! │  │  order_date     │               │  items[]            │──┐           │
//! │  │  total_amount   │               │  total_amount?      │  │           │
//! │  │  status         │               └─────────────────────┘  │ build     │
//! │  │  delivery_addr  │                                        ▼           │
//! │  └────────┬────────┘               ┌─────────────────────┐              │
//! │           │ 1..n                   │      NewOrder       │              │
//! │  ┌────────▼────────┐               │  (validated, only   │──► save      │
//! │  │   OrderItem     │               │   via the builder)  │              │
//! │  │  menu_item_id   │               └─────────────────────┘              │
//! │  │  quantity       │                                                    │
//! │  │  unit_price     │                                                    │
//! │  │  subtotal       │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Identifiers are assigned by storage (`INTEGER PRIMARY KEY`) and never
//! chosen by callers. Everything here is plain data: no lazy loading, no
//! hidden session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// A closed set: anything outside it is rejected at the boundary by
/// [`FromStr`] and never reaches the database. The legal moves between
/// statuses live in [`crate::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, waiting for the restaurant.
    Pending,
    /// Accepted by the restaurant.
    Confirmed,
    /// In the kitchen.
    Preparing,
    /// With the courier.
    OutForDelivery,
    /// Handed to the customer (terminal).
    Delivered,
    /// Cancelled before preparation (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Every status, in workflow order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// The persisted / wire representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the wire representation. Only the exact upper-case names match.
///
/// ## Example
/// ```rust
/// use foodhub_core::OrderStatus;
///
/// assert_eq!("OUT_FOR_DELIVERY".parse::<OrderStatus>().unwrap(), OrderStatus::OutForDelivery);
/// assert!("confirmed".parse::<OrderStatus>().is_err());
/// assert!("SHIPPED".parse::<OrderStatus>().is_err());
/// ```
impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order header as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    /// Assigned by storage on creation.
    pub id: i64,

    /// The customer who placed the order.
    pub customer_id: i64,

    /// Server-side creation timestamp.
    #[ts(as = "String")]
    pub order_date: DateTime<Utc>,

    /// Sum of the item subtotals at creation time, in cents.
    pub total_amount_cents: i64,

    /// Current workflow status (the only mutable field).
    pub status: OrderStatus,

    /// Where the order goes.
    pub delivery_address: String,
}

impl Order {
    /// Returns the total as a Money type.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line of an order.
/// Uses snapshot pattern: the unit price is frozen at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    /// Unit price in cents at time of order (frozen).
    pub unit_price_cents: i64,
    /// quantity × unit price, in cents.
    pub subtotal_cents: i64,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Place Order Request
// =============================================================================

/// Already-parsed input for placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrderRequest {
    pub customer_id: i64,
    pub delivery_address: String,
    pub items: Vec<OrderLineRequest>,
    /// Optional client-side total, cross-checked against the items.
    pub total_amount: Option<Money>,
}

/// One requested line, priced by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLineRequest {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

// =============================================================================
// New Order (validated aggregate)
// =============================================================================

/// A validated order ready to be written as one unit.
///
/// Only [`crate::order::build_order`] constructs this type, so holding a
/// `NewOrder` means: at least one item, status `PENDING`, a server-side
/// timestamp, and a total equal to the sum of the item subtotals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub(crate) customer_id: i64,
    pub(crate) delivery_address: String,
    pub(crate) order_date: DateTime<Utc>,
    pub(crate) total_amount: Money,
    pub(crate) status: OrderStatus,
    pub(crate) items: Vec<NewOrderItem>,
}

impl NewOrder {
    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    pub fn delivery_address(&self) -> &str {
        &self.delivery_address
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Never empty.
    pub fn items(&self) -> &[NewOrderItem] {
        &self.items
    }
}

/// A validated line of a [`NewOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

// =============================================================================
// Order Filter
// =============================================================================

/// Filters for listing orders. Both set means both must match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub customer_id: Option<i64>,
    pub status: Option<OrderStatus>,
}

// =============================================================================
// Unit Tests
// =============================================================================
