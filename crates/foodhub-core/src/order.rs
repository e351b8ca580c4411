//! # Order Aggregate Builder
//!
//! Turns a [`PlaceOrderRequest`] into a [`NewOrder`], or explains why not.
//!
//! ## Build Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       build_order(request, now)                         │
//! │                                                                         │
//! │  1. items non-empty?             ── no ──► Required { items }           │
//! │  2. delivery address non-empty?  ── no ──► Required { deliveryAddress } │
//! │  3. customer id positive?        ── no ──► MustBePositive               │
//! │  4. for each line i:                                                    │
//! │       menuItemId > 0, quantity >= 1, unitPrice >= 0                     │
//! │       subtotal == quantity × unitPrice ── no ──► SubtotalMismatch       │
//! │  5. total = Σ subtotals                                                 │
//! │  6. client total supplied and != total ── ──► TotalMismatch             │
//! │  7. status = PENDING, order_date = now                                  │
//! │                                                                         │
//! │  Pure: no clock, no database. The caller stamps `now`.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewOrder, NewOrderItem, OrderLineRequest, OrderStatus, PlaceOrderRequest};
use crate::validation::{
    validate_delivery_address, validate_id, validate_quantity, validate_unit_price,
    ValidationResult,
};

/// Validates a request and assembles the order to be written.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use foodhub_core::order::build_order;
/// use foodhub_core::{Money, OrderLineRequest, OrderStatus, PlaceOrderRequest};
///
/// let request = PlaceOrderRequest {
///     customer_id: 1,
///     delivery_address: "221B Baker St".to_string(),
///     items: vec![OrderLineRequest {
///         menu_item_id: 5,
///         quantity: 2,
///         unit_price: Money::from_cents(950),
///         subtotal: Money::from_cents(1900),
///     }],
///     total_amount: None,
/// };
///
/// let order = build_order(request, Utc::now()).unwrap();
/// assert_eq!(order.total_amount(), Money::from_cents(1900));
/// assert_eq!(order.status(), OrderStatus::Pending);
/// ```
pub fn build_order(request: PlaceOrderRequest, now: DateTime<Utc>) -> ValidationResult<NewOrder> {
    if request.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    let delivery_address = validate_delivery_address(&request.delivery_address)?;
    validate_id("customerId", request.customer_id)?;

    let items = request
        .items
        .iter()
        .enumerate()
        .map(|(index, line)| build_line(index, line))
        .collect::<ValidationResult<Vec<_>>>()?;

    let total = items
        .iter()
        .try_fold(Money::zero(), |acc, item| acc.checked_add(item.subtotal))
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "totalAmount".to_string(),
            min: 0,
            max: i64::MAX,
        })?;

    if let Some(supplied) = request.total_amount {
        if supplied != total {
            return Err(ValidationError::TotalMismatch {
                supplied: supplied.to_decimal_string(),
                computed: total.to_decimal_string(),
            });
        }
    }

    Ok(NewOrder {
        customer_id: request.customer_id,
        delivery_address,
        order_date: now,
        total_amount: total,
        status: OrderStatus::Pending,
        items,
    })
}

fn build_line(index: usize, line: &OrderLineRequest) -> ValidationResult<NewOrderItem> {
    let field = |name: &str| format!("items[{index}].{name}");

    validate_id(&field("menuItemId"), line.menu_item_id)?;
    validate_quantity(&field("quantity"), line.quantity)?;
    validate_unit_price(&field("unitPrice"), line.unit_price)?;

    let expected = line
        .unit_price
        .checked_multiply_quantity(line.quantity)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: field("subtotal"),
            min: 0,
            max: i64::MAX,
        })?;

    if expected != line.subtotal {
        return Err(ValidationError::SubtotalMismatch {
            field: field("subtotal"),
            expected: expected.to_decimal_string(),
            actual: line.subtotal.to_decimal_string(),
        });
    }

    Ok(NewOrderItem {
        menu_item_id: line.menu_item_id,
        quantity: line.quantity,
        unit_price: line.unit_price,
        subtotal: line.subtotal,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
