//! # Validation Module
//!
//! Field-level validation for FoodHub order input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP boundary (apps/api)                                     │
//! │  ├── JSON shape (deserialization)                                      │
//! │  └── Amount / status parsing                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + order builder                                  │
//! │  ├── Field rules (quantity, price, address)                            │
//! │  └── Cross-field rules (subtotals, total)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign keys (customer, menu item)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator takes the field name so errors on order lines can point
//! at the exact line (`items[2].quantity`).

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a delivery address and returns it trimmed.
///
/// ## Example
/// ```rust
/// use foodhub_core::validation::validate_delivery_address;
///
/// assert_eq!(validate_delivery_address(" 221B Baker St ").unwrap(), "221B Baker St");
/// assert!(validate_delivery_address("   ").is_err());
/// ```
pub fn validate_delivery_address(address: &str) -> ValidationResult<String> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "deliveryAddress".to_string(),
        });
    }

    Ok(address.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a storage identifier (customer, menu item, order).
///
/// ## Rules
/// - Must be positive (> 0); storage never assigns zero or negatives
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be at least 1
///
/// ## Example
/// ```rust
/// use foodhub_core::validation::validate_quantity;
///
/// assert!(validate_quantity("quantity", 1).is_ok());
/// assert!(validate_quantity("quantity", 0).is_err());
/// ```
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, promotions)
pub fn validate_unit_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_delivery_address() {
        assert_eq!(
            validate_delivery_address("221B Baker St").unwrap(),
            "221B Baker St"
        );
        assert_eq!(
            validate_delivery_address("\t12 High St\n").unwrap(),
            "12 High St"
        );
        assert!(validate_delivery_address("").is_err());
        assert!(validate_delivery_address(" \n ").is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("customerId", 1).is_ok());
        assert!(validate_id("customerId", 0).is_err());
        assert!(validate_id("customerId", -3).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("quantity", 1).is_ok());
        assert!(validate_quantity("quantity", 100_000).is_ok());

        let err = validate_quantity("items[0].quantity", 0).unwrap_err();
        assert_eq!(err.field(), "items[0].quantity");
        assert!(validate_quantity("quantity", -1).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price("unitPrice", Money::from_cents(0)).is_ok());
        assert!(validate_unit_price("unitPrice", Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price("unitPrice", Money::from_cents(-1)).is_err());
    }
}
