//! # Validation Module
//!
//! Input checks that run before any discount stage.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Money must be a decimal with at most 2 fraction digits            │
//! │  ├── Percent must be 0..=100                                           │
//! │  └── Tiers must be gold / silver / bronze                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── quantity in 1..=MAX_ITEM_QUANTITY                                 │
//! │  └── base_price in 0..=MAX_UNIT_PRICE_CENTS                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pipeline                                                     │
//! │  └── Voucher eligibility (brand / category / tier)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A cart is checked as a whole before pricing starts, so a bad line never
//! produces a partial breakdown.
//!
//! ## Usage
//! ```rust
//! use cartprice_core::validation::{validate_price, validate_quantity};
//! use cartprice_core::Money;
//!
//! validate_quantity(5).unwrap();
//! validate_price(Money::from_cents(99_900)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::CartLine;
use crate::{MAX_ITEM_QUANTITY, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## Example
/// ```rust
/// use cartprice_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed MAX_UNIT_PRICE_CENTS
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "base_price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates one cart line.
pub fn validate_cart_line(line: &CartLine) -> ValidationResult<()> {
    validate_quantity(line.quantity)?;
    validate_price(line.product.base_price)?;
    Ok(())
}

/// Validates every line of a cart. An empty cart is valid.
///
/// Field names in the returned error carry the line index, e.g.
/// `cart_items[2].quantity`.
pub fn validate_cart(lines: &[CartLine]) -> ValidationResult<()> {
    for (index, line) in lines.iter().enumerate() {
        validate_cart_line(line).map_err(|err| with_line_index(err, index))?;
    }
    Ok(())
}

fn with_line_index(err: ValidationError, index: usize) -> ValidationError {
    let prefix = |field: String| format!("cart_items[{}].{}", index, field);
    match err {
        ValidationError::Required { field } => ValidationError::Required {
            field: prefix(field),
        },
        ValidationError::OutOfRange { field, min, max } => ValidationError::OutOfRange {
            field: prefix(field),
            min,
            max,
        },
        ValidationError::MustBePositive { field } => ValidationError::MustBePositive {
            field: prefix(field),
        },
        ValidationError::InvalidFormat { field, reason } => ValidationError::InvalidFormat {
            field: prefix(field),
            reason,
        },
        ValidationError::NotAllowed { field, allowed } => ValidationError::NotAllowed {
            field: prefix(field),
            allowed,
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BrandTier, Product};

    fn line(price_cents: i64, quantity: i64) -> CartLine {
        CartLine::new(
            Product {
                id: "sku-1".to_string(),
                brand: "PUMA".to_string(),
                brand_tier: BrandTier::Regular,
                category: "T-shirts".to_string(),
                base_price: Money::from_cents(price_cents),
                current_price: None,
            },
            quantity,
            "M",
        )
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-100)).is_err());

        assert!(validate_price(Money::from_cents(MAX_UNIT_PRICE_CENTS)).is_ok());
        assert!(validate_price(Money::from_cents(MAX_UNIT_PRICE_CENTS + 1)).is_err());
    }

    #[test]
    fn test_validate_cart_reports_line_index() {
        let cart = vec![line(1000, 1), line(1000, 0)];
        let err = validate_cart(&cart).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MustBePositive {
                field: "cart_items[1].quantity".to_string()
            }
        );
    }

    #[test]
    fn test_validate_cart_negative_price() {
        let err = validate_cart(&[line(-1, 1)]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { ref field, .. } if field == "cart_items[0].base_price"
        ));
    }

    #[test]
    fn test_empty_cart_is_valid() {
        assert!(validate_cart(&[]).is_ok());
    }
}
