//! # Domain Types
//!
//! Cart-side input types for the pricing pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartLine     │   │ CustomerProfile │   │   PaymentInfo   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product ───────┼─┐ │  id             │   │  method         │       │
//! │  │  quantity       │ │ │  tier           │   │  bank_name?     │       │
//! │  │  size           │ │ └─────────────────┘   │  card_type?     │       │
//! │  └─────────────────┘ │                       └─────────────────┘       │
//! │                      ▼                                                  │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Percent      │   │  CustomerTier   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  brand          │   │  u8, 0..=100    │   │  Gold           │       │
//! │  │  category       │   │  40 = 40%       │   │  Silver         │       │
//! │  │  base_price     │   └─────────────────┘   │  Bronze         │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reference-data rows (brand, category, bank and voucher rules) live in
//! [`crate::rules`]; pipeline output lives in [`crate::breakdown`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// A whole-number discount percentage between 0 and 100.
///
/// ## Why Whole Percents?
/// Every discount table stores an integer percent (`40` = 40%). Keeping the
/// same representation means `Money::percent_of` is a single exact integer
/// division with one rounding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[serde(try_from = "u8", into = "u8")]
#[ts(export)]
pub struct Percent(u8);

impl Percent {
    /// Largest allowed percentage.
    pub const MAX: u8 = 100;

    /// Creates a percentage, rejecting values above 100.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::OutOfRange {
                field: "discount_percent".to_string(),
                min: 0,
                max: Self::MAX as i64,
            });
        }
        Ok(Percent(value))
    }

    /// Returns the percentage as a whole number.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Percent {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Percent::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Tiers
// =============================================================================

/// Informational brand classification. Not used in pricing arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BrandTier {
    Premium,
    Regular,
    Budget,
}

/// Loyalty tier of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    Gold,
    Silver,
    Bronze,
}

impl CustomerTier {
    /// Returns the lowercase tier name as stored in voucher rules.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTier::Gold => "gold",
            CustomerTier::Silver => "silver",
            CustomerTier::Bronze => "bronze",
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gold" => Ok(CustomerTier::Gold),
            "silver" => Ok(CustomerTier::Silver),
            "bronze" => Ok(CustomerTier::Bronze),
            _ => Err(ValidationError::NotAllowed {
                field: "tier".to_string(),
                allowed: vec!["gold".into(), "silver".into(), "bronze".into()],
            }),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as it appears in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalogue identifier (SKU or similar).
    pub id: String,

    /// Brand name, matched case-insensitively against brand rules.
    pub brand: String,

    pub brand_tier: BrandTier,

    /// Category name, matched case-insensitively against category rules.
    pub category: String,

    /// List price of one unit.
    #[ts(as = "String")]
    pub base_price: Money,

    /// Unit price the caller last displayed.
    ///
    /// Input only: the pipeline never reads or writes it. The recomputed
    /// price after item discounts is reported in
    /// [`LinePrice::unit_price`](crate::breakdown::LinePrice::unit_price).
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub current_price: Option<Money>,
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the cart: a product and how many units of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,

    /// Number of units. Must be between 1 and
    /// [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY).
    pub quantity: i64,

    /// Size label (opaque, not used in pricing).
    #[serde(default)]
    pub size: String,
}

impl CartLine {
    /// Creates a cart line.
    pub fn new(product: Product, quantity: i64, size: impl Into<String>) -> Self {
        CartLine {
            product,
            quantity,
            size: size.into(),
        }
    }

    /// List price of the whole line (base price × quantity).
    #[inline]
    pub fn base_total(&self) -> Money {
        self.product.base_price * self.quantity
    }
}

// =============================================================================
// Customer & Payment
// =============================================================================

/// The shopper the cart belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerProfile {
    pub id: String,
    pub tier: CustomerTier,
}

/// How the customer intends to pay.
///
/// Bank offers only apply when `bank_name` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentInfo {
    /// Payment method as stored in bank offers (`CARD`, `UPI`, ...).
    pub method: String,

    #[serde(default)]
    pub bank_name: Option<String>,

    /// `CREDIT` or `DEBIT`; compared case-insensitively.
    #[serde(default)]
    pub card_type: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bounds() {
        assert_eq!(Percent::new(40).unwrap().value(), 40);
        assert!(Percent::new(100).is_ok());
        assert!(Percent::new(101).is_err());
        assert!(Percent::zero().is_zero());
        assert_eq!(Percent::new(10).unwrap().to_string(), "10%");
    }

    #[test]
    fn test_percent_deserialize_rejects_out_of_range() {
        let ok: Percent = serde_json::from_str("69").unwrap();
        assert_eq!(ok.value(), 69);
        assert!(serde_json::from_str::<Percent>("150").is_err());
        assert_eq!(serde_json::to_string(&ok).unwrap(), "69");
    }

    #[test]
    fn test_customer_tier_parsing() {
        assert_eq!("gold".parse::<CustomerTier>().unwrap(), CustomerTier::Gold);
        assert_eq!("SILVER".parse::<CustomerTier>().unwrap(), CustomerTier::Silver);
        assert_eq!(" Bronze ".parse::<CustomerTier>().unwrap(), CustomerTier::Bronze);
        assert!("platinum".parse::<CustomerTier>().is_err());
        assert_eq!(CustomerTier::Gold.to_string(), "gold");
    }

    #[test]
    fn test_cart_line_from_json() {
        let json = r#"{
            "product": {
                "id": "sku-1",
                "brand": "PUMA",
                "brand_tier": "regular",
                "category": "T-shirts",
                "base_price": "1000.00",
                "current_price": "1000.00"
            },
            "quantity": 2,
            "size": "M"
        }"#;

        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.product.brand_tier, BrandTier::Regular);
        assert_eq!(line.base_total().cents(), 200_000);
        assert_eq!(line.size, "M");
    }

    #[test]
    fn test_payment_info_optional_fields() {
        let payment: PaymentInfo = serde_json::from_str(r#"{ "method": "UPI" }"#).unwrap();
        assert_eq!(payment.method, "UPI");
        assert!(payment.bank_name.is_none());
        assert!(payment.card_type.is_none());
    }
}
