//! # Price Breakdown
//!
//! Output of the pricing pipeline.
//!
//! ## Anatomy of a Breakdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PUMA tee 1000.00 × 1, brand 40%, category 10%, ICICI credit 10%        │
//! │                                                                         │
//! │  original_total          1000.00                                        │
//! │  applied_discounts                                                      │
//! │    bank:ICICI:10%           54.00                                       │
//! │    brand:PUMA:40%          400.00                                       │
//! │    category:T-shirts:10%    60.00                                       │
//! │  final_total              486.00                                        │
//! │                                                                         │
//! │  lines[0]  base 1000.00 → unit 540.00, line total 540.00                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Labels follow `<kind>:<name>:<percent>%` (vouchers: `voucher:<code>`).
//! Amounts for the same label accumulate across cart lines.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Percent;

/// Message attached to every successful calculation.
pub const SUCCESS_MESSAGE: &str = "Discounts applied successfully";

// =============================================================================
// Discount Labels
// =============================================================================

/// Where a discount amount came from. Renders as its breakdown label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountSource<'a> {
    Brand { brand: &'a str, percent: Percent },
    Category { category: &'a str, percent: Percent },
    Voucher { code: &'a str },
    Bank { bank: &'a str, percent: Percent },
}

impl fmt::Display for DiscountSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountSource::Brand { brand, percent } => write!(f, "brand:{}:{}", brand, percent),
            DiscountSource::Category { category, percent } => {
                write!(f, "category:{}:{}", category, percent)
            }
            DiscountSource::Voucher { code } => write!(f, "voucher:{}", code),
            DiscountSource::Bank { bank, percent } => write!(f, "bank:{}:{}", bank, percent),
        }
    }
}

// =============================================================================
// Line Price
// =============================================================================

/// Price of one cart line after brand and category discounts.
///
/// Reported instead of overwriting the caller's product, so the input cart
/// stays untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LinePrice {
    pub product_id: String,
    pub quantity: i64,

    /// List price of one unit.
    #[ts(as = "String")]
    pub base_price: Money,

    /// Unit price after brand and category discounts.
    #[ts(as = "String")]
    pub unit_price: Money,

    /// `unit_price × quantity`.
    #[ts(as = "String")]
    pub line_total: Money,
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Final priced cart with savings itemised per discount source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    /// Sum of base price × quantity over every line.
    #[ts(as = "String")]
    pub original_total: Money,

    /// Amount the customer pays.
    #[ts(as = "String")]
    pub final_total: Money,

    /// Amount attributed to each discount label, sorted by label.
    #[ts(as = "BTreeMap<String, String>")]
    pub applied_discounts: BTreeMap<String, Money>,

    pub message: String,

    /// Per-line prices in cart order.
    pub lines: Vec<LinePrice>,
}

impl PriceBreakdown {
    /// Total amount saved across all discount sources.
    pub fn total_savings(&self) -> Money {
        self.applied_discounts.values().copied().sum()
    }

    /// Amount recorded under a label, if any.
    pub fn discount(&self, label: &str) -> Option<Money> {
        self.applied_discounts.get(label).copied()
    }
}

/// Running label → amount map used while the pipeline walks the cart.
#[derive(Debug, Default)]
pub(crate) struct DiscountLedger {
    entries: BTreeMap<String, Money>,
}

impl DiscountLedger {
    /// Adds `amount` to the entry for `source`, creating it if needed.
    pub(crate) fn record(&mut self, source: DiscountSource<'_>, amount: Money) {
        *self.entries.entry(source.to_string()).or_default() += amount;
    }

    pub(crate) fn into_entries(self) -> BTreeMap<String, Money> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(value: u8) -> Percent {
        Percent::new(value).unwrap()
    }

    #[test]
    fn test_labels() {
        let brand = DiscountSource::Brand { brand: "PUMA", percent: pct(40) };
        let category = DiscountSource::Category { category: "T-shirts", percent: pct(10) };
        let voucher = DiscountSource::Voucher { code: "SUPER69" };
        let bank = DiscountSource::Bank { bank: "ICICI", percent: pct(10) };

        assert_eq!(brand.to_string(), "brand:PUMA:40%");
        assert_eq!(category.to_string(), "category:T-shirts:10%");
        assert_eq!(voucher.to_string(), "voucher:SUPER69");
        assert_eq!(bank.to_string(), "bank:ICICI:10%");
    }

    #[test]
    fn test_ledger_accumulates_same_label() {
        let mut ledger = DiscountLedger::default();
        let source = DiscountSource::Brand { brand: "PUMA", percent: pct(40) };

        ledger.record(source, Money::from_cents(40_000));
        ledger.record(source, Money::from_cents(8_000));

        let entries = ledger.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["brand:PUMA:40%"].cents(), 48_000);
    }

    #[test]
    fn test_total_savings() {
        let mut applied = BTreeMap::new();
        applied.insert("brand:PUMA:40%".to_string(), Money::from_cents(40_000));
        applied.insert("category:T-shirts:10%".to_string(), Money::from_cents(6_000));

        let breakdown = PriceBreakdown {
            original_total: Money::from_cents(100_000),
            final_total: Money::from_cents(54_000),
            applied_discounts: applied,
            message: SUCCESS_MESSAGE.to_string(),
            lines: Vec::new(),
        };

        assert_eq!(breakdown.total_savings().cents(), 46_000);
        assert_eq!(breakdown.discount("brand:PUMA:40%"), Some(Money::from_cents(40_000)));
        assert_eq!(breakdown.discount("voucher:NOPE"), None);
    }
}
