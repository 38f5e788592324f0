//! # Reference Data Rules
//!
//! Rows of the four reference tables the pipeline reads.
//!
//! ```text
//! ┌──────────────────────┬────────────────────────────────┬──────────────────┐
//! │ Table                │ Key                            │ Multiplicity     │
//! ├──────────────────────┼────────────────────────────────┼──────────────────┤
//! │ brand_discounts      │ brand (case-insensitive)       │ one per brand    │
//! │ category_discounts   │ category (case-insensitive)    │ one per category │
//! │ bank_offers          │ (bank, method) + card_type?    │ many, stacking   │
//! │ vouchers             │ code (exact)                   │ one per code     │
//! └──────────────────────┴────────────────────────────────┴──────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Percent;

/// Percentage off every product of a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BrandDiscountRule {
    pub brand: String,
    pub discount_percent: Percent,
}

/// Percentage off every product of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryDiscountRule {
    pub category: String,
    pub discount_percent: Percent,
}

/// Percentage off the payable amount when paying through a bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BankOfferRule {
    pub bank_name: String,

    /// `CARD`, `UPI`, ... matched exactly.
    pub payment_method: String,

    /// When set, payments naming a different card type are excluded.
    #[serde(default)]
    pub card_type: Option<String>,

    pub discount_percent: Percent,
}

impl BankOfferRule {
    /// Whether this offer applies to a payment with the given card type.
    ///
    /// The offer is skipped only when both sides name a card type and the
    /// two differ (ignoring case).
    pub fn applies_to_card(&self, card_type: Option<&str>) -> bool {
        match (self.card_type.as_deref(), card_type) {
            (Some(required), Some(given)) => required.eq_ignore_ascii_case(given),
            _ => true,
        }
    }
}

/// A code-activated discount with optional eligibility constraints.
///
/// List constraints are stored as comma-separated text, the way the
/// voucher table keeps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoucherRule {
    pub code: String,
    pub discount_percent: Percent,

    /// CSV of brands the voucher never applies to.
    #[serde(default)]
    pub excluded_brands: Option<String>,

    /// CSV of categories; when non-empty the cart may contain only these.
    #[serde(default)]
    pub allowed_categories: Option<String>,

    /// Tier the customer must hold (`gold`, `silver`, `bronze`).
    #[serde(default)]
    pub required_customer_tier: Option<String>,
}

impl VoucherRule {
    /// Creates an unrestricted voucher.
    pub fn new(code: impl Into<String>, discount_percent: Percent) -> Self {
        VoucherRule {
            code: code.into(),
            discount_percent,
            excluded_brands: None,
            allowed_categories: None,
            required_customer_tier: None,
        }
    }

    /// Excluded brands, trimmed and lowercased.
    pub fn excluded_brand_list(&self) -> Vec<String> {
        split_csv(self.excluded_brands.as_deref())
    }

    /// Allowed categories, trimmed and lowercased. Empty means "all".
    pub fn allowed_category_list(&self) -> Vec<String> {
        split_csv(self.allowed_categories.as_deref())
    }

    /// Required tier, if one is set and not blank.
    pub fn required_tier(&self) -> Option<&str> {
        self.required_customer_tier
            .as_deref()
            .map(str::trim)
            .filter(|tier| !tier.is_empty())
    }
}

/// Splits a CSV column into lowercase entries, dropping blanks.
fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_lowercase)
        .collect()
}
