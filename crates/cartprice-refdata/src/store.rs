//! # In-Memory Reference Data
//!
//! Rule tables held in hash maps, keyed the way the pipeline looks them up.
//!
//! ## Keys
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │ Table                │ Map key                                          │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │ brand_discounts      │ brand.to_lowercase()                             │
//! │ category_discounts   │ category.to_lowercase()                          │
//! │ bank_offers          │ (bank_name, payment_method), exact, many rows    │
//! │ vouchers             │ code, exact                                      │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Format
//! ```json
//! {
//!   "brand_discounts":    [{ "brand": "PUMA", "discount_percent": 40 }],
//!   "category_discounts": [{ "category": "T-shirts", "discount_percent": 10 }],
//!   "bank_offers": [{
//!     "bank_name": "ICICI", "payment_method": "CARD",
//!     "card_type": "CREDIT", "discount_percent": 10
//!   }],
//!   "vouchers": [{ "code": "SUPER69", "discount_percent": 69 }]
//! }
//! ```
//!
//! Every table is optional in the file; a missing table is empty.

use std::collections::HashMap;
use std::path::Path;

use cartprice_core::{
    BankOfferRule, BrandDiscountRule, CategoryDiscountRule, CustomerTier, Percent,
    ReferenceDataProvider, VoucherRule,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{RefDataError, RefDataResult};

// =============================================================================
// Snapshot
// =============================================================================

/// Serialized form of all four tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceDataSnapshot {
    pub brand_discounts: Vec<BrandDiscountRule>,
    pub category_discounts: Vec<CategoryDiscountRule>,
    pub bank_offers: Vec<BankOfferRule>,
    pub vouchers: Vec<VoucherRule>,
}

impl ReferenceDataSnapshot {
    /// Parses a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> RefDataResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Reference tables in memory.
///
/// Built once, then read concurrently; it has no interior mutability.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceData {
    brands: HashMap<String, BrandDiscountRule>,
    categories: HashMap<String, CategoryDiscountRule>,
    bank_offers: HashMap<(String, String), Vec<BankOfferRule>>,
    vouchers: HashMap<String, VoucherRule>,
}

impl InMemoryReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the tables from a snapshot, enforcing key uniqueness.
    pub fn from_snapshot(snapshot: ReferenceDataSnapshot) -> RefDataResult<Self> {
        let mut data = Self::new();

        for rule in snapshot.brand_discounts {
            data.insert_brand_rule(rule)?;
        }
        for rule in snapshot.category_discounts {
            data.insert_category_rule(rule)?;
        }
        for rule in snapshot.bank_offers {
            data.insert_bank_offer(rule)?;
        }
        for rule in snapshot.vouchers {
            data.insert_voucher(rule)?;
        }

        Ok(data)
    }

    /// Parses and builds from JSON text.
    pub fn from_json_str(json: &str) -> RefDataResult<Self> {
        Self::from_snapshot(ReferenceDataSnapshot::from_json_str(json)?)
    }

    /// Reads a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>) -> RefDataResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RefDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let data = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            brands = data.brands.len(),
            categories = data.categories.len(),
            bank_offers = data.bank_offer_count(),
            vouchers = data.vouchers.len(),
            "Reference data loaded"
        );
        Ok(data)
    }

    /// Current tables as a snapshot (rows sorted by key).
    pub fn snapshot(&self) -> ReferenceDataSnapshot {
        let mut brand_discounts: Vec<_> = self.brands.values().cloned().collect();
        brand_discounts.sort_by(|a, b| a.brand.cmp(&b.brand));

        let mut category_discounts: Vec<_> = self.categories.values().cloned().collect();
        category_discounts.sort_by(|a, b| a.category.cmp(&b.category));

        let mut keys: Vec<_> = self.bank_offers.keys().collect();
        keys.sort();
        let bank_offers = keys
            .into_iter()
            .flat_map(|key| self.bank_offers[key].iter().cloned())
            .collect();

        let mut vouchers: Vec<_> = self.vouchers.values().cloned().collect();
        vouchers.sort_by(|a, b| a.code.cmp(&b.code));

        ReferenceDataSnapshot {
            brand_discounts,
            category_discounts,
            bank_offers,
            vouchers,
        }
    }

    // =========================================================================
    // Inserts
    // =========================================================================

    /// Adds a brand rule. Brands are unique ignoring case.
    pub fn insert_brand_rule(&mut self, rule: BrandDiscountRule) -> RefDataResult<()> {
        let key = normalized_key("brand", &rule.brand)?;
        if self.brands.contains_key(&key) {
            return Err(RefDataError::duplicate("brand", rule.brand));
        }
        self.brands.insert(key, rule);
        Ok(())
    }

    /// Adds a category rule. Categories are unique ignoring case.
    pub fn insert_category_rule(&mut self, rule: CategoryDiscountRule) -> RefDataResult<()> {
        let key = normalized_key("category", &rule.category)?;
        if self.categories.contains_key(&key) {
            return Err(RefDataError::duplicate("category", rule.category));
        }
        self.categories.insert(key, rule);
        Ok(())
    }

    /// Adds a bank offer. Several offers may share a (bank, method) pair.
    pub fn insert_bank_offer(&mut self, rule: BankOfferRule) -> RefDataResult<()> {
        if rule.bank_name.trim().is_empty() {
            return Err(RefDataError::invalid("bank offer", "bank_name must not be blank"));
        }
        if rule.payment_method.trim().is_empty() {
            return Err(RefDataError::invalid(
                "bank offer",
                "payment_method must not be blank",
            ));
        }

        let key = (rule.bank_name.clone(), rule.payment_method.clone());
        self.bank_offers.entry(key).or_default().push(rule);
        Ok(())
    }

    /// Adds a voucher. Codes are unique and case-sensitive.
    pub fn insert_voucher(&mut self, rule: VoucherRule) -> RefDataResult<()> {
        if rule.code.trim().is_empty() {
            return Err(RefDataError::invalid("voucher", "code must not be blank"));
        }
        if let Some(tier) = rule.required_tier() {
            tier.parse::<CustomerTier>().map_err(|_| {
                RefDataError::invalid(
                    "voucher",
                    format!("{}: unknown required_customer_tier '{}'", rule.code, tier),
                )
            })?;
        }
        if self.vouchers.contains_key(&rule.code) {
            return Err(RefDataError::duplicate("voucher", rule.code));
        }
        self.vouchers.insert(rule.code.clone(), rule);
        Ok(())
    }

    /// Removes a voucher, returning it if it existed.
    pub fn remove_voucher(&mut self, code: &str) -> Option<VoucherRule> {
        self.vouchers.remove(code)
    }

    fn bank_offer_count(&self) -> usize {
        self.bank_offers.values().map(Vec::len).sum()
    }
}

fn normalized_key(table: &'static str, name: &str) -> RefDataResult<String> {
    if name.trim().is_empty() {
        return Err(RefDataError::invalid(table, format!("{} must not be blank", table)));
    }
    Ok(name.to_lowercase())
}

impl ReferenceDataProvider for InMemoryReferenceData {
    fn brand_discount_percent(&self, brand: &str) -> Percent {
        self.brands
            .get(&brand.to_lowercase())
            .map(|rule| rule.discount_percent)
            .unwrap_or_default()
    }

    fn category_discount_percent(&self, category: &str) -> Percent {
        self.categories
            .get(&category.to_lowercase())
            .map(|rule| rule.discount_percent)
            .unwrap_or_default()
    }

    fn bank_offers(&self, bank_name: &str, payment_method: &str) -> Vec<BankOfferRule> {
        self.bank_offers
            .get(&(bank_name.to_string(), payment_method.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn voucher(&self, code: &str) -> Option<VoucherRule> {
        self.vouchers.get(code).cloned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "brand_discounts": [{ "brand": "PUMA", "discount_percent": 40 }],
        "category_discounts": [{ "category": "T-shirts", "discount_percent": 10 }],
        "bank_offers": [
            { "bank_name": "ICICI", "payment_method": "CARD", "card_type": "CREDIT", "discount_percent": 10 },
            { "bank_name": "ICICI", "payment_method": "CARD", "discount_percent": 5 }
        ],
        "vouchers": [{ "code": "SUPER69", "discount_percent": 69 }]
    }"#;

    fn pct(value: u8) -> Percent {
        Percent::new(value).unwrap()
    }

    #[test]
    fn test_lookups_from_snapshot() {
        let data = InMemoryReferenceData::from_json_str(SNAPSHOT).unwrap();

        assert_eq!(data.brand_discount_percent("puma"), pct(40));
        assert_eq!(data.brand_discount_percent("Nike"), Percent::zero());
        assert_eq!(data.category_discount_percent("T-SHIRTS"), pct(10));
        assert_eq!(data.bank_offers("ICICI", "CARD").len(), 2);
        assert!(data.bank_offers("icici", "CARD").is_empty());
        assert!(data.bank_offers("ICICI", "UPI").is_empty());
        assert!(data.voucher("SUPER69").is_some());
        assert!(data.voucher("super69").is_none());
    }

    #[test]
    fn test_lookup_keys_are_not_trimmed() {
        let data = InMemoryReferenceData::from_json_str(SNAPSHOT).unwrap();

        assert_eq!(data.brand_discount_percent(" PUMA"), Percent::zero());
        assert_eq!(data.category_discount_percent("T-shirts "), Percent::zero());
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let data = InMemoryReferenceData::from_json_str("{}").unwrap();
        assert_eq!(data.brand_discount_percent("PUMA"), Percent::zero());
        assert!(data.voucher("SUPER69").is_none());
    }

    #[test]
    fn test_duplicate_brand_ignoring_case() {
        let mut data = InMemoryReferenceData::new();
        data.insert_brand_rule(BrandDiscountRule {
            brand: "PUMA".to_string(),
            discount_percent: pct(40),
        })
        .unwrap();

        let err = data
            .insert_brand_rule(BrandDiscountRule {
                brand: "puma".to_string(),
                discount_percent: pct(10),
            })
            .unwrap_err();
        assert!(matches!(err, RefDataError::DuplicateRule { table: "brand", .. }));
    }

    #[test]
    fn test_duplicate_voucher_code() {
        let mut data = InMemoryReferenceData::new();
        data.insert_voucher(VoucherRule::new("SUPER69", pct(69))).unwrap();
        let err = data.insert_voucher(VoucherRule::new("SUPER69", pct(10))).unwrap_err();
        assert!(matches!(err, RefDataError::DuplicateRule { table: "voucher", .. }));

        // Codes are case-sensitive.
        assert!(data.insert_voucher(VoucherRule::new("super69", pct(10))).is_ok());
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let mut data = InMemoryReferenceData::new();
        assert!(data.insert_voucher(VoucherRule::new("  ", pct(10))).is_err());

        let mut platinum = VoucherRule::new("PLAT", pct(10));
        platinum.required_customer_tier = Some("platinum".to_string());
        assert!(matches!(
            data.insert_voucher(platinum),
            Err(RefDataError::InvalidRule { table: "voucher", .. })
        ));

        let blank_bank = BankOfferRule {
            bank_name: String::new(),
            payment_method: "CARD".to_string(),
            card_type: None,
            discount_percent: pct(5),
        };
        assert!(data.insert_bank_offer(blank_bank).is_err());
    }

    #[test]
    fn test_percent_out_of_range_is_parse_error() {
        let json = r#"{ "brand_discounts": [{ "brand": "PUMA", "discount_percent": 140 }] }"#;
        let err = InMemoryReferenceData::from_json_str(json).unwrap_err();
        assert!(matches!(err, RefDataError::Parse(_)));
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let mut data = InMemoryReferenceData::from_json_str(SNAPSHOT).unwrap();
        data.insert_voucher(VoucherRule::new("A10", pct(10))).unwrap();

        let snapshot = data.snapshot();
        let codes: Vec<_> = snapshot.vouchers.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, vec!["A10", "SUPER69"]);
        assert_eq!(snapshot.bank_offers.len(), 2);
    }

    #[test]
    fn test_remove_voucher() {
        let mut data = InMemoryReferenceData::from_json_str(SNAPSHOT).unwrap();
        assert!(data.remove_voucher("SUPER69").is_some());
        assert!(data.voucher("SUPER69").is_none());
    }
}
