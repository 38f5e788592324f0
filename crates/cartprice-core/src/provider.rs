//! # Reference Data Provider
//!
//! The seam between the pure pipeline and wherever discount tables live.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  PricingPipeline<P> ──► P: ReferenceDataProvider                       │
//! │                              │                                          │
//! │            ┌─────────────────┼──────────────────────┐                   │
//! │            ▼                 ▼                      ▼                   │
//! │   InMemoryReferenceData  CachedProvider<P>   (any other store)          │
//! │   (cartprice-refdata)    TTL per table                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline never reaches for a process-wide table or cache; it only
//! sees this trait. Implementations must be safe to share between threads
//! because many calculations may run at once against one provider.

use std::sync::Arc;

use crate::rules::{BankOfferRule, VoucherRule};
use crate::types::Percent;

/// Read-only access to discount reference data.
pub trait ReferenceDataProvider: Send + Sync {
    /// Percent off for a brand, zero when no rule exists.
    ///
    /// Lookup is case-insensitive.
    fn brand_discount_percent(&self, brand: &str) -> Percent;

    /// Percent off for a category, zero when no rule exists.
    ///
    /// Lookup is case-insensitive.
    fn category_discount_percent(&self, category: &str) -> Percent;

    /// All offers stored for this exact (bank, payment method) pair.
    fn bank_offers(&self, bank_name: &str, payment_method: &str) -> Vec<BankOfferRule>;

    /// The voucher with this exact code, if any.
    fn voucher(&self, code: &str) -> Option<VoucherRule>;
}

impl<P: ReferenceDataProvider + ?Sized> ReferenceDataProvider for &P {
    fn brand_discount_percent(&self, brand: &str) -> Percent {
        (**self).brand_discount_percent(brand)
    }

    fn category_discount_percent(&self, category: &str) -> Percent {
        (**self).category_discount_percent(category)
    }

    fn bank_offers(&self, bank_name: &str, payment_method: &str) -> Vec<BankOfferRule> {
        (**self).bank_offers(bank_name, payment_method)
    }

    fn voucher(&self, code: &str) -> Option<VoucherRule> {
        (**self).voucher(code)
    }
}

impl<P: ReferenceDataProvider + ?Sized> ReferenceDataProvider for Arc<P> {
    fn brand_discount_percent(&self, brand: &str) -> Percent {
        (**self).brand_discount_percent(brand)
    }

    fn category_discount_percent(&self, category: &str) -> Percent {
        (**self).category_discount_percent(category)
    }

    fn bank_offers(&self, bank_name: &str, payment_method: &str) -> Vec<BankOfferRule> {
        (**self).bank_offers(bank_name, payment_method)
    }

    fn voucher(&self, code: &str) -> Option<VoucherRule> {
        (**self).voucher(code)
    }
}
