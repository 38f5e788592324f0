//! # Cached Provider
//!
//! Puts a [`TtlCache`] in front of each table of another provider.
//!
//! ## Cache Policy
//! ```text
//! ┌──────────────────────┬──────────────────────────────┬──────────────────┐
//! │ Lookup               │ Cache key                    │ TTL              │
//! ├──────────────────────┼──────────────────────────────┼──────────────────┤
//! │ brand percent        │ brand, lowercased            │ rules_ttl        │
//! │ category percent     │ category, lowercased         │ rules_ttl        │
//! │ bank offers          │ (bank, method), exact        │ rules_ttl        │
//! │ voucher              │ code, exact                  │ Disabled or Ttl  │
//! └──────────────────────┴──────────────────────────────┴──────────────────┘
//! ```
//!
//! Brand, category and bank tables change rarely, so serving them a few
//! minutes stale is fine. Vouchers are created and expired by marketing and
//! go straight to the inner provider unless a voucher TTL is configured.
//! Absent vouchers are cached too when voucher caching is on.

use std::time::Duration;

use cartprice_core::{BankOfferRule, Percent, ReferenceDataProvider, VoucherRule};
use tracing::trace;

use crate::cache::TtlCache;

/// Default lifetime of cached brand/category/bank entries.
pub const DEFAULT_RULES_TTL: Duration = Duration::from_secs(300);

/// Whether voucher lookups are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoucherCachePolicy {
    /// Every lookup reaches the inner provider.
    #[default]
    Disabled,
    /// Cache voucher lookups for this long.
    Ttl(Duration),
}

/// TTLs for a [`CachedProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub rules_ttl: Duration,
    pub vouchers: VoucherCachePolicy,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy {
            rules_ttl: DEFAULT_RULES_TTL,
            vouchers: VoucherCachePolicy::Disabled,
        }
    }
}

/// A provider that caches another provider's answers.
#[derive(Debug)]
pub struct CachedProvider<P> {
    inner: P,
    policy: CachePolicy,
    brands: TtlCache<String, Percent>,
    categories: TtlCache<String, Percent>,
    bank_offers: TtlCache<(String, String), Vec<BankOfferRule>>,
    vouchers: Option<TtlCache<String, Option<VoucherRule>>>,
}

impl<P: ReferenceDataProvider> CachedProvider<P> {
    pub fn new(inner: P, policy: CachePolicy) -> Self {
        let vouchers = match policy.vouchers {
            VoucherCachePolicy::Disabled => None,
            VoucherCachePolicy::Ttl(ttl) => Some(TtlCache::new(ttl)),
        };

        CachedProvider {
            inner,
            policy,
            brands: TtlCache::new(policy.rules_ttl),
            categories: TtlCache::new(policy.rules_ttl),
            bank_offers: TtlCache::new(policy.rules_ttl),
            vouchers,
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Forgets one cached voucher, e.g. after it was created or expired.
    pub fn invalidate_voucher(&self, code: &str) {
        if let Some(vouchers) = &self.vouchers {
            vouchers.invalidate(&code.to_string());
        }
    }

    /// Forgets everything.
    pub fn clear(&self) {
        self.brands.clear();
        self.categories.clear();
        self.bank_offers.clear();
        if let Some(vouchers) = &self.vouchers {
            vouchers.clear();
        }
    }
}

impl<P: ReferenceDataProvider> ReferenceDataProvider for CachedProvider<P> {
    fn brand_discount_percent(&self, brand: &str) -> Percent {
        self.brands.get_or_insert_with(brand.to_lowercase(), || {
            trace!(brand, "Brand cache miss");
            self.inner.brand_discount_percent(brand)
        })
    }

    fn category_discount_percent(&self, category: &str) -> Percent {
        self.categories.get_or_insert_with(category.to_lowercase(), || {
            trace!(category, "Category cache miss");
            self.inner.category_discount_percent(category)
        })
    }

    fn bank_offers(&self, bank_name: &str, payment_method: &str) -> Vec<BankOfferRule> {
        let key = (bank_name.to_string(), payment_method.to_string());
        self.bank_offers.get_or_insert_with(key, || {
            trace!(bank_name, payment_method, "Bank offer cache miss");
            self.inner.bank_offers(bank_name, payment_method)
        })
    }

    fn voucher(&self, code: &str) -> Option<VoucherRule> {
        match &self.vouchers {
            Some(vouchers) => vouchers.get_or_insert_with(code.to_string(), || {
                trace!(code, "Voucher cache miss");
                self.inner.voucher(code)
            }),
            None => self.inner.voucher(code),
        }
    }
}
