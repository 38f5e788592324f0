//! # Voucher Eligibility
//!
//! One set of rules, used by the standalone code check and by the
//! pipeline's voucher stage alike.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  code ──► provider.voucher(code)                                        │
//! │              │                                                          │
//! │              ├── None ─────────────────────► DISCOUNT_CODE_INVALID      │
//! │              ▼                                                          │
//! │  excluded_brands contains a cart brand? ───► BRAND_EXCLUDED             │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  allowed_categories set and a cart                                      │
//! │  category falls outside it? ───────────────► CATEGORY_RESTRICTED        │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  required tier set and differs? ───────────► CUSTOMER_TIER_REQUIRED     │
//! │              │                                                          │
//! │              ▼                                                          │
//! │           eligible                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Brand and category comparisons ignore case. Each stage scans the whole
//! cart and reports the first violating line in cart order.

use tracing::{debug, warn};

use crate::error::{PricingError, PricingResult};
use crate::provider::ReferenceDataProvider;
use crate::rules::VoucherRule;
use crate::types::{CartLine, CustomerProfile};

/// Resolves `code` and checks it against the cart and customer.
///
/// Returns the resolved rule so the caller can price with it.
pub fn resolve_eligible_voucher<P>(
    provider: &P,
    code: &str,
    lines: &[CartLine],
    customer: &CustomerProfile,
) -> PricingResult<VoucherRule>
where
    P: ReferenceDataProvider + ?Sized,
{
    let Some(voucher) = provider.voucher(code) else {
        warn!(code, "Unknown voucher code");
        return Err(PricingError::DiscountCodeInvalid {
            code: code.to_string(),
        });
    };

    if let Err(err) = check_eligibility(&voucher, lines, customer) {
        warn!(code, customer_id = %customer.id, error = %err, "Voucher rejected");
        return Err(err);
    }

    debug!(code, percent = %voucher.discount_percent, "Voucher eligible");
    Ok(voucher)
}

/// Checks an already-resolved voucher against the cart and customer.
///
/// Pure: no lookups, no side effects.
pub fn check_eligibility(
    voucher: &VoucherRule,
    lines: &[CartLine],
    customer: &CustomerProfile,
) -> PricingResult<()> {
    let excluded = voucher.excluded_brand_list();
    if !excluded.is_empty() {
        if let Some(line) = lines
            .iter()
            .find(|line| excluded.contains(&line.product.brand.to_lowercase()))
        {
            return Err(PricingError::BrandExcluded {
                brand: line.product.brand.clone(),
            });
        }
    }

    let allowed = voucher.allowed_category_list();
    if !allowed.is_empty() {
        if let Some(line) = lines
            .iter()
            .find(|line| !allowed.contains(&line.product.category.to_lowercase()))
        {
            return Err(PricingError::CategoryRestricted {
                category: line.product.category.clone(),
            });
        }
    }

    if let Some(required) = voucher.required_tier() {
        if !required.eq_ignore_ascii_case(customer.tier.as_str()) {
            return Err(PricingError::CustomerTierRequired {
                required: required.to_string(),
                actual: customer.tier.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{BrandTier, CustomerTier, Percent, Product};

    fn line(brand: &str, category: &str) -> CartLine {
        CartLine::new(
            Product {
                id: format!("{}-{}", brand, category),
                brand: brand.to_string(),
                brand_tier: BrandTier::Regular,
                category: category.to_string(),
                base_price: Money::from_cents(100_000),
                current_price: None,
            },
            1,
            "M",
        )
    }

    fn customer(tier: CustomerTier) -> CustomerProfile {
        CustomerProfile {
            id: "c-1".to_string(),
            tier,
        }
    }

    fn voucher() -> VoucherRule {
        VoucherRule::new("TEST", Percent::new(20).unwrap())
    }

    #[test]
    fn test_unrestricted_voucher_is_eligible() {
        let cart = vec![line("PUMA", "T-shirts"), line("Nike", "Shoes")];
        assert!(check_eligibility(&voucher(), &cart, &customer(CustomerTier::Bronze)).is_ok());
    }

    #[test]
    fn test_excluded_brand_names_first_violator() {
        let mut rule = voucher();
        rule.excluded_brands = Some("nike, adidas".to_string());
        let cart = vec![
            line("PUMA", "T-shirts"),
            line("Adidas", "Shoes"),
            line("NIKE", "Shoes"),
        ];

        let err = check_eligibility(&rule, &cart, &customer(CustomerTier::Gold)).unwrap_err();
        assert_eq!(
            err,
            PricingError::BrandExcluded {
                brand: "Adidas".to_string()
            }
        );
    }

    #[test]
    fn test_allowed_categories_reject_outsiders() {
        let mut rule = voucher();
        rule.allowed_categories = Some("Shoes".to_string());

        let only_shoes = vec![line("Nike", "shoes")];
        assert!(check_eligibility(&rule, &only_shoes, &customer(CustomerTier::Gold)).is_ok());

        let mixed = vec![line("Nike", "Shoes"), line("PUMA", "T-shirts")];
        let err = check_eligibility(&rule, &mixed, &customer(CustomerTier::Gold)).unwrap_err();
        assert_eq!(
            err,
            PricingError::CategoryRestricted {
                category: "T-shirts".to_string()
            }
        );
    }

    #[test]
    fn test_required_tier() {
        let mut rule = voucher();
        rule.required_customer_tier = Some("GOLD".to_string());
        let cart = vec![line("PUMA", "T-shirts")];

        assert!(check_eligibility(&rule, &cart, &customer(CustomerTier::Gold)).is_ok());

        let err = check_eligibility(&rule, &cart, &customer(CustomerTier::Silver)).unwrap_err();
        assert_eq!(
            err,
            PricingError::CustomerTierRequired {
                required: "GOLD".to_string(),
                actual: "silver".to_string()
            }
        );
    }

    #[test]
    fn test_brand_checked_before_category_and_tier() {
        let mut rule = voucher();
        rule.excluded_brands = Some("puma".to_string());
        rule.allowed_categories = Some("shoes".to_string());
        rule.required_customer_tier = Some("gold".to_string());
        let cart = vec![line("PUMA", "T-shirts")];

        let err = check_eligibility(&rule, &cart, &customer(CustomerTier::Silver)).unwrap_err();
        assert!(matches!(err, PricingError::BrandExcluded { .. }));
    }

    #[test]
    fn test_empty_cart_only_checks_tier() {
        let mut rule = voucher();
        rule.excluded_brands = Some("puma".to_string());
        rule.allowed_categories = Some("shoes".to_string());
        assert!(check_eligibility(&rule, &[], &customer(CustomerTier::Silver)).is_ok());

        rule.required_customer_tier = Some("gold".to_string());
        assert!(check_eligibility(&rule, &[], &customer(CustomerTier::Silver)).is_err());
    }
}
