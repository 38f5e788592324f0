//! # Pricing Pipeline
//!
//! Applies the discount stages to a cart in a fixed order.
//!
//! ## Stage Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  for each line (cart order)                                             │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  unit = base_price                                               │  │
//! │  │  unit -= round2(unit × brand%)        label brand:<b>:<p>%       │  │
//! │  │  unit -= round2(unit × category%)     label category:<c>:<p>%    │  │
//! │  │  subtotal += unit × quantity                                     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  voucher = round2(subtotal × voucher%)        label voucher:<code>     │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  for each matching bank offer                                           │
//! │      bank += round2((subtotal − voucher) × offer%)                      │
//! │                                               label bank:<bank>:<p>%   │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  final = max(subtotal − voucher − bank, 0)                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each discount amount is rounded to the cent before it is multiplied by a
//! quantity or added to a total. A stage whose percent is zero records
//! nothing. Stacked bank offers are recorded in full even when together they
//! exceed what is payable; only the final total stops at zero.
//!
//! ## Example
//! ```rust
//! use cartprice_core::{
//!     BankOfferRule, BrandTier, CartLine, CustomerProfile, CustomerTier, Money, Percent,
//!     PricingPipeline, Product, ReferenceDataProvider, VoucherRule,
//! };
//!
//! struct PumaSale;
//!
//! impl ReferenceDataProvider for PumaSale {
//!     fn brand_discount_percent(&self, brand: &str) -> Percent {
//!         if brand.eq_ignore_ascii_case("puma") { Percent::new(40).unwrap() } else { Percent::zero() }
//!     }
//!     fn category_discount_percent(&self, _category: &str) -> Percent { Percent::zero() }
//!     fn bank_offers(&self, _bank: &str, _method: &str) -> Vec<BankOfferRule> { Vec::new() }
//!     fn voucher(&self, _code: &str) -> Option<VoucherRule> { None }
//! }
//!
//! let line = CartLine::new(
//!     Product {
//!         id: "sku-1".into(),
//!         brand: "PUMA".into(),
//!         brand_tier: BrandTier::Regular,
//!         category: "T-shirts".into(),
//!         base_price: Money::from_cents(100_000),
//!         current_price: None,
//!     },
//!     1,
//!     "M",
//! );
//! let customer = CustomerProfile { id: "c-1".into(), tier: CustomerTier::Gold };
//!
//! let pipeline = PricingPipeline::new(PumaSale);
//! let breakdown = pipeline
//!     .calculate_cart_discounts(&[line], &customer, None, None)
//!     .unwrap();
//! assert_eq!(breakdown.final_total.to_string(), "600.00");
//! ```

use tracing::{debug, info};

use crate::breakdown::{
    DiscountLedger, DiscountSource, LinePrice, PriceBreakdown, SUCCESS_MESSAGE,
};
use crate::error::{PricingResult, ValidationError};
use crate::money::Money;
use crate::provider::ReferenceDataProvider;
use crate::requests::{CalculateRequest, ValidateCodeRequest, ValidateCodeResponse};
use crate::types::{CartLine, CustomerProfile, PaymentInfo};
use crate::validation::validate_cart;
use crate::voucher::resolve_eligible_voucher;

/// The discount pipeline, bound to one reference-data provider.
///
/// Holds no mutable state; share it freely between threads when the
/// provider allows.
#[derive(Debug, Clone)]
pub struct PricingPipeline<P> {
    provider: P,
}

impl<P: ReferenceDataProvider> PricingPipeline<P> {
    pub fn new(provider: P) -> Self {
        PricingPipeline { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Prices a cart.
    ///
    /// Lines are validated up front. A voucher that fails its eligibility
    /// check aborts the whole calculation with that error.
    pub fn calculate_cart_discounts(
        &self,
        lines: &[CartLine],
        customer: &CustomerProfile,
        payment: Option<&PaymentInfo>,
        voucher_code: Option<&str>,
    ) -> PricingResult<PriceBreakdown> {
        validate_cart(lines)?;

        let mut ledger = DiscountLedger::default();
        let mut original_total = Money::zero();
        let mut subtotal = Money::zero();
        let mut priced_lines = Vec::with_capacity(lines.len());

        for line in lines {
            original_total = add_to_total(original_total, line.base_total())?;
            let priced = self.price_line(line, &mut ledger);
            subtotal = add_to_total(subtotal, priced.line_total)?;
            priced_lines.push(priced);
        }

        let voucher_discount = match voucher_code {
            Some(code) => self.apply_voucher(code, lines, customer, subtotal, &mut ledger)?,
            None => Money::zero(),
        };

        let bank_discount = match payment {
            Some(payment) => {
                self.apply_bank_offers(payment, subtotal - voucher_discount, &mut ledger)?
            }
            None => Money::zero(),
        };

        let final_total = (subtotal - voucher_discount - bank_discount).max(Money::zero());

        info!(
            customer_id = %customer.id,
            lines = lines.len(),
            original_total = %original_total,
            final_total = %final_total,
            "Cart priced"
        );

        Ok(PriceBreakdown {
            original_total,
            final_total,
            applied_discounts: ledger.into_entries(),
            message: SUCCESS_MESSAGE.to_string(),
            lines: priced_lines,
        })
    }

    /// Checks whether `code` can be used for this cart and customer.
    ///
    /// Runs the same rules as the voucher stage of
    /// [`calculate_cart_discounts`](Self::calculate_cart_discounts).
    /// Returns `Ok(true)` when eligible; every refusal is an error.
    pub fn validate_discount_code(
        &self,
        code: &str,
        lines: &[CartLine],
        customer: &CustomerProfile,
    ) -> PricingResult<bool> {
        resolve_eligible_voucher(&self.provider, code, lines, customer)?;
        Ok(true)
    }

    /// [`calculate_cart_discounts`](Self::calculate_cart_discounts) over a request DTO.
    pub fn calculate(&self, request: &CalculateRequest) -> PricingResult<PriceBreakdown> {
        self.calculate_cart_discounts(
            &request.cart_items,
            &request.customer,
            request.payment_info.as_ref(),
            request.voucher_code.as_deref(),
        )
    }

    /// [`validate_discount_code`](Self::validate_discount_code) over a request DTO.
    pub fn validate_code(
        &self,
        request: &ValidateCodeRequest,
    ) -> PricingResult<ValidateCodeResponse> {
        let valid =
            self.validate_discount_code(&request.code, &request.cart_items, &request.customer)?;
        Ok(ValidateCodeResponse { valid })
    }

    // =========================================================================
    // Stages
    // =========================================================================

    /// Brand then category discount on one line.
    fn price_line(&self, line: &CartLine, ledger: &mut DiscountLedger) -> LinePrice {
        let product = &line.product;
        let mut unit = product.base_price;

        let brand_pct = self.provider.brand_discount_percent(&product.brand);
        if !brand_pct.is_zero() {
            let off = unit.percent_of(brand_pct);
            unit -= off;
            let source = DiscountSource::Brand {
                brand: &product.brand,
                percent: brand_pct,
            };
            ledger.record(source, off * line.quantity);
            debug!(product_id = %product.id, label = %source, unit_off = %off, "Brand discount");
        }

        let category_pct = self.provider.category_discount_percent(&product.category);
        if !category_pct.is_zero() {
            let off = unit.percent_of(category_pct);
            unit -= off;
            let source = DiscountSource::Category {
                category: &product.category,
                percent: category_pct,
            };
            ledger.record(source, off * line.quantity);
            debug!(product_id = %product.id, label = %source, unit_off = %off, "Category discount");
        }

        LinePrice {
            product_id: product.id.clone(),
            quantity: line.quantity,
            base_price: product.base_price,
            unit_price: unit,
            line_total: unit * line.quantity,
        }
    }

    fn apply_voucher(
        &self,
        code: &str,
        lines: &[CartLine],
        customer: &CustomerProfile,
        subtotal: Money,
        ledger: &mut DiscountLedger,
    ) -> PricingResult<Money> {
        let voucher = resolve_eligible_voucher(&self.provider, code, lines, customer)?;
        if voucher.discount_percent.is_zero() {
            return Ok(Money::zero());
        }

        let off = subtotal.percent_of(voucher.discount_percent);
        let source = DiscountSource::Voucher { code: &voucher.code };
        ledger.record(source, off);
        debug!(label = %source, amount = %off, "Voucher discount");
        Ok(off)
    }

    /// Sums every qualifying offer, each taken from the same payable amount.
    fn apply_bank_offers(
        &self,
        payment: &PaymentInfo,
        payable: Money,
        ledger: &mut DiscountLedger,
    ) -> PricingResult<Money> {
        let Some(bank_name) = payment.bank_name.as_deref() else {
            return Ok(Money::zero());
        };

        let offers = self.provider.bank_offers(bank_name, &payment.method);
        let mut total = Money::zero();

        for offer in offers
            .iter()
            .filter(|offer| offer.applies_to_card(payment.card_type.as_deref()))
            .filter(|offer| !offer.discount_percent.is_zero())
        {
            let off = payable.percent_of(offer.discount_percent);
            total = add_to_total(total, off)?;

            let source = DiscountSource::Bank {
                bank: &offer.bank_name,
                percent: offer.discount_percent,
            };
            ledger.record(source, off);
            debug!(label = %source, amount = %off, "Bank offer");
        }

        Ok(total)
    }
}

fn add_to_total(total: Money, amount: Money) -> PricingResult<Money> {
    total.checked_add(amount).ok_or_else(|| {
        ValidationError::OutOfRange {
            field: "cart_items".to_string(),
            min: 0,
            max: i64::MAX,
        }
        .into()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
