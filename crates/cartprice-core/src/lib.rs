//! # cartprice-core: Cart Discount Pricing
//!
//! This crate is the **heart** of cartprice. It prices a shopping cart by
//! applying brand, category, voucher and bank-offer discounts in a fixed
//! order, and checks voucher eligibility. Everything here is pure: reference
//! data arrives through the [`ReferenceDataProvider`] trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        cartprice Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    cartprice CLI (apps/cli)                     │   │
//! │  │      config ──► load snapshot ──► calculate / validate ──► JSON │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ cartprice-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ pipeline  │  │  voucher  │  │   │
//! │  │   │ CartLine  │  │   Money   │  │  stages   │  │eligibility│  │   │
//! │  │   │  Percent  │  │ percent_of│  │ breakdown │  │   check   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ReferenceDataProvider                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 cartprice-refdata (Reference Data)              │   │
//! │  │          in-memory tables, JSON snapshots, TTL caching          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart-side types (Product, CartLine, CustomerProfile, Percent)
//! - [`money`] - Money type with integer arithmetic and half-up percentages
//! - [`rules`] - Reference-data rows (brand, category, bank offer, voucher)
//! - [`provider`] - The reference-data seam
//! - [`pipeline`] - The discount stages
//! - [`voucher`] - Voucher eligibility check
//! - [`breakdown`] - Pipeline output
//! - [`requests`] - Transport DTOs
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same cart + same reference data = same breakdown
//! 2. **No Hidden State**: the provider is injected, never a process global
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: every refusal is a typed [`PricingError`]
//!
//! ## Example Usage
//!
//! ```rust
//! use cartprice_core::money::Money;
//! use cartprice_core::types::Percent;
//!
//! let price = Money::from_cents(100_000); // 1000.00
//! let off = price.percent_of(Percent::new(40).unwrap());
//! assert_eq!(off.to_string(), "400.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod breakdown;
pub mod error;
pub mod money;
pub mod pipeline;
pub mod provider;
pub mod requests;
pub mod rules;
pub mod types;
pub mod validation;
pub mod voucher;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cartprice_core::Money` instead of
// `use cartprice_core::money::Money`

pub use breakdown::{LinePrice, PriceBreakdown};
pub use error::{ErrorCode, ErrorResponse, PricingError, PricingResult, ValidationError};
pub use money::Money;
pub use pipeline::PricingPipeline;
pub use provider::ReferenceDataProvider;
pub use requests::{CalculateRequest, ValidateCodeRequest, ValidateCodeResponse};
pub use rules::{BankOfferRule, BrandDiscountRule, CategoryDiscountRule, VoucherRule};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single cart line. Catches typos (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum base price of a product, in cents (1,000,000,000.00).
///
/// `MAX_UNIT_PRICE_CENTS × MAX_ITEM_QUANTITY` stays below 10^14, so a line
/// total always fits in an i64. Cart totals are summed with overflow checks.
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000_000;
