//! # cartprice-refdata: Reference Data for Cartprice
//!
//! Implementations of [`ReferenceDataProvider`](cartprice_core::ReferenceDataProvider)
//! for the pricing pipeline.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Reference Data Flow                                │
//! │                                                                         │
//! │  PricingPipeline (cartprice-core)                                      │
//! │       │  brand% / category% / bank offers / voucher                     │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               cartprice-refdata (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CachedProvider│    │   TtlCache    │    │ CacheSettings│  │   │
//! │  │   │ (cached.rs)   │───►│  (cache.rs)   │    │ (settings.rs)│  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │ miss                                                │   │
//! │  │           ▼                                                     │   │
//! │  │   ┌───────────────────────┐                                     │   │
//! │  │   │ InMemoryReferenceData │ ◄── reference-data.json             │   │
//! │  │   │ (store.rs)            │                                     │   │
//! │  │   └───────────────────────┘                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - In-memory tables and JSON snapshots
//! - [`cache`] - Generic TTL cache
//! - [`cached`] - Caching provider wrapper
//! - [`settings`] - Serializable cache configuration
//! - [`error`] - Loading errors
//!
//! ## Usage
//!
//! ```rust
//! use cartprice_core::ReferenceDataProvider;
//! use cartprice_refdata::{CachePolicy, CachedProvider, InMemoryReferenceData};
//!
//! let data = InMemoryReferenceData::from_json_str(
//!     r#"{ "brand_discounts": [{ "brand": "PUMA", "discount_percent": 40 }] }"#,
//! )
//! .unwrap();
//! let provider = CachedProvider::new(data, CachePolicy::default());
//!
//! assert_eq!(provider.brand_discount_percent("puma").value(), 40);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod cached;
pub mod error;
pub mod settings;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::TtlCache;
pub use cached::{CachePolicy, CachedProvider, VoucherCachePolicy, DEFAULT_RULES_TTL};
pub use error::{RefDataError, RefDataResult};
pub use settings::CacheSettings;
pub use store::{InMemoryReferenceData, ReferenceDataSnapshot};
