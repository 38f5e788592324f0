//! # Error Types
//!
//! Domain-specific error types for cartprice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartprice-core errors (this file)                                     │
//! │  ├── PricingError     - Voucher eligibility + input failures           │
//! │  ├── ValidationError  - Field-level input validation failures          │
//! │  └── ErrorResponse    - What a transport sends back ({code, message})  │
//! │                                                                         │
//! │  cartprice-refdata errors (separate crate)                             │
//! │  └── RefDataError     - Snapshot loading / rule table failures         │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → ErrorResponse → Client         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, brand, category, tier)
//! 3. Errors are returned, never used as control flow via panics
//! 4. Every variant maps to exactly one machine-readable [`ErrorCode`]
//!
//! All pricing errors are deterministic caller/data errors: retrying the
//! same input against the same reference data gives the same failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Pricing Error
// =============================================================================

/// Failures of a price calculation or voucher validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The voucher code does not resolve to any voucher rule.
    ///
    /// Raised before any brand/category/tier check runs.
    #[error("Discount code '{code}' does not exist")]
    DiscountCodeInvalid { code: String },

    /// The cart contains a brand the voucher excludes.
    ///
    /// ## User Workflow
    /// ```text
    /// Apply "NONIKE20" to cart [PUMA tee, NIKE shoes]
    ///      │
    ///      ▼
    /// excluded_brands = "nike,adidas"
    ///      │
    ///      ▼
    /// BrandExcluded { brand: "NIKE" }
    ///      │
    ///      ▼
    /// UI shows: "Brand NIKE is excluded for this voucher"
    /// ```
    #[error("Brand {brand} is excluded for this voucher")]
    BrandExcluded { brand: String },

    /// The cart contains a category outside the voucher's allowed set.
    #[error("Category {category} not eligible for this voucher")]
    CategoryRestricted { category: String },

    /// The customer's tier does not match the voucher's required tier.
    #[error("Customer tier {actual} not eligible for this voucher (requires {required})")]
    CustomerTierRequired { required: String, actual: String },

    /// Cart input failed validation (quantity, price).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl PricingError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PricingError::DiscountCodeInvalid { .. } => ErrorCode::DiscountCodeInvalid,
            PricingError::BrandExcluded { .. } => ErrorCode::BrandExcluded,
            PricingError::CategoryRestricted { .. } => ErrorCode::CategoryRestricted,
            PricingError::CustomerTierRequired { .. } => ErrorCode::CustomerTierRequired,
            PricingError::Validation(_) => ErrorCode::ValidationError,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any discount stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Transport-Facing Error
// =============================================================================

/// Error codes carried in [`ErrorResponse`].
///
/// ## Usage in a Client
/// ```typescript
/// switch (e.code) {
///   case 'DISCOUNT_CODE_INVALID':
///     showFieldError('voucher', e.message);
///     break;
///   case 'CATEGORY_RESTRICTED':
///     showCartWarning(e.message);
///     break;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Voucher code does not exist (400)
    DiscountCodeInvalid,

    /// Cart contains an excluded brand (422)
    BrandExcluded,

    /// Cart contains a category outside the allowed set (422)
    CategoryRestricted,

    /// Customer tier does not satisfy the voucher (422)
    CustomerTierRequired,

    /// Malformed cart input (400)
    ValidationError,
}

impl ErrorCode {
    /// Returns the wire representation (`"DISCOUNT_CODE_INVALID"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DiscountCodeInvalid => "DISCOUNT_CODE_INVALID",
            ErrorCode::BrandExcluded => "BRAND_EXCLUDED",
            ErrorCode::CategoryRestricted => "CATEGORY_RESTRICTED",
            ErrorCode::CustomerTierRequired => "CUSTOMER_TIER_REQUIRED",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
        }
    }

    /// HTTP-style status a transport should answer with.
    ///
    /// Unknown codes and malformed input are plain bad requests; eligibility
    /// failures are well-formed requests the rules refuse.
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::DiscountCodeInvalid | ErrorCode::ValidationError => 400,
            ErrorCode::BrandExcluded
            | ErrorCode::CategoryRestricted
            | ErrorCode::CustomerTierRequired => 422,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure returned to callers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CATEGORY_RESTRICTED",
///   "message": "Category T-shirts not eligible for this voucher"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl ErrorResponse {
    /// Status code a transport should use for this response.
    pub fn status(&self) -> u16 {
        self.code.status()
    }
}

/// Carries the code and message through verbatim.
impl From<&PricingError> for ErrorResponse {
    fn from(err: &PricingError) -> Self {
        ErrorResponse {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<PricingError> for ErrorResponse {
    fn from(err: PricingError) -> Self {
        ErrorResponse::from(&err)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::BrandExcluded {
            brand: "NIKE".to_string(),
        };
        assert_eq!(err.to_string(), "Brand NIKE is excluded for this voucher");

        let err = PricingError::DiscountCodeInvalid {
            code: "NOPE".to_string(),
        };
        assert_eq!(err.to_string(), "Discount code 'NOPE' does not exist");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let err: PricingError = validation_err.into();
        assert!(matches!(err, PricingError::Validation(_)));
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_error_response_serialization() {
        let err = PricingError::CategoryRestricted {
            category: "T-shirts".to_string(),
        };
        let response = ErrorResponse::from(&err);
        assert_eq!(response.status(), 422);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "CATEGORY_RESTRICTED");
        assert_eq!(json["message"], "Category T-shirts not eligible for this voucher");
    }

    #[test]
    fn test_error_code_wire_names_match_serde() {
        for code in [
            ErrorCode::DiscountCodeInvalid,
            ErrorCode::BrandExcluded,
            ErrorCode::CategoryRestricted,
            ErrorCode::CustomerTierRequired,
            ErrorCode::ValidationError,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }
}
