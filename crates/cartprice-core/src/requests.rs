//! # Request / Response DTOs
//!
//! Shapes a transport (CLI, HTTP, IPC) deserializes and hands to
//! [`PricingPipeline`](crate::pipeline::PricingPipeline).
//!
//! ## Calculate Request
//! ```json
//! {
//!   "cart_items": [
//!     {
//!       "product": {
//!         "id": "sku-1", "brand": "PUMA", "brand_tier": "regular",
//!         "category": "T-shirts", "base_price": "1000.00"
//!       },
//!       "quantity": 1,
//!       "size": "M"
//!     }
//!   ],
//!   "customer": { "id": "c-1", "tier": "gold" },
//!   "payment_info": { "method": "CARD", "bank_name": "ICICI", "card_type": "CREDIT" },
//!   "voucher_code": "SUPER69"
//! }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{CartLine, CustomerProfile, PaymentInfo};

/// Input of a full price calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculateRequest {
    pub cart_items: Vec<CartLine>,
    pub customer: CustomerProfile,

    #[serde(default)]
    pub payment_info: Option<PaymentInfo>,

    #[serde(default)]
    pub voucher_code: Option<String>,
}

/// Input of a standalone voucher check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidateCodeRequest {
    pub code: String,
    pub cart_items: Vec<CartLine>,
    pub customer: CustomerProfile,
}

/// Successful voucher check. Failures travel as
/// [`ErrorResponse`](crate::error::ErrorResponse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidateCodeResponse {
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_request_optional_fields() {
        let json = r#"{
            "cart_items": [],
            "customer": { "id": "c-1", "tier": "silver" }
        }"#;

        let request: CalculateRequest = serde_json::from_str(json).unwrap();
        assert!(request.cart_items.is_empty());
        assert!(request.payment_info.is_none());
        assert!(request.voucher_code.is_none());
    }

    #[test]
    fn test_validate_response_shape() {
        let json = serde_json::to_string(&ValidateCodeResponse { valid: true }).unwrap();
        assert_eq!(json, r#"{"valid":true}"#);
    }
}
