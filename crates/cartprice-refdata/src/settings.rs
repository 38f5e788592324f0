//! # Cache Settings
//!
//! The `[cache]` section of a config file, turned into a [`CachePolicy`].
//!
//! ```toml
//! [cache]
//! enabled = true
//! rules_ttl_secs = 300
//! # voucher_ttl_secs = 30   # omit to disable voucher caching
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cached::{CachePolicy, VoucherCachePolicy, DEFAULT_RULES_TTL};

/// Serializable cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Wrap the provider in a cache at all.
    pub enabled: bool,

    /// TTL for brand, category and bank offer lookups.
    pub rules_ttl_secs: u64,

    /// TTL for voucher lookups; `None` disables voucher caching.
    pub voucher_ttl_secs: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            enabled: true,
            rules_ttl_secs: DEFAULT_RULES_TTL.as_secs(),
            voucher_ttl_secs: None,
        }
    }
}

impl CacheSettings {
    /// The policy to build a cached provider with, or `None` when disabled.
    pub fn policy(&self) -> Option<CachePolicy> {
        if !self.enabled {
            return None;
        }

        let vouchers = match self.voucher_ttl_secs {
            Some(secs) => VoucherCachePolicy::Ttl(Duration::from_secs(secs)),
            None => VoucherCachePolicy::Disabled,
        };

        Some(CachePolicy {
            rules_ttl: Duration::from_secs(self.rules_ttl_secs),
            vouchers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CacheSettings::default();
        assert_eq!(settings.policy(), Some(CachePolicy::default()));
    }

    #[test]
    fn test_disabled_has_no_policy() {
        let settings = CacheSettings {
            enabled: false,
            ..CacheSettings::default()
        };
        assert!(settings.policy().is_none());
    }

    #[test]
    fn test_voucher_ttl() {
        let settings: CacheSettings =
            serde_json::from_str(r#"{ "rules_ttl_secs": 60, "voucher_ttl_secs": 5 }"#).unwrap();
        let policy = settings.policy().unwrap();

        assert_eq!(policy.rules_ttl, Duration::from_secs(60));
        assert_eq!(policy.vouchers, VoucherCachePolicy::Ttl(Duration::from_secs(5)));
    }
}
