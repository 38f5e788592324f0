//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --data ./reference-data.json                                       │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     CARTPRICE_DATA_PATH, CARTPRICE_LOG_LEVEL,                          │
//! │     CARTPRICE_CACHE_ENABLED, CARTPRICE_RULES_TTL_SECS,                 │
//! │     CARTPRICE_VOUCHER_TTL_SECS                                         │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/cartprice/cartprice.toml (Linux)                         │
//! │     ~/Library/Application Support/com.cartprice.cartprice/... (macOS)  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! reference_data_path = "data/reference-data.json"
//! log_level = "info"
//!
//! [cache]
//! enabled = true
//! rules_ttl_secs = 300
//! # voucher_ttl_secs = 30   # omit to disable voucher caching
//! ```

use std::path::{Path, PathBuf};

use cartprice_refdata::CacheSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

pub const ENV_DATA_PATH: &str = "CARTPRICE_DATA_PATH";
pub const ENV_LOG_LEVEL: &str = "CARTPRICE_LOG_LEVEL";
pub const ENV_CACHE_ENABLED: &str = "CARTPRICE_CACHE_ENABLED";
pub const ENV_RULES_TTL_SECS: &str = "CARTPRICE_RULES_TTL_SECS";
pub const ENV_VOUCHER_TTL_SECS: &str = "CARTPRICE_VOUCHER_TTL_SECS";

/// Complete CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON snapshot with the four discount tables.
    #[serde(default = "default_data_path")]
    pub reference_data_path: PathBuf,

    /// Default tracing filter; `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub cache: CacheSettings,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/reference-data.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            reference_data_path: default_data_path(),
            log_level: default_log_level(),
            cache: CacheSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (an explicit path must exist; the default may not)
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        debug!(path = %path.display(), "Loading config file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.reference_data_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "reference_data_path must not be empty".into(),
            ));
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".into()));
        }

        if self.cache.enabled && self.cache.rules_ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "cache.rules_ttl_secs must be greater than 0 when caching is enabled".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from the process environment.
    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Applies overrides from any variable source.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATA_PATH) {
            debug!(path = %path, "Overriding reference data path from environment");
            self.reference_data_path = PathBuf::from(path);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }

        if let Some(value) = lookup(ENV_CACHE_ENABLED) {
            self.cache.enabled = parse_bool(ENV_CACHE_ENABLED, &value)?;
        }

        if let Some(value) = lookup(ENV_RULES_TTL_SECS) {
            self.cache.rules_ttl_secs = parse_secs(ENV_RULES_TTL_SECS, &value)?;
        }

        if let Some(value) = lookup(ENV_VOUCHER_TTL_SECS) {
            // Empty turns voucher caching back off.
            self.cache.voucher_ttl_secs = match value.trim() {
                "" => None,
                secs => Some(parse_secs(ENV_VOUCHER_TTL_SECS, secs)?),
            };
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cartprice", "cartprice")
            .map(|dirs| dirs.config_dir().join("cartprice.toml"))
    }
}

fn parse_bool(var: &'static str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            value: value.to_string(),
        }),
    }
}

fn parse_secs(var: &'static str, value: &str) -> ConfigResult<u64> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.reference_data_path, PathBuf::from("data/reference-data.json"));
        assert_eq!(config.log_level, "info");
        assert!(config.cache.enabled);
        assert_eq!(config.cache.rules_ttl_secs, 300);
        assert!(config.cache.voucher_ttl_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            log_level = "debug"

            [cache]
            voucher_ttl_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.cache.rules_ttl_secs, 300);
        assert_eq!(config.cache.voucher_ttl_secs, Some(30));
        assert_eq!(config.reference_data_path, default_data_path());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(env(&[
                (ENV_DATA_PATH, "/srv/rules.json"),
                (ENV_CACHE_ENABLED, "false"),
                (ENV_RULES_TTL_SECS, "60"),
                (ENV_VOUCHER_TTL_SECS, "5"),
            ]))
            .unwrap();

        assert_eq!(config.reference_data_path, PathBuf::from("/srv/rules.json"));
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.rules_ttl_secs, 60);
        assert_eq!(config.cache.voucher_ttl_secs, Some(5));
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(env(&[(ENV_RULES_TTL_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { var: ENV_RULES_TTL_SECS, .. }
        ));
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.cache.rules_ttl_secs = 0;
        assert!(config.validate().is_err());

        // Zero TTL is fine when nothing is cached.
        config.cache.enabled = false;
        assert!(config.validate().is_ok());

        config.reference_data_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reference_data_path = \"rules.json\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.reference_data_path, PathBuf::from("rules.json"));

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            AppConfig::from_file(&missing),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("reference_data_path"));
        assert!(toml_str.contains("[cache]"));
    }
}
