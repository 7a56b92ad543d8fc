//! Storefront configuration (environment variables).

use std::time::Duration;

use thiserror::Error;

use precocerto_core::Money;
use precocerto_observability::LogFormat;

pub const PRODUCT_PREFIX: &str = "PRECOCERTO_PRODUCT_PREFIX";
pub const BANNER_PREFIX: &str = "PRECOCERTO_BANNER_PREFIX";
pub const DEFAULT_PRICE_CENTS: &str = "PRECOCERTO_DEFAULT_PRICE_CENTS";
pub const BANNER_INTERVAL_SECS: &str = "PRECOCERTO_BANNER_INTERVAL_SECS";
pub const RESOLVE_TIMEOUT_MS: &str = "PRECOCERTO_RESOLVE_TIMEOUT_MS";
pub const DEFAULT_ADMIN: &str = "PRECOCERTO_DEFAULT_ADMIN";
pub const LOG_FORMAT: &str = "PRECOCERTO_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Object-store prefix listed for products.
    pub product_prefix: String,
    /// Object-store prefix listed for banners.
    pub banner_prefix: String,
    /// Unit price of products missing from the price book.
    pub default_price: Money,
    pub banner_interval: Duration,
    /// Per-object URL resolution bound; `None` waits indefinitely.
    pub resolve_timeout: Option<Duration>,
    /// Admin flag written to new user records.
    pub default_admin: bool,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            product_prefix: "images/".to_string(),
            banner_prefix: "banners/".to_string(),
            default_price: Money::ZERO,
            banner_interval: Duration::from_secs(3),
            resolve_timeout: None,
            default_admin: true,
            log_format: LogFormat::Json,
        }
    }
}

impl StorefrontConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let product_prefix = lookup(PRODUCT_PREFIX).unwrap_or(defaults.product_prefix);
        let banner_prefix = lookup(BANNER_PREFIX).unwrap_or(defaults.banner_prefix);

        let default_price = match lookup(DEFAULT_PRICE_CENTS) {
            Some(raw) => Money::from_cents(parse_number(DEFAULT_PRICE_CENTS, &raw)?),
            None => {
                tracing::warn!("{DEFAULT_PRICE_CENTS} not set; unpriced products cost {}", defaults.default_price);
                defaults.default_price
            }
        };

        let banner_interval = match lookup(BANNER_INTERVAL_SECS) {
            Some(raw) => {
                let secs = parse_number(BANNER_INTERVAL_SECS, &raw)?;
                if secs == 0 {
                    return Err(invalid(BANNER_INTERVAL_SECS, &raw, "must be at least 1"));
                }
                Duration::from_secs(secs)
            }
            None => defaults.banner_interval,
        };

        let resolve_timeout = match lookup(RESOLVE_TIMEOUT_MS) {
            Some(raw) if !raw.trim().is_empty() => {
                let ms = parse_number(RESOLVE_TIMEOUT_MS, &raw)?;
                if ms == 0 {
                    return Err(invalid(RESOLVE_TIMEOUT_MS, &raw, "must be at least 1"));
                }
                Some(Duration::from_millis(ms))
            }
            _ => None,
        };

        let default_admin = match lookup(DEFAULT_ADMIN) {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|e| invalid(DEFAULT_ADMIN, &raw, e))?,
            None => defaults.default_admin,
        };

        let log_format = match lookup(LOG_FORMAT) {
            Some(raw) => LogFormat::parse(&raw).ok_or_else(|| invalid(LOG_FORMAT, &raw, "expected json or pretty"))?,
            None => defaults.log_format,
        };

        Ok(Self {
            product_prefix,
            banner_prefix,
            default_price,
            banner_interval,
            resolve_timeout,
            default_admin,
            log_format,
        })
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse::<u64>().map_err(|e| invalid(key, raw, e))
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
