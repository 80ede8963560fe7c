//! Storefront configuration loaded from environment variables.
//!
//! Every variable has a default, so a bare environment gets the stock
//! SuperMart setup.
//!
//! # Environment Variables
//!
//! - `SUPERMART_STORE_NAME` - Store name used in outbound messages (default: `SuperMart`)
//! - `SUPERMART_WHATSAPP_NUMBER` - Seller WhatsApp number for order hand-off
//! - `SUPERMART_CATALOG_URL` - Product catalog endpoint (default: Fake Store API)
//! - `SUPERMART_GEOCODING_URL` - Geocoding endpoint (default: OpenWeatherMap direct geocoding)
//! - `SUPERMART_GEOCODING_API_KEY` - Geocoding API key; without it, city lookups
//!   use only the local fallback table
//! - `SUPERMART_EXCHANGE_RATE` - USD to IDR rate applied to catalog prices at load time
//! - `SUPERMART_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (rupiah)
//! - `SUPERMART_FLAT_SHIPPING_FEE` - Flat shipping fee below the threshold (rupiah)
//! - `SUPERMART_STORAGE_PATH` - JSON file backing the durable key-value store
//! - `SUPERMART_CATALOG_SEED` - Optional RNG seed for discount/rating enrichment;
//!   omit it in production for a time-seeded source

use std::path::PathBuf;

use rust_decimal::Decimal;
use secrecy::SecretString;
use supermart_core::Rupiah;
use thiserror::Error;

use crate::cart::ShippingRates;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Clone)]
pub struct StoreConfig {
    /// Store name used in greetings and outbound messages
    pub store_name: String,
    /// Seller WhatsApp number (country code, no `+`)
    pub whatsapp_number: String,
    /// Product catalog endpoint
    pub catalog_url: String,
    /// Geocoding endpoint
    pub geocoding_url: String,
    /// Geocoding API key
    pub geocoding_api_key: Option<SecretString>,
    /// USD to IDR conversion applied once at catalog load
    pub exchange_rate: Decimal,
    /// Free-shipping threshold and flat fee
    pub shipping: ShippingRates,
    /// JSON file backing durable storage
    pub storage_path: PathBuf,
    /// Optional fixed seed for catalog enrichment
    pub catalog_seed: Option<u64>,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("store_name", &self.store_name)
            .field("whatsapp_number", &self.whatsapp_number)
            .field("catalog_url", &self.catalog_url)
            .field("geocoding_url", &self.geocoding_url)
            .field(
                "geocoding_api_key",
                &self.geocoding_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("exchange_rate", &self.exchange_rate)
            .field("shipping", &self.shipping)
            .field("storage_path", &self.storage_path)
            .field("catalog_seed", &self.catalog_seed)
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let exchange_rate = parse_env("SUPERMART_EXCHANGE_RATE", "15000")?;
        let free_shipping_threshold: i64 =
            parse_env("SUPERMART_FREE_SHIPPING_THRESHOLD", "200000")?;
        let flat_shipping_fee: i64 = parse_env("SUPERMART_FLAT_SHIPPING_FEE", "15000")?;
        let catalog_seed = match get_optional_env("SUPERMART_CATALOG_SEED") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("SUPERMART_CATALOG_SEED".to_string(), e.to_string())
            })?),
            None => None,
        };

        Ok(Self {
            store_name: get_env_or_default("SUPERMART_STORE_NAME", "SuperMart"),
            whatsapp_number: get_env_or_default("SUPERMART_WHATSAPP_NUMBER", "6283120940458"),
            catalog_url: get_env_or_default(
                "SUPERMART_CATALOG_URL",
                "https://fakestoreapi.com/products",
            ),
            geocoding_url: get_env_or_default(
                "SUPERMART_GEOCODING_URL",
                "https://api.openweathermap.org/geo/1.0/direct",
            ),
            geocoding_api_key: get_optional_env("SUPERMART_GEOCODING_API_KEY")
                .map(SecretString::from),
            exchange_rate,
            shipping: ShippingRates {
                free_threshold: Rupiah::from_int(free_shipping_threshold),
                flat_fee: Rupiah::from_int(flat_shipping_fee),
            },
            storage_path: PathBuf::from(get_env_or_default(
                "SUPERMART_STORAGE_PATH",
                "supermart-data.json",
            )),
            catalog_seed,
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: "SuperMart".to_string(),
            whatsapp_number: "6283120940458".to_string(),
            catalog_url: "https://fakestoreapi.com/products".to_string(),
            geocoding_url: "https://api.openweathermap.org/geo/1.0/direct".to_string(),
            geocoding_api_key: None,
            exchange_rate: Decimal::from(15_000),
            shipping: ShippingRates::default(),
            storage_path: PathBuf::from("supermart-data.json"),
            catalog_seed: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to a default literal.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.store_name, "SuperMart");
        assert_eq!(config.whatsapp_number, "6283120940458");
        assert_eq!(config.exchange_rate, Decimal::from(15_000));
        assert_eq!(config.shipping.free_threshold, Rupiah::from_int(200_000));
        assert_eq!(config.shipping.flat_fee, Rupiah::from_int(15_000));
        assert!(config.geocoding_api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = StoreConfig {
            geocoding_api_key: Some(SecretString::from("super-secret-key")),
            ..StoreConfig::default()
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-key"));
    }
}
