//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_URL` - Published CSV feed of the product spreadsheet
//! - `ORDER_PHONE` - Phone number receiving orders (digits only, with country code)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `CATALOG_REVALIDATE_SECONDS` - How stale the catalog may get before a refetch (default: 10)
//! - `ORDER_SERVICE_URL` - Messaging deep-link base (default: <https://wa.me>)
//! - `ORDER_PREFIX` - Text placed before the order summary (default: `QuimicaGr-Pedido:`)
//! - `STORE_NAME` - Header title (default: Quimica Gr)
//! - `STORE_TAGLINE` - Header subtitle
//! - `CONTACT_PHONE` - Phone for the header chat link (default: `ORDER_PHONE`)
//! - `INSTAGRAM_URL` - Header Instagram link
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_REVALIDATE_SECONDS: u64 = 10;
const DEFAULT_ORDER_PREFIX: &str = "QuimicaGr-Pedido:";
const DEFAULT_TAGLINE: &str = "Venta de Productos de Limpieza y Belleza Corporal Online";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Catalog feed configuration
    pub catalog: CatalogConfig,
    /// Outbound order link configuration
    pub order: OrderConfig,
    /// Header copy and contact links
    pub store: StoreConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production)
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Where the product catalog comes from and how long a copy stays fresh.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// CSV feed URL
    pub url: Url,
    /// Revalidation interval
    pub revalidate: Duration,
}

/// Outbound order link settings.
#[derive(Debug, Clone)]
pub struct OrderConfig {
    /// Messaging service base, e.g. `https://wa.me`
    pub service_url: Url,
    /// Destination phone number
    pub phone: String,
    /// Text placed before the order summary
    pub prefix: String,
}

/// Store branding shown in the page header.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub name: String,
    pub tagline: String,
    pub contact_phone: Option<String>,
    pub instagram_url: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");

        Ok(Self {
            host,
            port,
            base_url,
            catalog: CatalogConfig::from_env()?,
            order: OrderConfig::from_env()?,
            store: StoreConfig::from_env(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_parsed_or_default("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_parsed_or_default("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = parse_http_url("CATALOG_URL", &get_required_env("CATALOG_URL")?)?;
        let seconds = get_parsed_or_default("CATALOG_REVALIDATE_SECONDS", DEFAULT_REVALIDATE_SECONDS)?;
        Ok(Self {
            url,
            revalidate: Duration::from_secs(seconds),
        })
    }
}

impl OrderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let service_url = parse_http_url(
            "ORDER_SERVICE_URL",
            &get_env_or_default("ORDER_SERVICE_URL", "https://wa.me"),
        )?;
        let phone = validate_phone("ORDER_PHONE", get_required_env("ORDER_PHONE")?)?;
        Ok(Self {
            service_url,
            phone,
            prefix: get_env_or_default("ORDER_PREFIX", DEFAULT_ORDER_PREFIX),
        })
    }
}

impl StoreConfig {
    fn from_env() -> Self {
        Self {
            name: get_env_or_default("STORE_NAME", "Quimica Gr"),
            tagline: get_env_or_default("STORE_TAGLINE", DEFAULT_TAGLINE),
            contact_phone: get_optional_env("CONTACT_PHONE"),
            instagram_url: get_optional_env("INSTAGRAM_URL"),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "Quimica Gr".to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
            contact_phone: None,
            instagram_url: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn get_parsed_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse an absolute http(s) URL.
fn parse_http_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Validate a phone number for a deep link: digits only, after stripping `+`,
/// spaces, and dashes.
fn validate_phone(key: &str, value: String) -> Result<String, ConfigError> {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, '+' | ' ' | '-'))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("'{value}' is not a phone number"),
        ));
    }
    Ok(digits)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_strips_formatting() {
        let phone = validate_phone("ORDER_PHONE", "+54 9 11-3106-6937".to_string()).unwrap();
        assert_eq!(phone, "5491131066937");
    }

    #[test]
    fn test_validate_phone_rejects_letters() {
        let result = validate_phone("ORDER_PHONE", "call-me".to_string());
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_validate_phone_rejects_empty() {
        assert!(validate_phone("ORDER_PHONE", "+ -".to_string()).is_err());
    }

    #[test]
    fn test_parse_http_url_accepts_https() {
        let url = parse_http_url("CATALOG_URL", "https://docs.google.com/pub?output=csv").unwrap();
        assert_eq!(url.host_str(), Some("docs.google.com"));
    }

    #[test]
    fn test_parse_http_url_rejects_other_schemes() {
        let result = parse_http_url("CATALOG_URL", "ftp://example.com/products.csv");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_http_url_rejects_relative() {
        assert!(parse_http_url("CATALOG_URL", "/products.csv").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://quimicagr.com.ar".to_string(),
            catalog: CatalogConfig {
                url: Url::parse("https://example.com/catalog.csv").unwrap(),
                revalidate: Duration::from_secs(10),
            },
            order: OrderConfig {
                service_url: Url::parse("https://wa.me").unwrap(),
                phone: "5491131066937".to_string(),
                prefix: DEFAULT_ORDER_PREFIX.to_string(),
            },
            store: StoreConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(config.is_secure());
    }
}
