//! Checkout gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SOFA_CHECKOUT_URL` - Base URL of the checkout backend (e.g., `https://shop.example.com/checkout/`)
//!
//! ## Optional
//! - `SOFA_CHECKOUT_TIMEOUT_SECS` - HTTP request timeout in seconds (default: none)
//! - `SOFA_CHECKOUT_USER_AGENT` - User agent sent by the HTTP transport

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// The backend scripts the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Payment method lookup and checkout submission.
    Ajax,
    /// Order summary for a checkout token.
    Summary,
    /// Final order activation.
    Activation,
}

impl Endpoint {
    /// Path of the endpoint relative to the checkout base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Ajax => "ajax.php",
            Self::Summary => "summaryst.php",
            Self::Activation => "docheckoutst.php",
        }
    }
}

/// Checkout gateway configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Base URL of the checkout backend, always ending in `/`
    checkout_url: Url,
    /// Request timeout applied by the HTTP transport
    pub request_timeout: Option<Duration>,
    /// User agent sent by the HTTP transport
    pub user_agent: Option<String>,
}

impl CheckoutConfig {
    /// Create a configuration for the given checkout base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or
    /// cannot serve as a base for endpoint paths.
    pub fn new(checkout_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            checkout_url: parse_base_url("SOFA_CHECKOUT_URL", checkout_url)?,
            request_timeout: None,
            user_agent: None,
        })
    }

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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("SOFA_CHECKOUT_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("SOFA_CHECKOUT_URL".to_string()))?;
        let checkout_url = parse_base_url("SOFA_CHECKOUT_URL", &raw_url)?;

        let request_timeout = lookup("SOFA_CHECKOUT_TIMEOUT_SECS")
            .map(|value| {
                value.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SOFA_CHECKOUT_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        let user_agent = lookup("SOFA_CHECKOUT_USER_AGENT").filter(|ua| !ua.is_empty());

        Ok(Self {
            checkout_url,
            request_timeout,
            user_agent,
        })
    }

    /// Base URL of the checkout backend.
    #[must_use]
    pub const fn checkout_url(&self) -> &Url {
        &self.checkout_url
    }

    /// Full URL of a backend endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint path cannot be joined onto the base.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, url::ParseError> {
        self.checkout_url.join(endpoint.path())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, appending a trailing `/` so endpoint paths are suffixes.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
