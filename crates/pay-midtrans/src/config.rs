//! # Midtrans Configuration
//!
//! Configuration management for the Midtrans Snap integration.
//! The server key is loaded from the environment and never logged.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pay_core::PaymentError;
use std::fmt;
use std::time::Duration;

/// Snap transaction endpoint (sandbox)
pub const SANDBOX_SNAP_URL: &str = "https://app.sandbox.midtrans.com/snap/v1/transactions";

/// Snap transaction endpoint (production)
pub const PRODUCTION_SNAP_URL: &str = "https://app.midtrans.com/snap/v1/transactions";

/// Default outbound request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Midtrans API configuration
#[derive(Clone)]
pub struct MidtransConfig {
    /// Server key (Basic auth username, empty password)
    pub server_key: String,

    /// Full URL of the transaction-creation endpoint
    pub api_url: String,

    /// Timeout applied to every gateway request
    pub timeout: Duration,
}

impl MidtransConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `MIDTRANS_SERVER_KEY`
    ///
    /// Optional:
    /// - `MIDTRANS_IS_PRODUCTION` (`true` selects the production endpoint)
    /// - `MIDTRANS_API_URL` (explicit endpoint, wins over the above)
    /// - `MIDTRANS_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_key = var("MIDTRANS_SERVER_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                PaymentError::Configuration("MIDTRANS_SERVER_KEY not set".to_string())
            })?;

        let is_production = match var("MIDTRANS_IS_PRODUCTION") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                PaymentError::Configuration(format!(
                    "MIDTRANS_IS_PRODUCTION must be true or false, got {:?}",
                    v
                ))
            })?,
            None => false,
        };

        let api_url = var("MIDTRANS_API_URL").unwrap_or_else(|| {
            if is_production {
                PRODUCTION_SNAP_URL.to_string()
            } else {
                SANDBOX_SNAP_URL.to_string()
            }
        });

        let timeout_secs = match var("MIDTRANS_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|_| {
                PaymentError::Configuration(format!(
                    "MIDTRANS_TIMEOUT_SECS must be a number of seconds, got {:?}",
                    v
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            server_key,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(server_key: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
            api_url: SANDBOX_SNAP_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Check if pointed at the sandbox
    pub fn is_sandbox(&self) -> bool {
        self.api_url.contains(".sandbox.")
    }

    /// Get authorization header value: `Basic base64(server_key + ":")`
    pub fn auth_header(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:", self.server_key)))
    }

    /// Builder: set custom API URL (for testing)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for MidtransConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MidtransConfig")
            .field("server_key", &"[redacted]")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_sandbox() {
        let config =
            MidtransConfig::from_vars(vars(&[("MIDTRANS_SERVER_KEY", "SB-Mid-server-abc")]))
                .unwrap();
        assert_eq!(config.api_url, SANDBOX_SNAP_URL);
        assert!(config.is_sandbox());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_production_flag() {
        let config = MidtransConfig::from_vars(vars(&[
            ("MIDTRANS_SERVER_KEY", "Mid-server-abc"),
            ("MIDTRANS_IS_PRODUCTION", "true"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, PRODUCTION_SNAP_URL);
        assert!(!config.is_sandbox());
    }

    #[test]
    fn test_explicit_url_and_timeout() {
        let config = MidtransConfig::from_vars(vars(&[
            ("MIDTRANS_SERVER_KEY", "k"),
            ("MIDTRANS_API_URL", "http://localhost:9999/snap/v1/transactions"),
            ("MIDTRANS_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:9999/snap/v1/transactions");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_key() {
        let result = MidtransConfig::from_vars(vars(&[]));
        assert!(matches!(result, Err(PaymentError::Configuration(_))));

        let result = MidtransConfig::from_vars(vars(&[("MIDTRANS_SERVER_KEY", "  ")]));
        assert!(matches!(result, Err(PaymentError::Configuration(_))));
    }

    #[test]
    fn test_invalid_values() {
        assert!(MidtransConfig::from_vars(vars(&[
            ("MIDTRANS_SERVER_KEY", "k"),
            ("MIDTRANS_IS_PRODUCTION", "maybe"),
        ]))
        .is_err());
        assert!(MidtransConfig::from_vars(vars(&[
            ("MIDTRANS_SERVER_KEY", "k"),
            ("MIDTRANS_TIMEOUT_SECS", "soon"),
        ]))
        .is_err());
    }

    #[test]
    fn test_auth_header() {
        let config = MidtransConfig::new("SB-Mid-server-abc");
        // base64("SB-Mid-server-abc:")
        assert_eq!(config.auth_header(), "Basic U0ItTWlkLXNlcnZlci1hYmM6");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = MidtransConfig::new("SB-Mid-server-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[redacted]"));
    }
}
