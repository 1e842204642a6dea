//! # Application State
//!
//! Shared state for the Axum application.
//! Built once at startup; a missing gateway credential fails here, before the
//! listener binds.

use pay_core::{BoxedPaymentGateway, CheckoutRule, ValidationMode, ValidationPolicy};
use pay_midtrans::MidtransSnapGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Validation preset applied to checkout requests
    pub validation_mode: ValidationMode,
    /// Override for the reconciliation tolerance
    pub amount_tolerance: Option<i64>,
    /// Reject unknown payment types instead of ignoring them
    pub reject_unknown_payment_type: bool,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match var("PORT") {
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {:?}", p))?,
            None => 5000,
        };

        let validation_mode = match var("CHECKOUT_VALIDATION") {
            Some(mode) => mode.parse::<ValidationMode>()?,
            None => ValidationMode::default(),
        };

        let amount_tolerance = match var("CHECKOUT_AMOUNT_TOLERANCE") {
            Some(t) => Some(t.parse::<i64>().ok().filter(|t| *t >= 0).ok_or_else(|| {
                anyhow::anyhow!(
                    "CHECKOUT_AMOUNT_TOLERANCE must be a non-negative integer, got {:?}",
                    t
                )
            })?),
            None => None,
        };

        let reject_unknown_payment_type = var("CHECKOUT_REJECT_UNKNOWN_PAYMENT_TYPE")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            validation_mode,
            amount_tolerance,
            reject_unknown_payment_type,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<std::net::SocketAddr>()
            .map_err(|e| {
                anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Validation policy described by this config
    pub fn validation_policy(&self) -> ValidationPolicy {
        let mut policy = ValidationPolicy::for_mode(self.validation_mode);
        if let Some(tolerance) = self.amount_tolerance {
            policy = policy.with_tolerance(tolerance);
        }
        if self.reject_unknown_payment_type {
            policy = policy.with_rule(CheckoutRule::KnownPaymentCategory);
        }
        policy
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: "development".to_string(),
            validation_mode: ValidationMode::default(),
            amount_tolerance: None,
            reject_unknown_payment_type: false,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway
    pub gateway: BoxedPaymentGateway,
    /// Checkout validation rules
    pub policy: Arc<ValidationPolicy>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Midtrans Snap gateway
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let gateway = MidtransSnapGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Midtrans: {}", e))?;

        tracing::info!(
            "Midtrans endpoint: {} (sandbox={})",
            gateway.config().api_url,
            gateway.config().is_sandbox()
        );

        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    /// Create state around an existing gateway
    pub fn with_gateway(config: AppConfig, gateway: BoxedPaymentGateway) -> Self {
        let policy = Arc::new(config.validation_policy());
        Self {
            gateway,
            policy,
            config,
        }
    }
}
