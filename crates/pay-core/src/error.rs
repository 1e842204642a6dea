//! # Payment Error Types
//!
//! Typed error handling for the snap-checkout engine.
//! All checkout operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// A request field is missing or malformed
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Declared total diverges from the recomputed total beyond tolerance
    #[error("Total amount does not match items: received {received_total}, calculated {calculated_total}")]
    AmountMismatch {
        received_total: f64,
        calculated_total: i64,
    },

    /// The gateway call failed or returned a non-success status
    #[error("Gateway error: {message}")]
    Gateway {
        message: String,
        /// HTTP status returned by the gateway, if a response arrived
        status: Option<u16>,
        /// Response body returned by the gateway, if any
        data: Option<serde_json::Value>,
    },

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Shorthand for a field-level validation failure
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PaymentError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the client sent something we refuse to process
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaymentError::Validation { .. } | PaymentError::AmountMismatch { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Validation { .. } => 400,
            PaymentError::AmountMismatch { .. } => 400,
            PaymentError::Gateway { .. } => 500,
            PaymentError::Configuration(_) => 500,
            PaymentError::Internal(_) => 500,
        }
    }
}

/// Result type alias for checkout operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(PaymentError::validation("userId", "missing").is_client_error());
        assert!(PaymentError::AmountMismatch {
            received_total: 2150.0,
            calculated_total: 2000
        }
        .is_client_error());
        assert!(!PaymentError::Internal("boom".into()).is_client_error());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PaymentError::validation("items", "empty").status_code(), 400);
        assert_eq!(
            PaymentError::AmountMismatch {
                received_total: 1.0,
                calculated_total: 500
            }
            .status_code(),
            400
        );
        assert_eq!(
            PaymentError::Gateway {
                message: "bad gateway".into(),
                status: Some(502),
                data: None
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_mismatch_message_carries_both_totals() {
        let err = PaymentError::AmountMismatch {
            received_total: 2150.0,
            calculated_total: 2000,
        };
        let msg = err.to_string();
        assert!(msg.contains("2150"));
        assert!(msg.contains("2000"));
    }
}
