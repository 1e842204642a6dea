//! # Responses
//!
//! Outward success and failure bodies. Every failure, whichever stage it
//! came from, is reported as `{ error, details }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{PaymentError, SnapTransaction};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::any::Any;
use tracing::error;

/// Create transaction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    /// Token for the Snap payment page
    pub snap_token: String,
    /// Our order ID
    pub order_id: String,
    /// Hosted payment page (redirect user here)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl CreateTransactionResponse {
    pub fn new(order_id: impl Into<String>, snap: SnapTransaction) -> Self {
        Self {
            snap_token: snap.token,
            order_id: order_id.into(),
            redirect_url: snap.redirect_url,
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Offending request field, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "receivedTotal", skip_serializing_if = "Option::is_none")]
    pub received_total: Option<f64>,
    #[serde(rename = "calculatedTotal", skip_serializing_if = "Option::is_none")]
    pub calculated_total: Option<i64>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            field: None,
            received_total: None,
            calculated_total: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&PaymentError> for ErrorResponse {
    fn from(err: &PaymentError) -> Self {
        match err {
            PaymentError::Validation { field, reason } => {
                let mut response =
                    ErrorResponse::new(err.to_string()).with_details(reason.as_str());
                response.field = Some(field.clone());
                response
            }
            PaymentError::AmountMismatch {
                received_total,
                calculated_total,
            } => {
                let mut response = ErrorResponse::new("Total amount does not match items")
                    .with_details(format!(
                        "Received total: {}, calculated total: {}",
                        received_total, calculated_total
                    ));
                response.received_total = Some(*received_total);
                response.calculated_total = Some(*calculated_total);
                response
            }
            PaymentError::Gateway {
                message,
                status,
                data,
            } => {
                let mut details = json!({ "message": message });
                if let Some(status) = status {
                    details["status"] = json!(status);
                }
                if let Some(data) = data {
                    details["data"] = data.clone();
                }
                ErrorResponse::new("Failed to process transaction").with_details(details)
            }
            PaymentError::Configuration(_) | PaymentError::Internal(_) => {
                ErrorResponse::new("Internal server error")
                    .with_details(json!({ "message": err.to_string() }))
            }
        }
    }
}

pub fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(&err)))
}

/// Catch-all for panics escaping a handler
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Unhandled error: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(
            ErrorResponse::new("Internal server error")
                .with_details(json!({ "message": message })),
        ),
    )
        .into_response()
}
