//! # Midtrans Snap Transactions
//!
//! Implementation of the Snap transaction-creation API.
//! This is the only outbound call the adapter makes.

use crate::config::MidtransConfig;
use async_trait::async_trait;
use pay_core::{PaymentError, PaymentGateway, PaymentResult, SnapTransaction, TransactionPayload};
use reqwest::{header, Client};
use tracing::{debug, error, info, instrument};

/// Midtrans Snap gateway
///
/// Posts the transaction payload to Snap and returns the token the client
/// uses to open the Snap payment page.
pub struct MidtransSnapGateway {
    config: MidtransConfig,
    client: Client,
}

impl MidtransSnapGateway {
    /// Create a new Snap gateway
    pub fn new(config: MidtransConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = MidtransConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &MidtransConfig {
        &self.config
    }
}

#[async_trait]
impl PaymentGateway for MidtransSnapGateway {
    #[instrument(skip(self, payload), fields(order_id = %payload.order_id()))]
    async fn create_transaction(
        &self,
        payload: &TransactionPayload,
    ) -> PaymentResult<SnapTransaction> {
        debug!(
            "Creating Snap transaction: {} items, gross_amount={}, enabled_payments={:?}",
            payload.item_details.len(),
            payload.gross_amount(),
            payload.enabled_payments
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .header(header::AUTHORIZATION, self.config.auth_header())
            .header(header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Snap request failed: {}", e);
                PaymentError::Gateway {
                    message: e.to_string(),
                    status: None,
                    data: None,
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| PaymentError::Gateway {
            message: format!("Failed to read gateway response: {}", e),
            status: Some(status.as_u16()),
            data: None,
        })?;

        if !status.is_success() {
            error!("Snap API error: status={}, body={}", status, body);

            return Err(PaymentError::Gateway {
                message: format!("Request failed with status code {}", status.as_u16()),
                status: Some(status.as_u16()),
                data: Some(body_as_json(&body)),
            });
        }

        let transaction: SnapTransaction = serde_json::from_str(&body).map_err(|e| {
            error!("Unexpected Snap response: {}", e);
            PaymentError::Gateway {
                message: format!("Failed to parse gateway response: {}", e),
                status: Some(status.as_u16()),
                data: Some(body_as_json(&body)),
            }
        })?;

        info!(
            "Created Snap transaction: order_id={}, redirect_url={:?}",
            payload.order_id(),
            transaction.redirect_url
        );

        Ok(transaction)
    }

    fn provider_name(&self) -> &'static str {
        "midtrans"
    }
}

/// Gateway bodies are JSON when Snap answers; proxies in between may not be
fn body_as_json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}
