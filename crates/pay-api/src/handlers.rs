//! # Request Handlers
//!
//! Axum request handlers for the checkout API.

use crate::response::{payment_error_to_response, CreateTransactionResponse, ErrorResponse};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::{CheckoutRequest, PaymentError, TransactionBuilder};
use tracing::{error, info, instrument, warn};

/// Liveness text served at `/`
pub const LIVENESS_MESSAGE: &str = "Midtrans API is running...";

/// Liveness check
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "snap-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Validate a checkout request, build the Snap payload and create the transaction
#[instrument(skip(state, body), fields(order_id))]
pub async fn create_transaction(
    State(state): State<AppState>,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CreateTransactionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) =
        body.map_err(|rejection| reject(PaymentError::validation("body", rejection.body_text())))?;

    info!(
        user_id = ?request.user_id,
        items = request.item_count(),
        total_amount = ?request.total_amount,
        payment_type = ?request.payment_type,
        "Incoming transaction request"
    );

    let checkout = state.policy.validate(&request).map_err(reject)?;

    let payload = TransactionBuilder::new(&checkout).build();
    let order_id = payload.order_id().to_string();
    tracing::Span::current().record("order_id", order_id.as_str());

    info!(
        "Creating transaction: order_id={}, gross_amount={}, provider={}",
        order_id,
        payload.gross_amount(),
        state.gateway.provider_name()
    );

    // The gateway call runs on its own task, so it completes even if the
    // client goes away mid-request.
    let gateway = state.gateway.clone();
    let snap = tokio::spawn(async move { gateway.create_transaction(&payload).await })
        .await
        .map_err(|e| PaymentError::Internal(format!("Gateway task failed: {}", e)))
        .and_then(|result| result)
        .map_err(reject)?;

    info!("Created transaction: order_id={}", order_id);

    Ok(Json(CreateTransactionResponse::new(order_id, snap)))
}

/// Log a failed checkout at a level matching who is at fault, then report it
fn reject(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    if err.is_client_error() {
        warn!("Checkout rejected: {}", err);
    } else {
        error!("Checkout failed: {}", err);
    }
    payment_error_to_response(err)
}
