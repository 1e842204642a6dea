//! # Payment Gateway Trait
//!
//! Seam between the checkout pipeline and the payment provider that issues
//! transaction tokens. The HTTP layer only sees `BoxedPaymentGateway`, so
//! tests can swap in an in-process gateway.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PaymentGateway (trait)                    │
//! │  ├── create_transaction()                                   │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │ MidtransSnap  │
//!                    │    Gateway    │
//!                    └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::transaction::{SnapTransaction, TransactionPayload};
use async_trait::async_trait;
use std::sync::Arc;

/// A payment provider that turns a transaction payload into a token.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a transaction and return the token and redirect URL.
    ///
    /// Failures, including non-success HTTP statuses, come back as
    /// `PaymentError::Gateway` carrying whatever status and body the provider
    /// supplied.
    async fn create_transaction(
        &self,
        payload: &TransactionPayload,
    ) -> PaymentResult<SnapTransaction>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
