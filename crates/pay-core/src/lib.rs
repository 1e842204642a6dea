//! # pay-core
//!
//! Core types and traits for the snap-checkout payment adapter.
//!
//! This crate provides:
//! - `CheckoutRequest` and `LineItem` for the inbound order
//! - `ValidationPolicy` for the configurable validation pipeline
//! - `reconcile` for verifying the declared total against the items
//! - `PaymentCategory` and `enabled_payments` for channel restriction
//! - `TransactionBuilder` for the gateway payload
//! - `PaymentGateway` trait for implementing payment providers
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{CheckoutRequest, LineItem, TransactionBuilder, ValidationPolicy};
//!
//! let request = CheckoutRequest::new("buyer42", vec![LineItem::new(1, 1000.0, 2, "A")])
//!     .with_total(2000.0)
//!     .with_payment_type("e_wallet");
//!
//! let checkout = ValidationPolicy::standard().validate(&request)?;
//! let payload = TransactionBuilder::new(&checkout).build();
//!
//! let snap = gateway.create_transaction(&payload).await?;
//! // Hand snap.token to the client
//! ```

pub mod error;
pub mod gateway;
pub mod order;
pub mod payment;
pub mod reconcile;
pub mod transaction;
pub mod validation;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use order::{CheckoutRequest, ItemId, LineItem, ValidCheckout};
pub use payment::{enabled_payments, PaymentCategory, UnknownPaymentCategory};
pub use reconcile::{
    calculated_total, reconcile, reconcile_against, ReconciledAmount, AMOUNT_TOLERANCE,
};
pub use transaction::{
    generate_order_id, CustomerDetails, ItemDetail, SnapTransaction, TransactionBuilder,
    TransactionDetails, TransactionPayload,
};
pub use validation::{CheckoutRule, ValidationMode, ValidationPolicy};
