//! # pay-midtrans
//!
//! Midtrans Snap gateway for snap-checkout-rs.
//!
//! `MidtransSnapGateway` implements `pay_core::PaymentGateway` on top of the
//! Snap transaction API:
//! - `Authorization: Basic base64(server_key + ":")`
//! - JSON transaction payload in, `{ token, redirect_url }` out
//! - Non-success statuses surface as `PaymentError::Gateway` with the
//!   provider's status and body
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_midtrans::MidtransSnapGateway;
//! use pay_core::PaymentGateway;
//!
//! // Reads MIDTRANS_SERVER_KEY (and optional overrides) from the environment
//! let gateway = MidtransSnapGateway::from_env()?;
//!
//! let snap = gateway.create_transaction(&payload).await?;
//! // Hand snap.token / snap.redirect_url to the client
//! ```

pub mod config;
pub mod snap;

// Re-exports
pub use config::{MidtransConfig, PRODUCTION_SNAP_URL, SANDBOX_SNAP_URL};
pub use snap::MidtransSnapGateway;
