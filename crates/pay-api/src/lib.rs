//! # pay-api
//!
//! HTTP API layer for snap-checkout-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout endpoint that validates orders and creates Snap transactions
//! - Uniform `{ error, details }` error reporting
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Liveness text |
//! | GET | `/health` | Health check |
//! | POST | `/create-transaction` | Create Snap transaction |

pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
