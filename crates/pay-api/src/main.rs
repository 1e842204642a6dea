//! # Snap Checkout RS
//!
//! Checkout adapter for the Midtrans Snap payment gateway.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export MIDTRANS_SERVER_KEY=SB-Mid-server-...
//! export PORT=5000
//!
//! # Run the server
//! snap-checkout
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    // Print banner
    print_banner();

    // Initialize application state; a missing server key stops us here
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Validation: {:?}", state.policy.rules());
    info!("Payment provider: {}", state.gateway.provider_name());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("✅ Server running on port {}", addr.port());

    if !is_prod {
        info!("💳 Checkout: POST http://{}/create-transaction", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  💳 Snap Checkout RS
  ━━━━━━━━━━━━━━━━━━━━━━━
  Midtrans Snap adapter
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
