//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::response::panic_response;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /                    - Liveness text
/// - GET  /health              - Health check (JSON)
/// - POST /create-transaction  - Validate checkout and create a Snap transaction
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/create-transaction", post(handlers::create_transaction));

    with_middleware(routes).with_state(state)
}

/// Tracing, CORS and panic boundary, outermost first
pub(crate) fn with_middleware(router: Router<AppState>) -> Router<AppState> {
    // Any origin is accepted; the browser gets its own origin echoed back
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}
