//! # Routes
//!
//! Axum router configuration for the billing API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
///   - GET  /test - Liveness check
///   - POST /billing/price - Price a list of items
pub fn create_router(state: AppState) -> Router {
    let billing_routes = Router::new().route("/price", post(handlers::price_bill));

    Router::new()
        .route("/test", get(handlers::liveness))
        .nest("/billing", billing_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}

/// Any origin, method and header, with credentials.
///
/// A wildcard cannot be combined with credentials, so each list mirrors the
/// request instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
