//! Top-level application router.

use axum::{middleware, routing::get, Router};

use super::booking::{booking_routes, BookingAppState};
use super::middleware::{auth_middleware, AuthState};

/// GET /health - Liveness probe
async fn health() -> &'static str {
    "ok"
}

/// Builds the full router: booking routes behind the auth middleware plus
/// the unauthenticated health probe.
///
/// Transport layers (tracing, timeouts, CORS) are added by the binary.
pub fn app_router(state: BookingAppState, validator: AuthState) -> Router {
    booking_routes()
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .route("/health", get(health))
        .with_state(state)
}
