//! HTTP adapters - REST API implementations.
//!
//! `router` assembles the period endpoints behind the bearer-token
//! middleware, plus an unauthenticated `/health` probe. Transport layers
//! (tracing, timeouts, CORS) are added by the binary.

pub mod middleware;
pub mod period;

use axum::{middleware::from_fn_with_state, routing::get, Router};

pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use period::{period_routes, PeriodHandlers};

/// Builds the application router.
pub fn router(handlers: PeriodHandlers, validator: AuthState) -> Router {
    let api = Router::new()
        .nest("/api/periods", period_routes(handlers))
        .layer(from_fn_with_state(validator, auth_middleware));

    Router::new()
        .route("/health", get(period::health))
        .merge(api)
}
