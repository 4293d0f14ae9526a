//! HTTP routes for period endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    close_period, create_period, edit_period, get_period, get_period_summary, list_periods,
    PeriodHandlers,
};

/// Creates the period router, to be nested under `/api/periods`.
pub fn period_routes(handlers: PeriodHandlers) -> Router {
    Router::new()
        .route("/", post(create_period).get(list_periods))
        .route("/summary", get(get_period_summary))
        .route("/:id", get(get_period).patch(edit_period))
        .route("/:id/close", post(close_period))
        .with_state(handlers)
}
