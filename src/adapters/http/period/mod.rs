//! HTTP adapter for period endpoints.
//!
//! # Endpoints
//!
//! - `POST /api/periods` - Start a period
//! - `GET /api/periods` - List periods, most recent first
//! - `GET /api/periods/summary` - Recent periods and averages
//! - `GET /api/periods/:id` - Get one period
//! - `PATCH /api/periods/:id` - Correct a period's dates
//! - `POST /api/periods/:id/close` - Record a period's end

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use extract::{JsonBody, QueryParams};
pub use handlers::{health, PeriodHandlers};
pub use routes::period_routes;
