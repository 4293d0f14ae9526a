//! HTTP handlers for period endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::period::{
    ClosePeriodCommand, ClosePeriodHandler, CreatePeriodCommand, CreatePeriodHandler,
    EditPeriodCommand, EditPeriodHandler, GetPeriodHandler, GetPeriodQuery,
    GetPeriodSummaryHandler, GetPeriodSummaryQuery, ListPeriodsHandler, ListPeriodsQuery,
};
use crate::domain::foundation::{ErrorCode, PeriodId};
use crate::domain::period::PeriodError;
use crate::ports::{PeriodReader, PeriodRepository};

use super::dto::{
    ClosePeriodRequest, CreatePeriodRequest, EditPeriodRequest, ErrorResponse, ListPeriodsParams,
    PeriodListResponse, PeriodResponse, PeriodSummaryResponse, SummaryParams,
};
use super::extract::{JsonBody, QueryParams};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PeriodHandlers {
    create_handler: Arc<CreatePeriodHandler>,
    close_handler: Arc<ClosePeriodHandler>,
    edit_handler: Arc<EditPeriodHandler>,
    get_handler: Arc<GetPeriodHandler>,
    list_handler: Arc<ListPeriodsHandler>,
    summary_handler: Arc<GetPeriodSummaryHandler>,
}

impl PeriodHandlers {
    pub fn new(
        create_handler: Arc<CreatePeriodHandler>,
        close_handler: Arc<ClosePeriodHandler>,
        edit_handler: Arc<EditPeriodHandler>,
        get_handler: Arc<GetPeriodHandler>,
        list_handler: Arc<ListPeriodsHandler>,
        summary_handler: Arc<GetPeriodSummaryHandler>,
    ) -> Self {
        Self {
            create_handler,
            close_handler,
            edit_handler,
            get_handler,
            list_handler,
            summary_handler,
        }
    }

    /// Wires every handler to one repository and one reader.
    pub fn from_ports(repository: Arc<dyn PeriodRepository>, reader: Arc<dyn PeriodReader>) -> Self {
        Self::new(
            Arc::new(CreatePeriodHandler::new(repository.clone())),
            Arc::new(ClosePeriodHandler::new(repository.clone())),
            Arc::new(EditPeriodHandler::new(repository.clone())),
            Arc::new(GetPeriodHandler::new(repository.clone())),
            Arc::new(ListPeriodsHandler::new(reader)),
            Arc::new(GetPeriodSummaryHandler::new(repository)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/periods - Start a new period
pub async fn create_period(
    State(handlers): State<PeriodHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<CreatePeriodRequest>,
) -> Response {
    let start_date = match req.start_date() {
        Ok(date) => date,
        Err(e) => return handle_period_error(e),
    };

    let cmd = CreatePeriodCommand {
        user_id: user.id,
        start_date,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(record) => (StatusCode::CREATED, Json(PeriodResponse::from(record))).into_response(),
        Err(e) => handle_period_error(e),
    }
}

/// GET /api/periods - List the user's periods, most recent first
pub async fn list_periods(
    State(handlers): State<PeriodHandlers>,
    RequireAuth(user): RequireAuth,
    QueryParams(params): QueryParams<ListPeriodsParams>,
) -> Response {
    let filter = match params.to_filter() {
        Ok(filter) => filter,
        Err(e) => return handle_period_error(e),
    };

    let query = ListPeriodsQuery {
        user_id: user.id,
        filter,
    };

    match handlers.list_handler.handle(query).await {
        Ok(records) => (StatusCode::OK, Json(PeriodListResponse::from(records))).into_response(),
        Err(e) => handle_period_error(e),
    }
}

/// GET /api/periods/summary - Recent periods and current averages
pub async fn get_period_summary(
    State(handlers): State<PeriodHandlers>,
    RequireAuth(user): RequireAuth,
    QueryParams(params): QueryParams<SummaryParams>,
) -> Response {
    let span = match params.span() {
        Ok(span) => span,
        Err(e) => return handle_period_error(e),
    };

    let query = GetPeriodSummaryQuery {
        user_id: user.id,
        span,
        today: Utc::now().date_naive(),
    };

    match handlers.summary_handler.handle(query).await {
        Ok(summary) => {
            (StatusCode::OK, Json(PeriodSummaryResponse::from(summary))).into_response()
        }
        Err(e) => handle_period_error(e),
    }
}

/// GET /api/periods/:id - Get a single period
pub async fn get_period(
    State(handlers): State<PeriodHandlers>,
    RequireAuth(user): RequireAuth,
    Path(period_id): Path<String>,
) -> Response {
    let period_id = match parse_period_id(&period_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetPeriodQuery {
        user_id: user.id,
        period_id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(record) => (StatusCode::OK, Json(PeriodResponse::from(record))).into_response(),
        Err(e) => handle_period_error(e),
    }
}

/// POST /api/periods/:id/close - Record the end of a period
pub async fn close_period(
    State(handlers): State<PeriodHandlers>,
    RequireAuth(user): RequireAuth,
    Path(period_id): Path<String>,
    JsonBody(req): JsonBody<ClosePeriodRequest>,
) -> Response {
    let period_id = match parse_period_id(&period_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let end_date = match req.end_date() {
        Ok(date) => date,
        Err(e) => return handle_period_error(e),
    };

    let cmd = ClosePeriodCommand {
        user_id: user.id,
        period_id,
        end_date,
    };

    match handlers.close_handler.handle(cmd).await {
        Ok(record) => (StatusCode::OK, Json(PeriodResponse::from(record))).into_response(),
        Err(e) => handle_period_error(e),
    }
}

/// PATCH /api/periods/:id - Correct a period's dates
pub async fn edit_period(
    State(handlers): State<PeriodHandlers>,
    RequireAuth(user): RequireAuth,
    Path(period_id): Path<String>,
    JsonBody(req): JsonBody<EditPeriodRequest>,
) -> Response {
    let period_id = match parse_period_id(&period_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let patch = match req.to_patch() {
        Ok(patch) => patch,
        Err(e) => return handle_period_error(e),
    };

    let cmd = EditPeriodCommand {
        user_id: user.id,
        period_id,
        patch,
    };

    match handlers.edit_handler.handle(cmd).await {
        Ok(record) => (StatusCode::OK, Json(PeriodResponse::from(record))).into_response(),
        Err(e) => handle_period_error(e),
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

#[allow(clippy::result_large_err)]
fn parse_period_id(raw: &str) -> Result<PeriodId, Response> {
    raw.parse::<PeriodId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::new(ErrorCode::InvalidFormat, "Invalid period ID")
                    .with_details(serde_json::json!({ "field": "id" })),
            ),
        )
            .into_response()
    })
}

fn handle_period_error(error: PeriodError) -> Response {
    let status = match &error {
        PeriodError::Validation { .. } => StatusCode::BAD_REQUEST,
        PeriodError::NotFound(_) => StatusCode::NOT_FOUND,
        PeriodError::Conflict(_) => StatusCode::CONFLICT,
        PeriodError::Infrastructure(msg) => {
            tracing::error!("Period request failed: {}", msg);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::from(&error))).into_response()
}
