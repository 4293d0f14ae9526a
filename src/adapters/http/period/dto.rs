//! HTTP DTOs for period endpoints.
//!
//! Dates cross the wire as `YYYY-MM-DD` strings. Request dates arrive as raw
//! strings so that a malformed date is reported as a validation error naming
//! the offending field. Bodies that are not JSON, or carry a non-string date,
//! are rejected by `extract::JsonBody` with the same error shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::period::{
    parse_calendar_date, parse_optional_calendar_date, PeriodError, PeriodPatch, PeriodRecord,
    PeriodStatus, PeriodSummary, SummaryEntry, SummarySpan,
};
use crate::ports::PeriodFilter;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a period.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePeriodRequest {
    #[serde(default)]
    pub start_date: Option<String>,
}

impl CreatePeriodRequest {
    pub fn start_date(&self) -> Result<NaiveDate, PeriodError> {
        Ok(parse_calendar_date(
            "start_date",
            self.start_date.as_deref().unwrap_or_default(),
        )?)
    }
}

/// Request to close a period.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClosePeriodRequest {
    #[serde(default)]
    pub end_date: Option<String>,
}

impl ClosePeriodRequest {
    pub fn end_date(&self) -> Result<NaiveDate, PeriodError> {
        Ok(parse_calendar_date(
            "end_date",
            self.end_date.as_deref().unwrap_or_default(),
        )?)
    }
}

/// Partial update; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditPeriodRequest {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl EditPeriodRequest {
    pub fn to_patch(&self) -> Result<PeriodPatch, PeriodError> {
        Ok(PeriodPatch {
            start_date: parse_optional_calendar_date("start_date", self.start_date.as_deref())?,
            end_date: parse_optional_calendar_date("end_date", self.end_date.as_deref())?,
        })
    }
}

/// Query parameters for listing periods.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPeriodsParams {
    #[serde(default)]
    pub start_from: Option<String>,
    #[serde(default)]
    pub start_until: Option<String>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListPeriodsParams {
    pub fn to_filter(&self) -> Result<PeriodFilter, PeriodError> {
        Ok(PeriodFilter {
            start_from: parse_optional_calendar_date("start_from", self.start_from.as_deref())?,
            start_until: parse_optional_calendar_date("start_until", self.start_until.as_deref())?,
            offset: self.offset,
            limit: self.limit,
        })
    }
}

/// Query parameters for the summary endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryParams {
    #[serde(default)]
    pub span: Option<String>,
}

impl SummaryParams {
    pub fn span(&self) -> Result<SummarySpan, PeriodError> {
        match self.span.as_deref() {
            None => Ok(SummarySpan::default()),
            Some(raw) => Ok(raw.parse::<SummarySpan>()?),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A single period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodResponse {
    pub id: String,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: PeriodStatus,
    pub predicted_period_end_date: Option<NaiveDate>,
    pub predicted_next_start_date: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PeriodRecord> for PeriodResponse {
    fn from(record: PeriodRecord) -> Self {
        Self {
            id: record.id().to_string(),
            user_id: record.user_id().to_string(),
            start_date: record.start_date(),
            end_date: record.end_date(),
            status: record.status(),
            predicted_period_end_date: record.predicted_period_end_date(),
            predicted_next_start_date: record.predicted_next_start_date(),
            created_at: record.created_at().as_datetime().to_rfc3339(),
            updated_at: record.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Page of periods, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodListResponse {
    pub items: Vec<PeriodResponse>,
    pub count: usize,
}

impl From<Vec<PeriodRecord>> for PeriodListResponse {
    fn from(records: Vec<PeriodRecord>) -> Self {
        let items: Vec<PeriodResponse> = records.into_iter().map(Into::into).collect();
        Self {
            count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntryResponse {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
}

impl From<SummaryEntry> for SummaryEntryResponse {
    fn from(entry: SummaryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            start_date: entry.start_date,
            end_date: entry.end_date,
            duration_days: entry.duration_days,
        }
    }
}

/// Look-back summary with the user's current averages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummaryResponse {
    pub span: String,
    pub since: NaiveDate,
    pub periods: Vec<SummaryEntryResponse>,
    pub avg_period_length: u32,
    pub avg_cycle_length: u32,
}

impl From<PeriodSummary> for PeriodSummaryResponse {
    fn from(summary: PeriodSummary) -> Self {
        Self {
            span: summary.span.to_string(),
            since: summary.since,
            periods: summary.periods.into_iter().map(Into::into).collect(),
            avg_period_length: summary.statistics.avg_period_length,
            avg_cycle_length: summary.statistics.avg_cycle_length,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError, "Internal server error")
    }
}

impl From<&PeriodError> for ErrorResponse {
    fn from(error: &PeriodError) -> Self {
        match error {
            PeriodError::Validation { field, message } => {
                ErrorResponse::new(error.code(), message.clone())
                    .with_details(serde_json::json!({ "field": field }))
            }
            PeriodError::Infrastructure(_) => ErrorResponse::internal(),
            other => ErrorResponse::new(other.code(), other.to_string()),
        }
    }
}
