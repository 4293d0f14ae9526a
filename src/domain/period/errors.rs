//! Period-specific error types.

use std::fmt;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, PeriodId, ValidationError};

/// Why a lifecycle operation conflicts with the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// The user already has a record without an end date.
    OpenPeriodExists,
    /// The record already has an end date.
    AlreadyClosed,
    /// The record changed between read and write.
    ConcurrentModification,
}

impl ConflictReason {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConflictReason::OpenPeriodExists => ErrorCode::OpenPeriodExists,
            ConflictReason::AlreadyClosed => ErrorCode::PeriodAlreadyClosed,
            ConflictReason::ConcurrentModification => ErrorCode::ConcurrentModification,
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictReason::OpenPeriodExists => {
                "an open period already exists; close it before starting a new one"
            }
            ConflictReason::AlreadyClosed => "the period is already closed",
            ConflictReason::ConcurrentModification => {
                "the period was modified concurrently; reload and try again"
            }
        };
        f.write_str(s)
    }
}

/// Caller-visible errors of the record lifecycle.
///
/// None of these are retried by the core. Storage failures arrive as
/// `Infrastructure` and carry the store's own message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Malformed or inconsistent date input.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Record does not exist or belongs to another user.
    #[error("Period not found: {0}")]
    NotFound(PeriodId),

    /// Operation violates the lifecycle invariants.
    #[error("Conflict: {0}")]
    Conflict(ConflictReason),

    /// Storage failure propagated from a port.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl PeriodError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PeriodError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: PeriodId) -> Self {
        PeriodError::NotFound(id)
    }

    pub fn conflict(reason: ConflictReason) -> Self {
        PeriodError::Conflict(reason)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PeriodError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PeriodError::Validation { .. } => ErrorCode::ValidationFailed,
            PeriodError::NotFound(_) => ErrorCode::PeriodNotFound,
            PeriodError::Conflict(reason) => reason.code(),
            PeriodError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for PeriodError {
    fn from(err: ValidationError) -> Self {
        PeriodError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Ports only report storage failures; lifecycle conflicts arrive as
/// `WriteOutcome::Conflict` instead.
impl From<DomainError> for PeriodError {
    fn from(err: DomainError) -> Self {
        PeriodError::Infrastructure(err.to_string())
    }
}
