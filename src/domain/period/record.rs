//! PeriodRecord aggregate.
//!
//! One record per logged cycle. A record belongs to exactly one user and
//! carries derived prediction fields that are recomputed whenever its dates
//! change.
//!
//! # Invariants
//!
//! - `end_date`, when set, is never before `start_date`
//! - once closed, a record is never reopened
//! - `predicted_*` fields are only written through [`PeriodRecord::apply_prediction`]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{ConflictReason, PeriodError};
use super::prediction::Prediction;
use super::status::PeriodStatus;
use crate::domain::foundation::{PeriodId, Timestamp, UserId, ValidationError};

/// Partial update of a record's editable fields.
///
/// Only the dates are editable. Omitted fields keep their stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPatch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl PeriodPatch {
    pub fn start_date(date: NaiveDate) -> Self {
        Self {
            start_date: Some(date),
            end_date: None,
        }
    }

    pub fn end_date(date: NaiveDate) -> Self {
        Self {
            start_date: None,
            end_date: Some(date),
        }
    }

    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

/// A single logged menstrual cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    id: PeriodId,
    user_id: UserId,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    predicted_next_start_date: Option<NaiveDate>,
    predicted_period_end_date: Option<NaiveDate>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl PeriodRecord {
    /// Starts a new open record for `user_id`.
    ///
    /// Predictions are left empty; the caller derives them from the user's
    /// history before persisting.
    pub fn open(user_id: UserId, start_date: NaiveDate) -> Self {
        let now = Timestamp::now();
        Self {
            id: PeriodId::new(),
            user_id,
            start_date,
            end_date: None,
            predicted_next_start_date: None,
            predicted_period_end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a record from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PeriodId,
        user_id: UserId,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        predicted_next_start_date: Option<NaiveDate>,
        predicted_period_end_date: Option<NaiveDate>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            start_date,
            end_date,
            predicted_next_start_date,
            predicted_period_end_date,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> PeriodId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn predicted_next_start_date(&self) -> Option<NaiveDate> {
        self.predicted_next_start_date
    }

    pub fn predicted_period_end_date(&self) -> Option<NaiveDate> {
        self.predicted_period_end_date
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn status(&self) -> PeriodStatus {
        if self.end_date.is_some() {
            PeriodStatus::Closed
        } else {
            PeriodStatus::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.status().is_open()
    }

    pub fn is_closed(&self) -> bool {
        self.status().is_closed()
    }

    /// Days spanned by a closed record, counting both endpoints.
    pub fn period_length(&self) -> Option<i64> {
        self.end_date
            .map(|end| (end - self.start_date).num_days() + 1)
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records the end of the period, moving it from Open to Closed.
    ///
    /// # Errors
    ///
    /// - `Conflict(AlreadyClosed)` if an end date is already set
    /// - `Validation` if `end_date` is before `start_date`
    pub fn close(&mut self, end_date: NaiveDate) -> Result<(), PeriodError> {
        if !self.status().can_transition_to(&PeriodStatus::Closed) {
            return Err(PeriodError::conflict(ConflictReason::AlreadyClosed));
        }
        ensure_ordered(self.start_date, Some(end_date))?;

        self.end_date = Some(end_date);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Merges `patch` into the record, then validates the merged dates.
    ///
    /// Nothing is modified when validation fails. Returns `true` when the
    /// patch supplied at least one date, meaning predictions must be
    /// re-derived.
    ///
    /// # Errors
    ///
    /// - `Validation` if the merged end date is before the merged start date
    pub fn apply_patch(&mut self, patch: &PeriodPatch) -> Result<bool, PeriodError> {
        if patch.is_empty() {
            return Ok(false);
        }

        let start_date = patch.start_date.unwrap_or(self.start_date);
        let end_date = patch.end_date.or(self.end_date);
        ensure_ordered(start_date, end_date)?;

        self.start_date = start_date;
        self.end_date = end_date;
        self.updated_at = Timestamp::now();
        Ok(true)
    }

    /// Overwrites both derived fields.
    pub fn apply_prediction(&mut self, prediction: Prediction) {
        self.predicted_period_end_date = prediction.predicted_period_end_date;
        self.predicted_next_start_date = prediction.predicted_next_start_date;
    }
}

fn ensure_ordered(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<(), PeriodError> {
    match end_date {
        Some(end) if end < start_date => {
            Err(ValidationError::out_of_order("end_date", "start_date").into())
        }
        _ => Ok(()),
    }
}
