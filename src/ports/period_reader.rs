//! Period reader port (read side / queries).
//!
//! Read-only listing of a user's records for calendars and history views.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, UserId, ValidationError};
use crate::domain::period::PeriodRecord;

/// Default page size when no limit is given.
pub const DEFAULT_LIMIT: u32 = 100;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 500;

/// Reader port for period queries.
#[async_trait]
pub trait PeriodReader: Send + Sync {
    /// List a user's records matching `filter`, most recent start first.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        filter: &PeriodFilter,
    ) -> Result<Vec<PeriodRecord>, DomainError>;
}

/// Filter and paging options for listing records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFilter {
    /// Only records starting on or after this date.
    pub start_from: Option<NaiveDate>,

    /// Only records starting on or before this date.
    pub start_until: Option<NaiveDate>,

    /// Number of results to skip.
    pub offset: Option<u32>,

    /// Maximum number of results to return.
    pub limit: Option<u32>,
}

impl PeriodFilter {
    /// Filter for one calendar range, e.g. a month view.
    pub fn between(start_from: NaiveDate, start_until: NaiveDate) -> Self {
        Self {
            start_from: Some(start_from),
            start_until: Some(start_until),
            ..Default::default()
        }
    }

    pub fn with_page(mut self, offset: u32, limit: u32) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    pub fn effective_offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    /// Checks the date bounds are ordered and the limit is usable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(from), Some(until)) = (self.start_from, self.start_until) {
            if until < from {
                return Err(ValidationError::out_of_order("start_until", "start_from"));
            }
        }
        if self.limit == Some(0) {
            return Err(ValidationError::invalid_format("limit", "must be at least 1"));
        }
        Ok(())
    }

    /// Whether `record` falls inside the date bounds (paging not applied).
    pub fn matches(&self, record: &PeriodRecord) -> bool {
        let start = record.start_date();
        self.start_from.map_or(true, |from| start >= from)
            && self.start_until.map_or(true, |until| start <= until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn period_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn PeriodReader) {}
    }

    #[test]
    fn defaults_apply_when_unset() {
        let filter = PeriodFilter::default();
        assert_eq!(filter.effective_offset(), 0);
        assert_eq!(filter.effective_limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn limit_is_capped() {
        let filter = PeriodFilter::default().with_page(10, 10_000);
        assert_eq!(filter.effective_limit(), MAX_LIMIT);
        assert_eq!(filter.effective_offset(), 10);
    }

    #[test]
    fn reversed_bounds_are_invalid() {
        let filter = PeriodFilter::between(date(2024, 2, 1), date(2024, 1, 1));
        assert!(filter.validate().is_err());
    }

    #[test]
    fn zero_limit_is_invalid() {
        let filter = PeriodFilter::default().with_page(0, 0);
        assert!(filter.validate().is_err());
    }

    #[test]
    fn matches_is_inclusive_on_both_ends() {
        let filter = PeriodFilter::between(date(2024, 1, 1), date(2024, 1, 31));
        let user = UserId::new("u").unwrap();

        assert!(filter.matches(&PeriodRecord::open(user.clone(), date(2024, 1, 1))));
        assert!(filter.matches(&PeriodRecord::open(user.clone(), date(2024, 1, 31))));
        assert!(!filter.matches(&PeriodRecord::open(user.clone(), date(2024, 2, 1))));
        assert!(!filter.matches(&PeriodRecord::open(user, date(2023, 12, 31))));
    }
}
