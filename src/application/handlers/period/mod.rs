//! Period handlers - Commands and queries for the record lifecycle.
//!
//! Commands (create, close, edit) recompute statistics from the user's
//! stored history on every call and persist through conditional writes.
//! Queries (get, list, summary) are pure reads.

mod close_period;
mod create_period;
mod edit_period;
mod get_period;
mod get_period_summary;
mod list_periods;
mod refresh;

pub use close_period::{ClosePeriodCommand, ClosePeriodHandler};
pub use create_period::{CreatePeriodCommand, CreatePeriodHandler};
pub use edit_period::{EditPeriodCommand, EditPeriodHandler};
pub use get_period::{GetPeriodHandler, GetPeriodQuery};
pub use get_period_summary::{GetPeriodSummaryHandler, GetPeriodSummaryQuery};
pub use list_periods::{ListPeriodsHandler, ListPeriodsQuery};

#[cfg(test)]
pub(crate) mod test_support {
    //! Mutex-backed repository mock shared by the handler tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::domain::foundation::{DomainError, PeriodId, Timestamp, UserId};
    use crate::domain::period::PeriodRecord;
    use crate::ports::{PeriodFilter, PeriodReader, PeriodRepository, WriteOutcome};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    /// A closed record as it would come back from storage.
    pub fn closed(user_id: &UserId, start: NaiveDate, end: NaiveDate) -> PeriodRecord {
        let now = Timestamp::now();
        PeriodRecord::reconstitute(
            PeriodId::new(),
            user_id.clone(),
            start,
            Some(end),
            None,
            None,
            now,
            now,
        )
    }

    pub struct MockPeriodRepository {
        records: Mutex<HashMap<PeriodId, PeriodRecord>>,
        fail_reads: bool,
        fail_writes: bool,
        reject_updates: bool,
    }

    impl MockPeriodRepository {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
                fail_reads: false,
                fail_writes: false,
                reject_updates: false,
            }
        }

        pub fn with_records(records: Vec<PeriodRecord>) -> Self {
            let repo = Self::new();
            for record in records {
                repo.seed(record);
            }
            repo
        }

        pub fn failing_reads(mut self) -> Self {
            self.fail_reads = true;
            self
        }

        pub fn failing_writes(mut self) -> Self {
            self.fail_writes = true;
            self
        }

        /// Simulates another writer winning every race.
        pub fn rejecting_updates(mut self) -> Self {
            self.reject_updates = true;
            self
        }

        pub fn seed(&self, record: PeriodRecord) {
            self.records.lock().unwrap().insert(record.id(), record);
        }

        pub fn stored(&self, id: &PeriodId) -> Option<PeriodRecord> {
            self.records.lock().unwrap().get(id).cloned()
        }

        pub fn count(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        fn check_read(&self) -> Result<(), DomainError> {
            if self.fail_reads {
                return Err(DomainError::database("connection refused"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PeriodRepository for MockPeriodRepository {
        async fn insert_if_no_open(
            &self,
            record: &PeriodRecord,
        ) -> Result<WriteOutcome, DomainError> {
            if self.fail_writes {
                return Err(DomainError::database("disk full"));
            }
            let mut records = self.records.lock().unwrap();
            if records
                .values()
                .any(|r| r.is_owned_by(record.user_id()) && r.is_open())
            {
                return Ok(WriteOutcome::Conflict);
            }
            records.insert(record.id(), record.clone());
            Ok(WriteOutcome::Applied)
        }

        async fn update_if_unchanged(
            &self,
            record: &PeriodRecord,
            expected_updated_at: Timestamp,
        ) -> Result<WriteOutcome, DomainError> {
            if self.fail_writes {
                return Err(DomainError::database("disk full"));
            }
            if self.reject_updates {
                return Ok(WriteOutcome::Conflict);
            }
            let mut records = self.records.lock().unwrap();
            match records.get(&record.id()) {
                Some(stored) if stored.updated_at() == expected_updated_at => {
                    records.insert(record.id(), record.clone());
                    Ok(WriteOutcome::Applied)
                }
                _ => Ok(WriteOutcome::Conflict),
            }
        }

        async fn find_by_id(
            &self,
            user_id: &UserId,
            id: &PeriodId,
        ) -> Result<Option<PeriodRecord>, DomainError> {
            self.check_read()?;
            Ok(self
                .records
                .lock()
                .unwrap()
                .get(id)
                .filter(|r| r.is_owned_by(user_id))
                .cloned())
        }

        async fn list_closed_for_user(
            &self,
            user_id: &UserId,
        ) -> Result<Vec<PeriodRecord>, DomainError> {
            self.check_read()?;
            let mut closed: Vec<PeriodRecord> = self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.is_owned_by(user_id) && r.is_closed())
                .cloned()
                .collect();
            closed.sort_by_key(|r| r.start_date());
            Ok(closed)
        }
    }

    #[async_trait]
    impl PeriodReader for MockPeriodRepository {
        async fn list_by_user(
            &self,
            user_id: &UserId,
            filter: &PeriodFilter,
        ) -> Result<Vec<PeriodRecord>, DomainError> {
            self.check_read()?;
            let mut matching: Vec<PeriodRecord> = self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.is_owned_by(user_id) && filter.matches(r))
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.start_date().cmp(&a.start_date()));
            Ok(matching
                .into_iter()
                .skip(filter.effective_offset() as usize)
                .take(filter.effective_limit() as usize)
                .collect())
        }
    }
}
