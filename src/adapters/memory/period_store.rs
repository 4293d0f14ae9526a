//! In-memory period store.
//!
//! Implements both `PeriodRepository` and `PeriodReader` over a single
//! `Mutex<HashMap>`. Every conditional write runs its check and its write
//! under one guard, so the store gives the same guarantees as the
//! PostgreSQL adapters. Data does not survive a restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PeriodId, Timestamp, UserId};
use crate::domain::period::PeriodRecord;
use crate::ports::{PeriodFilter, PeriodReader, PeriodRepository, WriteOutcome};

/// Thread-safe in-memory implementation of the period ports.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryPeriodStore::new());
/// let create = CreatePeriodHandler::new(store.clone());
/// let list = ListPeriodsHandler::new(store);
/// ```
#[derive(Default)]
pub struct InMemoryPeriodStore {
    records: Mutex<HashMap<PeriodId, PeriodRecord>>,
}

impl InMemoryPeriodStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, across all users.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn guard(&self) -> Result<MutexGuard<'_, HashMap<PeriodId, PeriodRecord>>, DomainError> {
        self.records
            .lock()
            .map_err(|_| DomainError::database("In-memory period store lock poisoned"))
    }
}

#[async_trait]
impl PeriodRepository for InMemoryPeriodStore {
    async fn insert_if_no_open(&self, record: &PeriodRecord) -> Result<WriteOutcome, DomainError> {
        let mut records = self.guard()?;

        let has_open = records
            .values()
            .any(|r| r.is_owned_by(record.user_id()) && r.is_open());
        if has_open && record.is_open() {
            return Ok(WriteOutcome::Conflict);
        }
        if records.contains_key(&record.id()) {
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
        let mut records = self.guard()?;

        match records.get(&record.id()) {
            Some(stored)
                if stored.is_owned_by(record.user_id())
                    && stored.updated_at() == expected_updated_at =>
            {
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
        let records = self.guard()?;
        Ok(records.get(id).filter(|r| r.is_owned_by(user_id)).cloned())
    }

    async fn list_closed_for_user(&self, user_id: &UserId) -> Result<Vec<PeriodRecord>, DomainError> {
        let records = self.guard()?;
        let mut closed: Vec<PeriodRecord> = records
            .values()
            .filter(|r| r.is_owned_by(user_id) && r.is_closed())
            .cloned()
            .collect();
        closed.sort_by_key(|r| r.start_date());
        Ok(closed)
    }
}

#[async_trait]
impl PeriodReader for InMemoryPeriodStore {
    async fn list_by_user(
        &self,
        user_id: &UserId,
        filter: &PeriodFilter,
    ) -> Result<Vec<PeriodRecord>, DomainError> {
        let records = self.guard()?;
        let mut matching: Vec<PeriodRecord> = records
            .values()
            .filter(|r| r.is_owned_by(user_id) && filter.matches(r))
            .cloned()
            .collect();
        drop(records);

        matching.sort_by(|a, b| b.start_date().cmp(&a.start_date()));
        Ok(matching
            .into_iter()
            .skip(filter.effective_offset() as usize)
            .take(filter.effective_limit() as usize)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn closed(owner: &UserId, start: NaiveDate, end: NaiveDate) -> PeriodRecord {
        let mut record = PeriodRecord::open(owner.clone(), start);
        record.close(end).unwrap();
        record
    }

    // ─────────────────────────────────────────────────────────────────────
    // Conditional insert
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn insert_rejects_second_open_record() {
        let store = InMemoryPeriodStore::new();
        let owner = user("u1");

        let first = store
            .insert_if_no_open(&PeriodRecord::open(owner.clone(), date(2024, 1, 1)))
            .await
            .unwrap();
        let second = store
            .insert_if_no_open(&PeriodRecord::open(owner, date(2024, 1, 2)))
            .await
            .unwrap();

        assert_eq!(first, WriteOutcome::Applied);
        assert_eq!(second, WriteOutcome::Conflict);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn closed_records_do_not_block_insert() {
        let store = InMemoryPeriodStore::new();
        let owner = user("u1");
        store
            .insert_if_no_open(&closed(&owner, date(2024, 1, 1), date(2024, 1, 5)))
            .await
            .unwrap();

        let outcome = store
            .insert_if_no_open(&PeriodRecord::open(owner, date(2024, 1, 29)))
            .await
            .unwrap();

        assert_eq!(outcome, WriteOutcome::Applied);
    }

    #[tokio::test]
    async fn concurrent_inserts_admit_exactly_one() {
        let store = Arc::new(InMemoryPeriodStore::new());
        let owner = user("u1");

        let mut tasks = Vec::new();
        for day in 1..=16 {
            let store = store.clone();
            let record = PeriodRecord::open(owner.clone(), date(2024, 1, day));
            tasks.push(tokio::spawn(async move {
                store.insert_if_no_open(&record).await.unwrap()
            }));
        }

        let mut applied = 0;
        for task in tasks {
            if task.await.unwrap().is_applied() {
                applied += 1;
            }
        }
        assert_eq!(applied, 1);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Conditional update
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn update_applies_against_current_snapshot() {
        let store = InMemoryPeriodStore::new();
        let owner = user("u1");
        let record = PeriodRecord::open(owner.clone(), date(2024, 1, 1));
        store.insert_if_no_open(&record).await.unwrap();

        let snapshot = record.updated_at();
        let mut updated = record.clone();
        updated.close(date(2024, 1, 5)).unwrap();

        let outcome = store.update_if_unchanged(&updated, snapshot).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Applied);

        let stored = store.find_by_id(&owner, &record.id()).await.unwrap().unwrap();
        assert!(stored.is_closed());
    }

    #[tokio::test]
    async fn stale_snapshot_is_rejected() {
        let store = InMemoryPeriodStore::new();
        let record = PeriodRecord::open(user("u1"), date(2024, 1, 1));
        store.insert_if_no_open(&record).await.unwrap();
        let stale = Timestamp::from_datetime(
            *record.updated_at().as_datetime() - chrono::Duration::seconds(1),
        );

        let mut updated = record.clone();
        updated.close(date(2024, 1, 5)).unwrap();

        let outcome = store.update_if_unchanged(&updated, stale).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Conflict);
    }

    #[tokio::test]
    async fn update_of_missing_record_is_rejected() {
        let store = InMemoryPeriodStore::new();
        let record = PeriodRecord::open(user("u1"), date(2024, 1, 1));

        let outcome = store
            .update_if_unchanged(&record, record.updated_at())
            .await
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Conflict);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn find_is_scoped_to_owner() {
        let store = InMemoryPeriodStore::new();
        let record = PeriodRecord::open(user("owner"), date(2024, 1, 1));
        store.insert_if_no_open(&record).await.unwrap();

        let found = store.find_by_id(&user("owner"), &record.id()).await.unwrap();
        let foreign = store.find_by_id(&user("other"), &record.id()).await.unwrap();

        assert!(found.is_some());
        assert!(foreign.is_none());
    }

    #[tokio::test]
    async fn closed_history_is_ascending_and_excludes_open() {
        let store = InMemoryPeriodStore::new();
        let owner = user("u1");
        for record in [
            closed(&owner, date(2024, 2, 26), date(2024, 3, 1)),
            closed(&owner, date(2024, 1, 1), date(2024, 1, 5)),
            closed(&owner, date(2024, 1, 29), date(2024, 2, 2)),
            PeriodRecord::open(owner.clone(), date(2024, 3, 25)),
        ] {
            store.insert_if_no_open(&record).await.unwrap();
        }

        let history = store.list_closed_for_user(&owner).await.unwrap();
        let starts: Vec<_> = history.iter().map(|r| r.start_date()).collect();

        assert_eq!(
            starts,
            vec![date(2024, 1, 1), date(2024, 1, 29), date(2024, 2, 26)]
        );
    }

    #[tokio::test]
    async fn listing_is_descending_and_paged() {
        let store = InMemoryPeriodStore::new();
        let owner = user("u1");
        for (start, end) in [((1, 1), (1, 5)), ((1, 29), (2, 2)), ((2, 26), (3, 1))] {
            let record = closed(&owner, date(2024, start.0, start.1), date(2024, end.0, end.1));
            store.insert_if_no_open(&record).await.unwrap();
        }

        let page = store
            .list_by_user(&owner, &PeriodFilter::default().with_page(1, 1))
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].start_date(), date(2024, 1, 29));
    }
}
