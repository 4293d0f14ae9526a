//! Period repository port (write side).
//!
//! Defines the contract for persisting and retrieving period records.
//!
//! # Design
//!
//! - **Conditional writes**: the one-open-record invariant and the
//!   read-modify-write of close/edit are enforced by the store, not by a
//!   separate read followed by a write
//! - **Ownership-scoped reads**: a record owned by another user is reported
//!   exactly like a missing one

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PeriodId, Timestamp, UserId};
use crate::domain::period::PeriodRecord;

/// Result of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The write was applied.
    Applied,
    /// The precondition did not hold; nothing was written.
    Conflict,
}

impl WriteOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied)
    }
}

/// Repository port for period record persistence.
#[async_trait]
pub trait PeriodRepository: Send + Sync {
    /// Insert a new record unless its owner already has an open one.
    ///
    /// Must be a single atomic operation: two concurrent inserts for the
    /// same user can never both be `Applied`.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert_if_no_open(&self, record: &PeriodRecord) -> Result<WriteOutcome, DomainError>;

    /// Replace a stored record, provided its stored `updated_at` still equals
    /// `expected_updated_at`.
    ///
    /// Returns `Conflict` when the record changed since it was read or no
    /// longer exists.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn update_if_unchanged(
        &self,
        record: &PeriodRecord,
        expected_updated_at: Timestamp,
    ) -> Result<WriteOutcome, DomainError>;

    /// Find a record by ID, scoped to its owner.
    ///
    /// Returns `None` if the record does not exist or belongs to someone else.
    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &PeriodId,
    ) -> Result<Option<PeriodRecord>, DomainError>;

    /// All closed records of a user, ordered by `start_date` ascending.
    async fn list_closed_for_user(&self, user_id: &UserId) -> Result<Vec<PeriodRecord>, DomainError>;
}
