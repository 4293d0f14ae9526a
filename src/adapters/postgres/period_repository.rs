//! PostgreSQL implementation of PeriodRepository.
//!
//! The one-open-period rule is backed by the partial unique index
//! `periods_one_open_per_user`; inserts use `ON CONFLICT DO NOTHING` and
//! report a skipped row as `WriteOutcome::Conflict`. Updates compare the
//! stored `updated_at` inside the `WHERE` clause.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, PeriodId, Timestamp, UserId};
use crate::domain::period::PeriodRecord;
use crate::ports::{PeriodRepository, WriteOutcome};

/// Column list shared by every `SELECT` on `periods`.
pub(super) const PERIOD_COLUMNS: &str = "id, user_id, start_date, end_date, \
     predicted_next_start_date, predicted_period_end_date, created_at, updated_at";

/// PostgreSQL implementation of PeriodRepository.
#[derive(Clone)]
pub struct PostgresPeriodRepository {
    pool: PgPool,
}

impl PostgresPeriodRepository {
    /// Creates a new PostgresPeriodRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PeriodRepository for PostgresPeriodRepository {
    async fn insert_if_no_open(&self, record: &PeriodRecord) -> Result<WriteOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO periods (
                id, user_id, start_date, end_date,
                predicted_next_start_date, predicted_period_end_date,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.user_id().as_str())
        .bind(record.start_date())
        .bind(record.end_date())
        .bind(record.predicted_next_start_date())
        .bind(record.predicted_period_end_date())
        .bind(record.created_at().as_datetime())
        .bind(record.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to insert period: {}", e)))?;

        Ok(outcome(result.rows_affected()))
    }

    async fn update_if_unchanged(
        &self,
        record: &PeriodRecord,
        expected_updated_at: Timestamp,
    ) -> Result<WriteOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE periods SET
                start_date = $3,
                end_date = $4,
                predicted_next_start_date = $5,
                predicted_period_end_date = $6,
                updated_at = $7
            WHERE id = $1 AND user_id = $2 AND updated_at = $8
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.user_id().as_str())
        .bind(record.start_date())
        .bind(record.end_date())
        .bind(record.predicted_next_start_date())
        .bind(record.predicted_period_end_date())
        .bind(record.updated_at().as_datetime())
        .bind(expected_updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to update period: {}", e)))?;

        Ok(outcome(result.rows_affected()))
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &PeriodId,
    ) -> Result<Option<PeriodRecord>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM periods WHERE id = $1 AND user_id = $2",
            PERIOD_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to fetch period: {}", e)))?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn list_closed_for_user(&self, user_id: &UserId) -> Result<Vec<PeriodRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM periods \
             WHERE user_id = $1 AND end_date IS NOT NULL \
             ORDER BY start_date ASC",
            PERIOD_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to fetch period history: {}", e)))?;

        rows.iter().map(record_from_row).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════════

fn outcome(rows_affected: u64) -> WriteOutcome {
    if rows_affected == 0 {
        WriteOutcome::Conflict
    } else {
        WriteOutcome::Applied
    }
}

pub(super) fn db_error(msg: &str) -> DomainError {
    DomainError::database(msg.to_string())
}

/// Rebuilds a record from a row selected with `PERIOD_COLUMNS`.
pub(super) fn record_from_row(row: &PgRow) -> Result<PeriodRecord, DomainError> {
    let id: Uuid = row.get("id");
    let user_id: String = row.get("user_id");
    let start_date: NaiveDate = row.get("start_date");
    let end_date: Option<NaiveDate> = row.get("end_date");
    let predicted_next_start_date: Option<NaiveDate> = row.get("predicted_next_start_date");
    let predicted_period_end_date: Option<NaiveDate> = row.get("predicted_period_end_date");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");

    let user_id = UserId::new(user_id)
        .map_err(|e| db_error(&format!("Invalid user_id in periods row {}: {}", id, e)))?;

    Ok(PeriodRecord::reconstitute(
        PeriodId::from_uuid(id),
        user_id,
        start_date,
        end_date,
        predicted_next_start_date,
        predicted_period_end_date,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
