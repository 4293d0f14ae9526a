//! PostgreSQL implementation of PeriodReader.

use async_trait::async_trait;
use sqlx::PgPool;

use super::period_repository::{db_error, record_from_row, PERIOD_COLUMNS};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::period::PeriodRecord;
use crate::ports::{PeriodFilter, PeriodReader};

/// PostgreSQL implementation of PeriodReader.
#[derive(Clone)]
pub struct PostgresPeriodReader {
    pool: PgPool,
}

impl PostgresPeriodReader {
    /// Creates a new PostgresPeriodReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PeriodReader for PostgresPeriodReader {
    async fn list_by_user(
        &self,
        user_id: &UserId,
        filter: &PeriodFilter,
    ) -> Result<Vec<PeriodRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM periods
            WHERE user_id = $1
              AND ($2::date IS NULL OR start_date >= $2)
              AND ($3::date IS NULL OR start_date <= $3)
            ORDER BY start_date DESC
            OFFSET $4
            LIMIT $5
            "#,
            PERIOD_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(filter.start_from)
        .bind(filter.start_until)
        .bind(i64::from(filter.effective_offset()))
        .bind(i64::from(filter.effective_limit()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to list periods: {}", e)))?;

        rows.iter().map(record_from_row).collect()
    }
}
