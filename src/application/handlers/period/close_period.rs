//! ClosePeriodHandler - Command handler for recording a period's end.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::refresh::refresh_prediction;
use crate::domain::foundation::{PeriodId, UserId};
use crate::domain::period::{ConflictReason, PeriodError, PeriodRecord};
use crate::ports::{PeriodRepository, WriteOutcome};

/// Command to close an open period.
#[derive(Debug, Clone)]
pub struct ClosePeriodCommand {
    pub user_id: UserId,
    pub period_id: PeriodId,
    pub end_date: NaiveDate,
}

/// Handler for closing periods.
pub struct ClosePeriodHandler {
    repository: Arc<dyn PeriodRepository>,
}

impl ClosePeriodHandler {
    pub fn new(repository: Arc<dyn PeriodRepository>) -> Self {
        Self { repository }
    }

    /// Sets the end date and re-derives both predictions.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the period does not exist or is not the user's
    /// - `Conflict(AlreadyClosed)` if it already has an end date
    /// - `Validation` if `end_date` is before the start date
    /// - `Conflict(ConcurrentModification)` if it changed while being closed
    /// - `Infrastructure` if storage fails
    pub async fn handle(&self, cmd: ClosePeriodCommand) -> Result<PeriodRecord, PeriodError> {
        let mut record = self
            .repository
            .find_by_id(&cmd.user_id, &cmd.period_id)
            .await?
            .ok_or(PeriodError::not_found(cmd.period_id))?;
        let snapshot = record.updated_at();

        record.close(cmd.end_date)?;
        let stats = refresh_prediction(self.repository.as_ref(), &mut record).await?;

        match self.repository.update_if_unchanged(&record, snapshot).await? {
            WriteOutcome::Applied => {
                info!(
                    period_id = %record.id(),
                    end_date = %cmd.end_date,
                    avg_cycle_length = stats.avg_cycle_length,
                    "Period closed"
                );
                Ok(record)
            }
            WriteOutcome::Conflict => {
                warn!(period_id = %record.id(), "Period changed while closing");
                Err(PeriodError::conflict(ConflictReason::ConcurrentModification))
            }
        }
    }
}
