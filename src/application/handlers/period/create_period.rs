//! CreatePeriodHandler - Command handler for starting a new period.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::foundation::UserId;
use crate::domain::period::{
    ConflictReason, CycleStatistics, PeriodError, PeriodRecord, PredictionEngine,
};
use crate::ports::{PeriodRepository, WriteOutcome};

/// Command to start a new open period.
#[derive(Debug, Clone)]
pub struct CreatePeriodCommand {
    pub user_id: UserId,
    pub start_date: NaiveDate,
}

/// Handler for creating periods.
pub struct CreatePeriodHandler {
    repository: Arc<dyn PeriodRepository>,
}

impl CreatePeriodHandler {
    pub fn new(repository: Arc<dyn PeriodRepository>) -> Self {
        Self { repository }
    }

    /// Opens a period with predictions derived from the user's closed history.
    ///
    /// # Errors
    ///
    /// - `Conflict(OpenPeriodExists)` if the user already has an open period
    /// - `Infrastructure` if storage fails
    pub async fn handle(&self, cmd: CreatePeriodCommand) -> Result<PeriodRecord, PeriodError> {
        let history = self.repository.list_closed_for_user(&cmd.user_id).await?;
        let stats = CycleStatistics::compute(&history);

        let mut record = PeriodRecord::open(cmd.user_id, cmd.start_date);
        record.apply_prediction(PredictionEngine::derive_on_create(cmd.start_date, &stats));

        match self.repository.insert_if_no_open(&record).await? {
            WriteOutcome::Applied => {
                info!(
                    period_id = %record.id(),
                    user_id = %record.user_id(),
                    start_date = %record.start_date(),
                    "Period opened"
                );
                Ok(record)
            }
            WriteOutcome::Conflict => {
                warn!(user_id = %record.user_id(), "Rejected period: an open period already exists");
                Err(PeriodError::conflict(ConflictReason::OpenPeriodExists))
            }
        }
    }
}
