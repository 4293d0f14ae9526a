//! EditPeriodHandler - Command handler for correcting a period's dates.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::refresh::refresh_prediction;
use crate::domain::foundation::{PeriodId, UserId};
use crate::domain::period::{ConflictReason, PeriodError, PeriodPatch, PeriodRecord};
use crate::ports::{PeriodRepository, WriteOutcome};

/// Command to apply a partial date update.
#[derive(Debug, Clone)]
pub struct EditPeriodCommand {
    pub user_id: UserId,
    pub period_id: PeriodId,
    pub patch: PeriodPatch,
}

/// Handler for editing periods.
pub struct EditPeriodHandler {
    repository: Arc<dyn PeriodRepository>,
}

impl EditPeriodHandler {
    pub fn new(repository: Arc<dyn PeriodRepository>) -> Self {
        Self { repository }
    }

    /// Merges the patch, validates the result and re-derives predictions.
    ///
    /// An empty patch returns the stored record without writing.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the period does not exist or is not the user's
    /// - `Validation` if the merged end date is before the merged start date
    /// - `Conflict(ConcurrentModification)` if it changed while being edited
    /// - `Infrastructure` if storage fails
    pub async fn handle(&self, cmd: EditPeriodCommand) -> Result<PeriodRecord, PeriodError> {
        let mut record = self
            .repository
            .find_by_id(&cmd.user_id, &cmd.period_id)
            .await?
            .ok_or(PeriodError::not_found(cmd.period_id))?;
        let snapshot = record.updated_at();

        if !record.apply_patch(&cmd.patch)? {
            debug!(period_id = %record.id(), "Empty patch, nothing to update");
            return Ok(record);
        }
        refresh_prediction(self.repository.as_ref(), &mut record).await?;

        match self.repository.update_if_unchanged(&record, snapshot).await? {
            WriteOutcome::Applied => {
                info!(
                    period_id = %record.id(),
                    start_date = %record.start_date(),
                    end_date = ?record.end_date(),
                    "Period edited"
                );
                Ok(record)
            }
            WriteOutcome::Conflict => {
                warn!(period_id = %record.id(), "Period changed while editing");
                Err(PeriodError::conflict(ConflictReason::ConcurrentModification))
            }
        }
    }
}
