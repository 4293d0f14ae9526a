//! Prediction refresh shared by the close and edit commands.

use crate::domain::period::{CycleStatistics, PeriodError, PeriodRecord, PredictionEngine};
use crate::ports::PeriodRepository;

/// Re-derives both predicted fields of `record` from the history it will
/// have once persisted.
///
/// The stored copy of `record` is replaced by its new state; if the record is
/// still open it is left out of the averages entirely.
pub(super) async fn refresh_prediction(
    repository: &dyn PeriodRepository,
    record: &mut PeriodRecord,
) -> Result<CycleStatistics, PeriodError> {
    let mut history: Vec<PeriodRecord> = repository
        .list_closed_for_user(record.user_id())
        .await?
        .into_iter()
        .filter(|stored| stored.id() != record.id())
        .collect();
    if record.is_closed() {
        history.push(record.clone());
    }

    let stats = CycleStatistics::compute(&history);
    record.apply_prediction(PredictionEngine::derive_on_update(record, &stats));
    Ok(stats)
}
