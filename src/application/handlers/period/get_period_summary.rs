//! GetPeriodSummaryHandler - Query handler for the look-back summary.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::UserId;
use crate::domain::period::{PeriodError, PeriodSummary, SummarySpan};
use crate::ports::PeriodRepository;

#[derive(Debug, Clone)]
pub struct GetPeriodSummaryQuery {
    pub user_id: UserId,
    pub span: SummarySpan,
    /// Last day of the window, normally the caller's current date.
    pub today: NaiveDate,
}

pub struct GetPeriodSummaryHandler {
    repository: Arc<dyn PeriodRepository>,
}

impl GetPeriodSummaryHandler {
    pub fn new(repository: Arc<dyn PeriodRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetPeriodSummaryQuery) -> Result<PeriodSummary, PeriodError> {
        let history = self.repository.list_closed_for_user(&query.user_id).await?;
        Ok(PeriodSummary::build(&history, query.span, query.today))
    }
}
