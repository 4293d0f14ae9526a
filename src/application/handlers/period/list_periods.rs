//! ListPeriodsHandler - Query handler for a user's period history.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::period::{PeriodError, PeriodRecord};
use crate::ports::{PeriodFilter, PeriodReader};

/// Query for a filtered page of periods, most recent first.
#[derive(Debug, Clone)]
pub struct ListPeriodsQuery {
    pub user_id: UserId,
    pub filter: PeriodFilter,
}

pub struct ListPeriodsHandler {
    reader: Arc<dyn PeriodReader>,
}

impl ListPeriodsHandler {
    pub fn new(reader: Arc<dyn PeriodReader>) -> Self {
        Self { reader }
    }

    /// # Errors
    ///
    /// - `Validation` if `start_from` is after `start_until` or the limit is zero
    /// - `Infrastructure` if storage fails
    pub async fn handle(&self, query: ListPeriodsQuery) -> Result<Vec<PeriodRecord>, PeriodError> {
        query.filter.validate()?;
        Ok(self
            .reader
            .list_by_user(&query.user_id, &query.filter)
            .await?)
    }
}
