//! GetPeriodHandler - Query handler for a single period.

use std::sync::Arc;

use crate::domain::foundation::{PeriodId, UserId};
use crate::domain::period::{PeriodError, PeriodRecord};
use crate::ports::PeriodRepository;

#[derive(Debug, Clone)]
pub struct GetPeriodQuery {
    pub user_id: UserId,
    pub period_id: PeriodId,
}

pub struct GetPeriodHandler {
    repository: Arc<dyn PeriodRepository>,
}

impl GetPeriodHandler {
    pub fn new(repository: Arc<dyn PeriodRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetPeriodQuery) -> Result<PeriodRecord, PeriodError> {
        self.repository
            .find_by_id(&query.user_id, &query.period_id)
            .await?
            .ok_or(PeriodError::not_found(query.period_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::period::test_support::{
        closed, date, user, MockPeriodRepository,
    };

    #[tokio::test]
    async fn returns_owned_period() {
        let owner = user("u1");
        let record = closed(&owner, date(2024, 1, 1), date(2024, 1, 5));
        let id = record.id();
        let handler = GetPeriodHandler::new(Arc::new(MockPeriodRepository::with_records(vec![
            record.clone(),
        ])));

        let found = handler
            .handle(GetPeriodQuery {
                user_id: owner,
                period_id: id,
            })
            .await
            .unwrap();

        assert_eq!(found, record);
    }

    #[tokio::test]
    async fn missing_and_foreign_periods_look_the_same() {
        let record = closed(&user("owner"), date(2024, 1, 1), date(2024, 1, 5));
        let foreign_id = record.id();
        let handler = GetPeriodHandler::new(Arc::new(MockPeriodRepository::with_records(vec![
            record,
        ])));
        let missing_id = PeriodId::new();

        let foreign = handler
            .handle(GetPeriodQuery {
                user_id: user("intruder"),
                period_id: foreign_id,
            })
            .await
            .unwrap_err();
        let missing = handler
            .handle(GetPeriodQuery {
                user_id: user("intruder"),
                period_id: missing_id,
            })
            .await
            .unwrap_err();

        assert_eq!(foreign, PeriodError::not_found(foreign_id));
        assert_eq!(missing, PeriodError::not_found(missing_id));
    }
}
