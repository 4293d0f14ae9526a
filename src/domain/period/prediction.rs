//! Next-cycle prediction.
//!
//! Both derivations anchor on the record's own `start_date`. The next start
//! is only predicted once the record is closed.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::PeriodRecord;
use super::statistics::CycleStatistics;

/// Derived fields of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_period_end_date: Option<NaiveDate>,
    pub predicted_next_start_date: Option<NaiveDate>,
}

/// Derives prediction fields from a record's dates and the user's statistics.
pub struct PredictionEngine;

impl PredictionEngine {
    /// Prediction for a freshly opened record.
    ///
    /// There is no end date yet, so no next-start guess.
    pub fn derive_on_create(start_date: NaiveDate, stats: &CycleStatistics) -> Prediction {
        Prediction {
            predicted_period_end_date: period_end(start_date, stats),
            predicted_next_start_date: None,
        }
    }

    /// Prediction for a record whose dates were just set or changed.
    pub fn derive_on_update(record: &PeriodRecord, stats: &CycleStatistics) -> Prediction {
        let predicted_next_start_date = if record.is_closed() {
            record
                .start_date()
                .checked_add_days(Days::new(u64::from(stats.avg_cycle_length)))
        } else {
            None
        };

        Prediction {
            predicted_period_end_date: period_end(record.start_date(), stats),
            predicted_next_start_date,
        }
    }
}

fn period_end(start_date: NaiveDate, stats: &CycleStatistics) -> Option<NaiveDate> {
    let span = u64::from(stats.avg_period_length.saturating_sub(1));
    start_date.checked_add_days(Days::new(span))
}
