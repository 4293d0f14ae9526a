//! Period domain module.
//!
//! Records of logged cycles and the pure services that derive predictions
//! from them.
//!
//! - `record` - `PeriodRecord` aggregate and `PeriodPatch`
//! - `statistics` - average period / cycle lengths over closed history
//! - `prediction` - predicted period end and next start
//! - `summary` - look-back window over recent closed periods

mod dates;
mod errors;
mod prediction;
mod record;
mod statistics;
mod status;
mod summary;

pub use dates::{parse_calendar_date, parse_optional_calendar_date, DATE_FORMAT};
pub use errors::{ConflictReason, PeriodError};
pub use prediction::{Prediction, PredictionEngine};
pub use record::{PeriodPatch, PeriodRecord};
pub use statistics::{CycleStatistics, DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH};
pub use status::PeriodStatus;
pub use summary::{PeriodSummary, SummaryEntry, SummarySpan};
