//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod period;

pub use period::{
    // Commands
    ClosePeriodCommand, ClosePeriodHandler,
    CreatePeriodCommand, CreatePeriodHandler,
    EditPeriodCommand, EditPeriodHandler,
    // Queries
    GetPeriodHandler, GetPeriodQuery,
    GetPeriodSummaryHandler, GetPeriodSummaryQuery,
    ListPeriodsHandler, ListPeriodsQuery,
};
