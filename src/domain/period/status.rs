//! PeriodStatus enum for the record lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a period record.
///
/// A record starts `Open` when the user logs a new cycle start and becomes
/// `Closed` once an end date is recorded. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    #[default]
    Open,
    Closed,
}

impl PeriodStatus {
    /// Returns true if the record still has no end date.
    pub fn is_open(&self) -> bool {
        matches!(self, PeriodStatus::Open)
    }

    /// Returns true if the record contributes to historical statistics.
    pub fn is_closed(&self) -> bool {
        matches!(self, PeriodStatus::Closed)
    }

    /// Validates a transition from this status to another.
    ///
    /// The only valid transition is Open -> Closed.
    pub fn can_transition_to(&self, target: &PeriodStatus) -> bool {
        matches!((self, target), (PeriodStatus::Open, PeriodStatus::Closed))
    }
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PeriodStatus::Open => "Open",
            PeriodStatus::Closed => "Closed",
        };
        write!(f, "{}", s)
    }
}
