//! Look-back summary of recent closed periods.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::PeriodRecord;
use super::statistics::CycleStatistics;
use crate::domain::foundation::{PeriodId, ValidationError};

/// How far back a summary looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SummarySpan {
    #[default]
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "12m")]
    TwelveMonths,
}

impl SummarySpan {
    pub fn days(&self) -> u64 {
        match self {
            SummarySpan::SixMonths => 180,
            SummarySpan::TwelveMonths => 365,
        }
    }

    /// First calendar day included in the window ending on `today`.
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(self.days()))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for SummarySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummarySpan::SixMonths => f.write_str("6m"),
            SummarySpan::TwelveMonths => f.write_str("12m"),
        }
    }
}

impl FromStr for SummarySpan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "6m" => Ok(SummarySpan::SixMonths),
            "12m" => Ok(SummarySpan::TwelveMonths),
            other => Err(ValidationError::invalid_format(
                "span",
                format!("expected '6m' or '12m', got '{}'", other),
            )),
        }
    }
}

/// One closed period inside the summary window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub id: PeriodId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
}

/// Closed periods started within the window, oldest first, plus the
/// averages over the user's whole closed history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub span: SummarySpan,
    pub since: NaiveDate,
    pub periods: Vec<SummaryEntry>,
    pub statistics: CycleStatistics,
}

impl PeriodSummary {
    pub fn build(history: &[PeriodRecord], span: SummarySpan, today: NaiveDate) -> Self {
        let since = span.window_start(today);

        let mut periods: Vec<SummaryEntry> = history
            .iter()
            .filter(|r| r.start_date() >= since)
            .filter_map(|r| {
                let end_date = r.end_date()?;
                Some(SummaryEntry {
                    id: r.id(),
                    start_date: r.start_date(),
                    end_date,
                    duration_days: r.period_length()?,
                })
            })
            .collect();
        periods.sort_by_key(|entry| entry.start_date);

        Self {
            span,
            since,
            periods,
            statistics: CycleStatistics::compute(history),
        }
    }
}
