//! Rolling averages over a user's closed period records.
//!
//! Pure domain service: no I/O, no clock. Only closed records participate;
//! an open record is ignored until it gets an end date.

use serde::{Deserialize, Serialize};

use super::record::PeriodRecord;

/// Average period length used when no closed record exists.
pub const DEFAULT_PERIOD_LENGTH: u32 = 5;

/// Average cycle length used when fewer than two closed records exist.
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// Averages derived from a user's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStatistics {
    /// Mean days per period, both endpoints inclusive.
    pub avg_period_length: u32,
    /// Mean days between consecutive period starts.
    pub avg_cycle_length: u32,
    /// Number of closed records the averages were computed from.
    pub closed_periods: usize,
}

impl Default for CycleStatistics {
    fn default() -> Self {
        Self {
            avg_period_length: DEFAULT_PERIOD_LENGTH,
            avg_cycle_length: DEFAULT_CYCLE_LENGTH,
            closed_periods: 0,
        }
    }
}

impl CycleStatistics {
    /// Computes both averages from `history`.
    ///
    /// The input need not be sorted. Cycle lengths are taken between
    /// consecutive closed records ordered by start date. Means are rounded
    /// half-up to the nearest whole day.
    pub fn compute<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = &'a PeriodRecord>,
    {
        let mut closed: Vec<&PeriodRecord> =
            history.into_iter().filter(|r| r.is_closed()).collect();
        closed.sort_by_key(|r| r.start_date());

        let period_lengths: Vec<i64> = closed.iter().filter_map(|r| r.period_length()).collect();
        let cycle_lengths: Vec<i64> = closed
            .windows(2)
            .map(|pair| (pair[1].start_date() - pair[0].start_date()).num_days())
            .collect();

        Self {
            avg_period_length: rounded_mean(&period_lengths).unwrap_or(DEFAULT_PERIOD_LENGTH),
            avg_cycle_length: rounded_mean(&cycle_lengths).unwrap_or(DEFAULT_CYCLE_LENGTH),
            closed_periods: closed.len(),
        }
    }

    /// True when neither average came from real data.
    pub fn is_default(&self) -> bool {
        self.closed_periods == 0
    }
}

/// Round-half-up mean of non-negative day counts, in exact integer arithmetic.
///
/// Inputs are never negative: cycle gaps come from sorted start dates and
/// closed records always end on or after their start.
fn rounded_mean(values: &[i64]) -> Option<u32> {
    if values.is_empty() {
        return None;
    }
    debug_assert!(values.iter().all(|v| *v >= 0), "negative day count");
    let count = values.len() as i64;
    let sum: i64 = values.iter().sum();
    let mean = (2 * sum + count) / (2 * count);
    Some(u32::try_from(mean).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn closed(start: NaiveDate, end: NaiveDate) -> PeriodRecord {
        let mut record = PeriodRecord::open(UserId::new("user-1").unwrap(), start);
        record.close(end).unwrap();
        record
    }

    fn open(start: NaiveDate) -> PeriodRecord {
        PeriodRecord::open(UserId::new("user-1").unwrap(), start)
    }

    #[test]
    fn empty_history_uses_defaults() {
        let history: Vec<PeriodRecord> = Vec::new();
        let stats = CycleStatistics::compute(&history);
        assert_eq!(stats, CycleStatistics::default());
        assert_eq!(stats.avg_period_length, 5);
        assert_eq!(stats.avg_cycle_length, 28);
        assert!(stats.is_default());
    }

    #[test]
    fn single_closed_record_sets_period_only() {
        let history = vec![closed(date(2024, 1, 1), date(2024, 1, 7))];
        let stats = CycleStatistics::compute(&history);

        assert_eq!(stats.avg_period_length, 7);
        assert_eq!(stats.avg_cycle_length, DEFAULT_CYCLE_LENGTH);
        assert_eq!(stats.closed_periods, 1);
    }

    #[test]
    fn two_closed_records_give_one_cycle() {
        let history = vec![
            closed(date(2024, 1, 1), date(2024, 1, 5)),
            closed(date(2024, 1, 29), date(2024, 2, 2)),
        ];
        let stats = CycleStatistics::compute(&history);

        assert_eq!(stats.avg_period_length, 5);
        assert_eq!(stats.avg_cycle_length, 28);
    }

    #[test]
    fn open_record_is_ignored() {
        let history = vec![
            closed(date(2024, 1, 1), date(2024, 1, 5)),
            open(date(2024, 1, 20)),
        ];
        let stats = CycleStatistics::compute(&history);

        assert_eq!(stats.avg_cycle_length, DEFAULT_CYCLE_LENGTH);
        assert_eq!(stats.closed_periods, 1);
    }

    #[test]
    fn unsorted_history_is_sorted_by_start() {
        let history = vec![
            closed(date(2024, 3, 1), date(2024, 3, 4)),
            closed(date(2024, 1, 1), date(2024, 1, 4)),
            closed(date(2024, 1, 31), date(2024, 2, 3)),
        ];
        let stats = CycleStatistics::compute(&history);

        // Deltas 30 and 30 (2024 is a leap year: Jan 31 -> Mar 1 is 30 days).
        assert_eq!(stats.avg_cycle_length, 30);
    }

    #[test]
    fn half_day_mean_rounds_up() {
        // Period lengths 4 and 5 -> mean 4.5 -> 5.
        let history = vec![
            closed(date(2024, 1, 1), date(2024, 1, 4)),
            closed(date(2024, 1, 28), date(2024, 2, 1)),
        ];
        let stats = CycleStatistics::compute(&history);
        assert_eq!(stats.avg_period_length, 5);
    }

    #[test]
    fn below_half_rounds_down() {
        // Cycle deltas 27, 28, 28 -> mean 27.67 -> 28; periods 3, 3, 4, 3 -> 3.25 -> 3.
        let history = vec![
            closed(date(2024, 1, 1), date(2024, 1, 3)),
            closed(date(2024, 1, 28), date(2024, 1, 30)),
            closed(date(2024, 2, 25), date(2024, 2, 28)),
            closed(date(2024, 3, 24), date(2024, 3, 26)),
        ];
        let stats = CycleStatistics::compute(&history);
        assert_eq!(stats.avg_cycle_length, 28);
        assert_eq!(stats.avg_period_length, 3);
    }

    #[test]
    fn same_day_starts_give_zero_gap() {
        let history = vec![
            closed(date(2024, 1, 1), date(2024, 1, 1)),
            closed(date(2024, 1, 1), date(2024, 1, 3)),
        ];
        let stats = CycleStatistics::compute(&history);

        assert_eq!(stats.avg_cycle_length, 0);
        assert_eq!(stats.avg_period_length, 2);
    }

    #[test]
    fn rounded_mean_matches_float_rounding() {
        assert_eq!(rounded_mean(&[]), None);
        assert_eq!(rounded_mean(&[7]), Some(7));
        assert_eq!(rounded_mean(&[3, 4]), Some(4));
        assert_eq!(rounded_mean(&[1, 2, 2]), Some(2));
        assert_eq!(rounded_mean(&[1, 1, 2]), Some(1));
    }

    fn history_strategy() -> impl Strategy<Value = Vec<(u64, u64)>> {
        // (gap from previous start, period length - 1)
        prop::collection::vec((1u64..60, 0u64..10), 0..12)
    }

    fn build_history(gaps: &[(u64, u64)]) -> Vec<PeriodRecord> {
        let mut start = date(2020, 1, 1);
        gaps.iter()
            .map(|(gap, extra_days)| {
                start = start.checked_add_days(Days::new(*gap)).unwrap();
                let end = start.checked_add_days(Days::new(*extra_days)).unwrap();
                closed(start, end)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn cycle_length_is_rounded_mean_of_start_deltas(gaps in history_strategy()) {
            let history = build_history(&gaps);
            let stats = CycleStatistics::compute(&history);

            if history.len() < 2 {
                prop_assert_eq!(stats.avg_cycle_length, DEFAULT_CYCLE_LENGTH);
            } else {
                let deltas: Vec<f64> = gaps[1..].iter().map(|(gap, _)| *gap as f64).collect();
                let expected = (deltas.iter().sum::<f64>() / deltas.len() as f64).round() as u32;
                prop_assert_eq!(stats.avg_cycle_length, expected);
            }
        }

        #[test]
        fn period_length_is_rounded_mean_of_inclusive_spans(gaps in history_strategy()) {
            let history = build_history(&gaps);
            let stats = CycleStatistics::compute(&history);

            if history.is_empty() {
                prop_assert_eq!(stats.avg_period_length, DEFAULT_PERIOD_LENGTH);
            } else {
                let spans: Vec<f64> = gaps.iter().map(|(_, extra)| (*extra + 1) as f64).collect();
                let expected = (spans.iter().sum::<f64>() / spans.len() as f64).round() as u32;
                prop_assert_eq!(stats.avg_period_length, expected);
            }
        }

        #[test]
        fn order_of_input_does_not_matter(gaps in history_strategy()) {
            let history = build_history(&gaps);
            let mut reversed = history.clone();
            reversed.reverse();

            prop_assert_eq!(
                CycleStatistics::compute(&history),
                CycleStatistics::compute(&reversed)
            );
        }
    }
}
