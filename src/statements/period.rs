use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{clamp_day_to_month, days_in_month};

/// The closed date interval a billing cycle covers. Both bounds inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatementPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Computes the statement period that ends in `month0`/`year` for an account
/// closing on `closing_day`.
///
/// The period ends on the closing day of the target month, capped at the
/// month's last day, and starts the day after the previous month's closing
/// day (same cap applied there). When the closing day is on or past the
/// target month's last day the cap always engages, so the period collapses
/// to the full calendar month.
///
/// Returns `None` for a closing day outside 1-31, a month index outside
/// 0-11, or a computed start after the computed end (the cap rules should
/// make that last case unreachable).
pub fn calculate_period(closing_day: u32, month0: u32, year: i32) -> Option<StatementPeriod> {
    if !(1..=31).contains(&closing_day) || month0 > 11 {
        return None;
    }
    let month = month0 + 1;
    let last_day = days_in_month(year, month);

    if closing_day >= last_day {
        // Full calendar month.
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = NaiveDate::from_ymd_opt(year, month, last_day)?;
        return Some(StatementPeriod { start, end });
    }

    let end = NaiveDate::from_ymd_opt(year, month, closing_day)?;

    let (prev_year, prev_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let prev_last = days_in_month(prev_year, prev_month);
    let start = if closing_day >= prev_last {
        // The previous cycle closed on that month's final day, so this one
        // opens on the 1st of the target month.
        NaiveDate::from_ymd_opt(year, month, 1)?
    } else {
        clamp_day_to_month(closing_day + 1, prev_year, prev_month)
    };

    if start > end {
        return None;
    }
    Some(StatementPeriod { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn mid_month_closing_day() {
        let period = calculate_period(15, 2, 2024).unwrap();
        assert_eq!(period.start, date(2024, 2, 16));
        assert_eq!(period.end, date(2024, 3, 15));
    }

    #[test]
    fn closing_day_past_month_end_yields_full_month() {
        let period = calculate_period(31, 1, 2023).unwrap();
        assert_eq!(period.start, date(2023, 2, 1));
        assert_eq!(period.end, date(2023, 2, 28));

        let leap = calculate_period(31, 1, 2024).unwrap();
        assert_eq!(leap.start, date(2024, 2, 1));
        assert_eq!(leap.end, date(2024, 2, 29));
    }

    #[test]
    fn short_previous_month_starts_on_the_first() {
        // Closing day 30: March's period would start Feb 31, which does not
        // exist; the cycle opens on March 1 instead.
        let period = calculate_period(30, 2, 2023).unwrap();
        assert_eq!(period.start, date(2023, 3, 1));
        assert_eq!(period.end, date(2023, 3, 30));
    }

    #[test]
    fn january_reaches_into_previous_year() {
        let period = calculate_period(15, 0, 2024).unwrap();
        assert_eq!(period.start, date(2023, 12, 16));
        assert_eq!(period.end, date(2024, 1, 15));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(calculate_period(0, 3, 2024).is_none());
        assert!(calculate_period(32, 3, 2024).is_none());
        assert!(calculate_period(15, 12, 2024).is_none());
    }

    #[test]
    fn period_contains_is_inclusive() {
        let period = calculate_period(15, 2, 2024).unwrap();
        assert!(period.contains(date(2024, 2, 16)));
        assert!(period.contains(date(2024, 3, 15)));
        assert!(!period.contains(date(2024, 2, 15)));
        assert!(!period.contains(date(2024, 3, 16)));
    }
}
