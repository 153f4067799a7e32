//! Calendar arithmetic shared by the period calculator, the recurrence
//! expander, and the payment-date walker.

use chrono::{Datelike, Duration, NaiveDate};

/// Number of days in the given month (1-12), leap-year aware.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

/// Builds a date from a requested day-of-month, capping the day at the
/// month's length. `clamp_day_to_month(31, 2023, 2)` is Feb 28 2023.
pub fn clamp_day_to_month(day: u32, year: i32, month: u32) -> NaiveDate {
    let day = day.max(1).min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("clamped day is always valid")
}

/// Shifts a date by whole months, capping the day at the target month's
/// length (Jan 31 + 1 month is Feb 28/29).
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    clamp_day_to_month(date.day(), year, month as u32)
}

/// Shifts a date by whole years, capping Feb 29 to Feb 28 in non-leap years.
pub fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    clamp_day_to_month(date.day(), date.year() + years, date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths_handle_leap_years() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn clamping_caps_at_month_end() {
        assert_eq!(clamp_day_to_month(31, 2023, 2), date(2023, 2, 28));
        assert_eq!(clamp_day_to_month(31, 2024, 2), date(2024, 2, 29));
        assert_eq!(clamp_day_to_month(15, 2024, 6), date(2024, 6, 15));
    }

    #[test]
    fn month_shifts_cap_and_roll_over() {
        assert_eq!(shift_month(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_month(date(2024, 11, 30), 2), date(2025, 1, 30));
        assert_eq!(shift_month(date(2024, 3, 31), -1), date(2024, 2, 29));
    }

    #[test]
    fn year_shifts_degrade_leap_anchors() {
        assert_eq!(shift_year(date(2024, 2, 29), 1), date(2025, 2, 28));
        assert_eq!(shift_year(date(2024, 2, 29), 4), date(2028, 2, 29));
    }
}
