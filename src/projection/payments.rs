use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::dates::clamp_day_to_month;
use crate::domain::{DateWindow, Statement};

/// Candidate payment dates for a card paid on `preferred_day` of each
/// month: one date per calendar month, capped at the month's length,
/// starting with the first such date inside `window` and ending at the
/// window's end.
pub fn payment_dates(preferred_day: u32, window: DateWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if !(1..=31).contains(&preferred_day) {
        return dates;
    }

    let mut current =
        clamp_day_to_month(preferred_day, window.start.year(), window.start.month());
    while current < window.start {
        current = next_payment_date(current, preferred_day);
    }
    while current <= window.end {
        dates.push(current);
        current = next_payment_date(current, preferred_day);
    }
    dates
}

fn next_payment_date(current: NaiveDate, preferred_day: u32) -> NaiveDate {
    let (year, month) = if current.month() == 12 {
        (current.year() + 1, 1)
    } else {
        (current.year(), current.month() + 1)
    };
    clamp_day_to_month(preferred_day, year, month)
}

/// Picks the statement a payment made on `on_or_before` would settle: the
/// account's unclaimed statement with the latest period end on or before
/// that date and a negative closing balance. A found statement is marked
/// claimed so one projection never counts it twice.
pub fn claim_next_statement<'a>(
    account_id: Uuid,
    on_or_before: NaiveDate,
    statements: &'a [Statement],
    claimed: &mut HashSet<String>,
) -> Option<&'a Statement> {
    let candidate = statements
        .iter()
        .filter(|stmt| {
            stmt.account_id == account_id
                && !claimed.contains(&stmt.id)
                && stmt.closing_balance < 0.0
                && stmt.end_date <= on_or_before
        })
        .max_by_key(|stmt| stmt.end_date)?;
    claimed.insert(candidate.id.clone());
    Some(candidate)
}
