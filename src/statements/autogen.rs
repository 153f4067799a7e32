use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::dates::shift_year;
use crate::domain::{statement_id, Account, Statement, Transaction};
use crate::statements::builder::build_statement;
use crate::statements::period::calculate_period;

/// Hours between opportunistic statement-coverage checks. The check is a
/// timestamp comparison performed while the application is active, not a
/// timer.
pub const STATEMENT_CHECK_INTERVAL_HOURS: i64 = 24;

/// True when the last coverage check is recorded and more than the check
/// interval old.
pub fn should_run_scheduled_check(
    last_check: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    matches!(
        last_check,
        Some(checked) if now - checked > Duration::hours(STATEMENT_CHECK_INTERVAL_HOURS)
    )
}

/// Creates every statement missing for `account` between the app start date
/// and one year past `today`, skipping months that already have a saved
/// statement. Returns only the newly created statements.
///
/// Accounts without a configured closing day generate nothing. Periods that
/// end strictly before the app start date are skipped; a period ending
/// exactly on the start date is kept.
pub fn auto_generate_for_account(
    account: &Account,
    transactions: &[Transaction],
    existing: &[Statement],
    app_start: NaiveDate,
    today: NaiveDate,
) -> Vec<Statement> {
    let mut created = Vec::new();
    let Some(closing_day) = account.statement_closing_day else {
        return created;
    };

    let horizon = shift_year(today, 1);
    let mut year = app_start.year();
    let mut month0 = app_start.month0();

    // Safety cap on the month walk; +2 years of slack over the horizon span.
    let max_iterations = (((horizon.year() - app_start.year()) + 2) * 12).max(0);

    for _ in 0..max_iterations {
        let Some(control) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) else {
            break;
        };
        if control > horizon {
            break;
        }

        let id = statement_id(account.id, year, month0);
        if !existing.iter().any(|s| s.id == id) {
            if let Some(period) = calculate_period(closing_day, month0, year) {
                if period.end >= app_start {
                    created.push(build_statement(
                        id,
                        account,
                        transactions,
                        period.start,
                        period.end,
                    ));
                }
            }
        }

        if month0 == 11 {
            month0 = 0;
            year += 1;
        } else {
            month0 += 1;
        }
    }

    tracing::debug!(
        account = %account.name,
        created = created.len(),
        "statement auto-generation pass"
    );
    created
}

/// Runs auto-generation for every account, deduplicates the combined output
/// by id, and drops anything already present in `existing`. The result is
/// exactly the set of statements the caller should merge into its saved
/// collection.
pub fn generate_missing_statements(
    accounts: &[Account],
    transactions: &[Transaction],
    existing: &[Statement],
    app_start: NaiveDate,
    today: NaiveDate,
) -> Vec<Statement> {
    let mut accumulated = Vec::new();
    for account in accounts {
        if account.statement_closing_day.is_some() {
            accumulated.extend(auto_generate_for_account(
                account,
                transactions,
                existing,
                app_start,
                today,
            ));
        }
    }

    let existing_ids: HashSet<&str> = existing.iter().map(|s| s.id.as_str()).collect();
    let mut seen = HashSet::new();
    accumulated
        .into_iter()
        .filter(|stmt| seen.insert(stmt.id.clone()) && !existing_ids.contains(stmt.id.as_str()))
        .collect()
}

/// Combines saved and newly generated statements, keeping the first record
/// for each id and sorting descending by period end for persistence.
pub fn merge_statements(existing: &[Statement], newly_created: &[Statement]) -> Vec<Statement> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Statement> = existing
        .iter()
        .chain(newly_created.iter())
        .filter(|stmt| seen.insert(stmt.id.clone()))
        .cloned()
        .collect();
    merged.sort_by(|a, b| b.end_date.cmp(&a.end_date));
    merged
}
