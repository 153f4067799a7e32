use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::transaction::Transaction;

/// Builds the deterministic statement identifier for an account and period.
///
/// The format is `{accountId}-{fourDigitYear}-{twoDigitMonth}` with a
/// zero-padded, 0-indexed month (January = `00`). Persisted statements rely
/// on this exact shape, so it must not change.
pub fn statement_id(account_id: Uuid, year: i32, month0: u32) -> String {
    format!("{}-{:04}-{:02}", account_id, year, month0)
}

/// A generated billing-cycle statement for one account.
///
/// `start_date` and `end_date` are both inclusive. `transactions` is a
/// frozen snapshot of the period's entries, not a live query; the statement
/// is rebuilt wholesale whenever a relevant transaction changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub id: String,
    pub account_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub transactions: Vec<Transaction>,
    /// Period-local sum of debits.
    pub total_debits: f64,
    /// Period-local sum of credits.
    pub total_credits: f64,
    /// Sum of every transfer linked to this statement, regardless of the
    /// payment's own date.
    pub total_linked_payments: f64,
}

impl Statement {
    /// True when `date` falls inside this statement's period.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_id_pads_month_and_year() {
        let account = Uuid::nil();
        assert_eq!(
            statement_id(account, 2024, 0),
            format!("{}-2024-00", account)
        );
        assert_eq!(
            statement_id(account, 2024, 11),
            format!("{}-2024-11", account)
        );
    }
}
