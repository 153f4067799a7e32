use std::borrow::Cow;

use uuid::Uuid;

use crate::domain::{Account, Flow, Statement, Transaction};
use crate::statements::builder::build_figures;

/// Result of a regeneration pass. `statements` borrows the caller's slice
/// untouched when no statement changed, so upstream no-op detection is a
/// variant check rather than a value comparison.
#[derive(Debug)]
pub struct RegenerationOutcome<'a> {
    pub statements: Cow<'a, [Statement]>,
    pub messages: Vec<String>,
}

impl RegenerationOutcome<'_> {
    pub fn changed(&self) -> bool {
        matches!(self.statements, Cow::Owned(_))
    }
}

/// Financial fields compared to decide whether a rebuilt statement actually
/// differs from the stored one.
#[derive(PartialEq)]
struct Fingerprint {
    opening_balance: f64,
    closing_balance: f64,
    total_debits: f64,
    total_credits: f64,
    total_linked_payments: f64,
    transaction_count: usize,
}

impl Fingerprint {
    fn of(stmt: &Statement) -> Self {
        Self {
            opening_balance: stmt.opening_balance,
            closing_balance: stmt.closing_balance,
            total_debits: stmt.total_debits,
            total_credits: stmt.total_credits,
            total_linked_payments: stmt.total_linked_payments,
            transaction_count: stmt.transactions.len(),
        }
    }
}

/// Rebuilds every saved statement that `changed_transaction` can have
/// affected and reports which ones actually changed.
///
/// A statement is a candidate when its account is in `involved_accounts`
/// and either the transaction's date falls inside the statement period, or
/// the transaction is a transfer into the statement's credit-card account
/// explicitly linked to that statement (a payment dated outside the period
/// it settles). Candidates are rebuilt with the same id and period; only
/// those whose fingerprint differs are replaced, and each replacement emits
/// a human-readable message naming the account and period.
pub fn regenerate_affected<'a>(
    changed_transaction: &Transaction,
    involved_accounts: &[Uuid],
    transactions: &[Transaction],
    accounts: &[Account],
    statements: &'a [Statement],
) -> RegenerationOutcome<'a> {
    let mut updated: Option<Vec<Statement>> = None;
    let mut messages = Vec::new();

    for (index, stmt) in statements.iter().enumerate() {
        if !involved_accounts.contains(&stmt.account_id) {
            continue;
        }
        let Some(account) = accounts.iter().find(|acc| acc.id == stmt.account_id) else {
            continue;
        };

        let in_period = stmt.covers(changed_transaction.date);
        let linked_payment = account.is_credit_card()
            && matches!(
                changed_transaction.flow,
                Flow::Transfer { to_account_id, .. } if to_account_id == stmt.account_id
            )
            && changed_transaction.linked_statement_id.as_deref() == Some(stmt.id.as_str());
        if !in_period && !linked_payment {
            continue;
        }

        let figures = build_figures(
            account,
            transactions,
            stmt.start_date,
            stmt.end_date,
            Some(&stmt.id),
        );
        let rebuilt = Statement {
            id: stmt.id.clone(),
            account_id: stmt.account_id,
            start_date: stmt.start_date,
            end_date: stmt.end_date,
            opening_balance: figures.opening_balance,
            closing_balance: figures.closing_balance,
            transactions: figures.transactions,
            total_debits: figures.total_debits,
            total_credits: figures.total_credits,
            total_linked_payments: figures.total_linked_payments,
        };

        if Fingerprint::of(&rebuilt) == Fingerprint::of(stmt) {
            continue;
        }

        messages.push(format!(
            "Statement for {} ({} - {}) was updated.",
            account.name,
            stmt.start_date.format("%b %-d, %y"),
            stmt.end_date.format("%b %-d, %y"),
        ));
        updated.get_or_insert_with(|| statements.to_vec())[index] = rebuilt;
    }

    RegenerationOutcome {
        statements: match updated {
            Some(list) => Cow::Owned(list),
            None => Cow::Borrowed(statements),
        },
        messages,
    }
}
