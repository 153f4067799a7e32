use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Account, Flow, Statement, Transaction};

/// The computed financial content of a statement, before identity and
/// period metadata are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementFigures {
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub transactions: Vec<Transaction>,
    pub total_debits: f64,
    pub total_credits: f64,
    pub total_linked_payments: f64,
}

/// Computes a statement's figures for `account` over the inclusive period
/// `[start, end]`.
///
/// `statement_id` is the id of the statement being built. It only matters
/// for credit cards: an in-period transfer into the card that is linked to a
/// *different* statement still appears in the transaction list (shown as a
/// payment destined elsewhere) but is excluded from the period's credits,
/// and the linked-payments total sums every transfer anywhere in time whose
/// link matches this id.
pub fn build_figures(
    account: &Account,
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    statement_id: Option<&str>,
) -> StatementFigures {
    let mut opening_balance = 0.0;
    for tx in transactions.iter().filter(|tx| tx.date < start) {
        opening_balance += signed_effect(tx, account.id);
    }

    let mut in_period = Vec::new();
    let mut total_debits = 0.0;
    let mut total_credits = 0.0;

    for tx in transactions {
        if tx.date < start || tx.date > end {
            continue;
        }
        match tx.flow {
            Flow::Income { account_id } if account_id == account.id => {
                total_credits += tx.amount;
                in_period.push(tx.clone());
            }
            Flow::Expense { account_id } if account_id == account.id => {
                total_debits += tx.amount;
                in_period.push(tx.clone());
            }
            Flow::Transfer {
                from_account_id,
                to_account_id,
            } => {
                if from_account_id == account.id {
                    total_debits += tx.amount;
                    in_period.push(tx.clone());
                } else if to_account_id == account.id {
                    let pays_other_statement = account.is_credit_card()
                        && match (statement_id, tx.linked_statement_id.as_deref()) {
                            (Some(current), Some(linked)) => linked != current,
                            _ => false,
                        };
                    if !pays_other_statement {
                        total_credits += tx.amount;
                    }
                    in_period.push(tx.clone());
                }
            }
            _ => {}
        }
    }

    in_period.sort_by_key(|tx| tx.date);
    let closing_balance = opening_balance + total_credits - total_debits;

    let mut total_linked_payments = 0.0;
    if account.is_credit_card() {
        if let Some(current) = statement_id {
            for tx in transactions {
                if let Flow::Transfer { to_account_id, .. } = tx.flow {
                    if to_account_id == account.id
                        && tx.linked_statement_id.as_deref() == Some(current)
                    {
                        total_linked_payments += tx.amount;
                    }
                }
            }
        }
    }

    StatementFigures {
        opening_balance,
        closing_balance,
        transactions: in_period,
        total_debits,
        total_credits,
        total_linked_payments,
    }
}

/// Assembles a full statement record for the given id and period.
pub fn build_statement(
    id: String,
    account: &Account,
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Statement {
    let figures = build_figures(account, transactions, start, end, Some(&id));
    Statement {
        id,
        account_id: account.id,
        start_date: start,
        end_date: end,
        opening_balance: figures.opening_balance,
        closing_balance: figures.closing_balance,
        transactions: figures.transactions,
        total_debits: figures.total_debits,
        total_credits: figures.total_credits,
        total_linked_payments: figures.total_linked_payments,
    }
}

/// Signed balance effect of a transaction on one account: incoming amounts
/// count positive, outgoing negative, unrelated transactions zero.
fn signed_effect(tx: &Transaction, account_id: Uuid) -> f64 {
    match tx.flow {
        Flow::Income { account_id: id } if id == account_id => tx.amount,
        Flow::Expense { account_id: id } if id == account_id => -tx.amount,
        Flow::Transfer {
            from_account_id,
            to_account_id,
        } => {
            // Destination checked first so a self-transfer nets to a credit.
            if to_account_id == account_id {
                tx.amount
            } else if from_account_id == account_id {
                -tx.amount
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}
