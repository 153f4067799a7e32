//! Budget projection: planned occurrences and credit-card statement
//! payments summed inside a budget's window.

pub mod payments;

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Account, Budget, PlannedTransaction, Statement, TransactionNature};
use crate::recurrence::expand_occurrences;

pub use payments::{claim_next_statement, payment_dates};

/// One planned occurrence inside a budget window, annotated with the
/// account it posts against.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedOccurrence {
    pub date: NaiveDate,
    pub amount: f64,
    pub nature: TransactionNature,
    pub description: String,
    pub category: String,
    pub account_id: Option<Uuid>,
}

/// A projected credit-card statement payment inside a budget window.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedCcPayment {
    pub account_id: Uuid,
    pub account_name: String,
    pub statement_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub payment_date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectionTotals {
    pub income: f64,
    pub planned_expenses: f64,
    pub cc_expenses: f64,
    pub net: f64,
}

/// The computed contents of a budget window.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProjection {
    pub income: Vec<ProjectedOccurrence>,
    pub expenses: Vec<ProjectedOccurrence>,
    pub cc_payments: Vec<ProjectedCcPayment>,
    pub totals: ProjectionTotals,
}

/// Projects planned transactions and credit-card statement payments into
/// `budget`'s window.
///
/// Income occurrences always count toward the totals. Expense occurrences
/// count only when their account is not a credit card: card spending is
/// captured through the projected statement payments instead, so it is
/// never double counted. For every credit card with both a closing day and
/// a preferred payment day, candidate payment dates are walked through the
/// window and each one claims the latest unclaimed statement with a
/// negative closing balance that ended on or before it.
pub fn project_budget(
    budget: &Budget,
    planned_transactions: &[PlannedTransaction],
    accounts: &[Account],
    statements: &[Statement],
) -> BudgetProjection {
    let mut income = Vec::new();
    let mut expenses = Vec::new();
    let mut totals = ProjectionTotals::default();

    for rule in planned_transactions {
        for occ in expand_occurrences(rule, budget.window) {
            let account_id = rule.flow.account_id();
            match occ.nature {
                TransactionNature::Income => {
                    totals.income += occ.amount;
                    income.push(ProjectedOccurrence {
                        date: occ.date,
                        amount: occ.amount,
                        nature: occ.nature,
                        description: occ.description,
                        category: occ.category,
                        account_id,
                    });
                }
                TransactionNature::Expense => {
                    let account = account_id.and_then(|id| accounts.iter().find(|a| a.id == id));
                    // Credit-card spending surfaces via statement payments;
                    // orphaned accounts are not counted either.
                    let Some(account) = account else { continue };
                    if account.is_credit_card() {
                        continue;
                    }
                    totals.planned_expenses += occ.amount;
                    expenses.push(ProjectedOccurrence {
                        date: occ.date,
                        amount: occ.amount,
                        nature: occ.nature,
                        description: occ.description,
                        category: occ.category,
                        account_id,
                    });
                }
                TransactionNature::Transfer => {}
            }
        }
    }
    income.sort_by_key(|occ| occ.date);
    expenses.sort_by_key(|occ| occ.date);

    let mut cc_payments = Vec::new();
    let mut claimed = HashSet::new();
    for account in accounts {
        if !account.is_credit_card() || account.statement_closing_day.is_none() {
            continue;
        }
        let Some(preferred_day) = account.preferred_payment_day else {
            continue;
        };
        for payment_date in payment_dates(preferred_day, budget.window) {
            if let Some(stmt) =
                claim_next_statement(account.id, payment_date, statements, &mut claimed)
            {
                totals.cc_expenses += stmt.closing_balance.abs();
                cc_payments.push(ProjectedCcPayment {
                    account_id: account.id,
                    account_name: account.name.clone(),
                    statement_id: stmt.id.clone(),
                    period_start: stmt.start_date,
                    period_end: stmt.end_date,
                    payment_date,
                    amount: stmt.closing_balance.abs(),
                });
            }
        }
    }
    cc_payments.sort_by_key(|payment| payment.payment_date);

    totals.net = totals.income - totals.planned_expenses - totals.cc_expenses;
    BudgetProjection {
        income,
        expenses,
        cc_payments,
        totals,
    }
}
