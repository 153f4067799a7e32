#![allow(dead_code)]

use chrono::NaiveDate;
use fintrack_core::domain::{
    Account, AccountKind, Flow, PlannedTransaction, Recurrence, Transaction,
};
use uuid::Uuid;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn bank_account(name: &str) -> Account {
    Account::new(name, AccountKind::Bank)
}

pub fn credit_card(name: &str, closing_day: u32, payment_day: u32) -> Account {
    Account::new(name, AccountKind::CreditCard)
        .with_closing_day(closing_day)
        .with_payment_day(payment_day)
}

pub fn income(account: &Account, on: NaiveDate, amount: f64) -> Transaction {
    Transaction::new(
        on,
        "Salary",
        amount,
        "salary",
        Flow::Income {
            account_id: account.id,
        },
    )
}

pub fn expense(account: &Account, on: NaiveDate, amount: f64) -> Transaction {
    Transaction::new(
        on,
        "Groceries",
        amount,
        "groceries",
        Flow::Expense {
            account_id: account.id,
        },
    )
}

pub fn transfer(from: &Account, to: &Account, on: NaiveDate, amount: f64) -> Transaction {
    Transaction::new(
        on,
        "Transfer",
        amount,
        "transfer",
        Flow::Transfer {
            from_account_id: from.id,
            to_account_id: to.id,
        },
    )
}

pub fn planned_expense(
    account: &Account,
    due: NaiveDate,
    amount: f64,
    recurrence: Recurrence,
) -> PlannedTransaction {
    PlannedTransaction::new(
        "Planned expense",
        amount,
        "bills",
        Flow::Expense {
            account_id: account.id,
        },
        due,
        recurrence,
    )
}

pub fn planned_income(
    account: &Account,
    due: NaiveDate,
    amount: f64,
    recurrence: Recurrence,
) -> PlannedTransaction {
    PlannedTransaction::new(
        "Planned income",
        amount,
        "salary",
        Flow::Income {
            account_id: account.id,
        },
        due,
        recurrence,
    )
}

pub fn orphan_account_id() -> Uuid {
    Uuid::new_v4()
}
