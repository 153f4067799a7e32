mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::*;
use fintrack_core::snapshot::Snapshot;
use fintrack_core::storage::{JsonStorage, StorageBackend};
use tempfile::TempDir;

fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

#[test]
fn recording_transactions_maintains_balances() {
    let checking = bank_account("Checking");
    let savings = bank_account("Savings");
    let mut snapshot = Snapshot::new();
    snapshot.accounts = vec![checking.clone(), savings.clone()];

    snapshot.record_transaction(income(&checking, date(2024, 3, 1), 1000.0));
    snapshot.record_transaction(expense(&checking, date(2024, 3, 2), 200.0));
    snapshot.record_transaction(transfer(&checking, &savings, date(2024, 3, 3), 300.0));

    assert_eq!(snapshot.account(checking.id).unwrap().balance, 500.0);
    assert_eq!(snapshot.account(savings.id).unwrap().balance, 300.0);
}

#[test]
fn amending_a_transaction_reverts_the_old_effects() {
    let checking = bank_account("Checking");
    let mut snapshot = Snapshot::new();
    snapshot.accounts = vec![checking.clone()];

    let tx = income(&checking, date(2024, 3, 1), 1000.0);
    snapshot.record_transaction(tx.clone());

    let mut raised = tx;
    raised.amount = 1250.0;
    snapshot.amend_transaction(raised).expect("amend");
    assert_eq!(snapshot.account(checking.id).unwrap().balance, 1250.0);

    let removed_id = snapshot.transactions[0].id;
    snapshot.remove_transaction(removed_id).expect("remove");
    assert_eq!(snapshot.account(checking.id).unwrap().balance, 0.0);
    assert!(snapshot.transactions.is_empty());
}

#[test]
fn amending_unknown_transactions_is_an_error() {
    let checking = bank_account("Checking");
    let mut snapshot = Snapshot::new();
    snapshot.accounts = vec![checking.clone()];

    let stray = income(&checking, date(2024, 3, 1), 10.0);
    assert!(snapshot.amend_transaction(stray).is_err());
}

#[test]
fn coverage_pass_creates_statements_then_stays_idempotent() {
    let mut snapshot = Snapshot::new();
    snapshot.accounts = vec![bank_account("Checking").with_closing_day(15)];
    snapshot.app_start_date = Some(date(2024, 1, 10));

    let now = noon(2024, 3, 1);
    let created = snapshot.ensure_statement_coverage(now);
    assert_eq!(created, 15, "January 2024 through March 2025");
    assert_eq!(snapshot.last_statement_check, Some(now));

    // Saved set is sorted descending by period end.
    for pair in snapshot.statements.windows(2) {
        assert!(pair[0].end_date >= pair[1].end_date);
    }

    assert_eq!(snapshot.ensure_statement_coverage(now), 0);
}

#[test]
fn transaction_mutations_regenerate_covering_statements() {
    let checking = bank_account("Checking").with_closing_day(15);
    let mut snapshot = Snapshot::new();
    snapshot.accounts = vec![checking.clone()];
    snapshot.app_start_date = Some(date(2024, 1, 10));
    snapshot.ensure_statement_coverage(noon(2024, 3, 1));

    let messages = snapshot.record_transaction(income(&checking, date(2024, 3, 5), 1000.0));
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Checking"));

    let covering = snapshot
        .statements
        .iter()
        .find(|stmt| stmt.covers(date(2024, 3, 5)))
        .expect("statement covering the income");
    assert_eq!(covering.total_credits, 1000.0);
    assert_eq!(covering.closing_balance, 1000.0);

    // Recording the same values again changes nothing in the other periods.
    let untouched = snapshot
        .statements
        .iter()
        .filter(|stmt| !stmt.covers(date(2024, 3, 5)))
        .all(|stmt| stmt.total_credits == 0.0);
    assert!(untouched);
}

#[test]
fn scheduled_check_gate_requires_a_stale_timestamp() {
    let mut snapshot = Snapshot::new();
    snapshot.accounts = vec![bank_account("Checking").with_closing_day(15)];
    snapshot.app_start_date = Some(date(2024, 1, 10));

    let now = noon(2024, 3, 1);
    // Never checked: the opportunistic gate stays closed.
    assert_eq!(snapshot.maybe_run_statement_check(now), 0);

    snapshot.last_statement_check = Some(now - Duration::hours(25));
    assert!(snapshot.maybe_run_statement_check(now) > 0);
    assert_eq!(snapshot.last_statement_check, Some(now));

    // Fresh timestamp: nothing to do.
    assert_eq!(snapshot.maybe_run_statement_check(now + Duration::hours(1)), 0);
}

#[test]
fn adding_an_account_with_closing_day_extends_coverage() {
    let mut snapshot = Snapshot::new();
    snapshot.app_start_date = Some(date(2024, 1, 10));

    let created = snapshot.add_account(
        bank_account("Checking").with_closing_day(15),
        noon(2024, 3, 1),
    );
    assert!(created > 0);

    // An account without a closing day generates nothing.
    let created = snapshot.add_account(bank_account("Wallet"), noon(2024, 3, 1));
    assert_eq!(created, 0);
}

#[test]
fn setting_a_closing_day_later_triggers_generation() {
    let mut snapshot = Snapshot::new();
    snapshot.app_start_date = Some(date(2024, 1, 10));
    let account = bank_account("Checking");
    snapshot.add_account(account.clone(), noon(2024, 3, 1));
    assert!(snapshot.statements.is_empty());

    let mut updated = account;
    updated.statement_closing_day = Some(20);
    let created = snapshot.update_account(updated, noon(2024, 3, 1)).unwrap();
    assert!(created > 0);
}

#[test]
fn removing_an_account_cascades_to_its_statements() {
    let checking = bank_account("Checking").with_closing_day(15);
    let card = credit_card("Visa", 20, 28);
    let mut snapshot = Snapshot::new();
    snapshot.accounts = vec![checking.clone(), card.clone()];
    snapshot.app_start_date = Some(date(2024, 1, 10));
    snapshot.ensure_statement_coverage(noon(2024, 3, 1));

    snapshot.record_transaction(expense(&card, date(2024, 3, 2), 80.0));
    assert!(snapshot.statements.iter().any(|s| s.account_id == card.id));

    snapshot.remove_account(card.id).expect("remove account");
    assert!(snapshot.statements.iter().all(|s| s.account_id != card.id));
    assert!(
        snapshot.statements.iter().any(|s| s.account_id == checking.id),
        "other accounts keep their statements"
    );
    assert!(
        !snapshot.transactions.is_empty(),
        "transactions survive as orphaned references"
    );
}

#[test]
fn summary_splits_available_funds_and_card_debt() {
    let checking = bank_account("Checking");
    let card = credit_card("Visa", 15, 25);
    let mut snapshot = Snapshot::new();
    snapshot.accounts = vec![checking.clone(), card.clone()];

    snapshot.record_transaction(income(&checking, date(2024, 3, 1), 900.0));
    snapshot.record_transaction(expense(&card, date(2024, 3, 2), 250.0));

    let summary = snapshot.summary();
    assert_eq!(summary.total_available_funds, 900.0);
    assert_eq!(summary.total_credit_card_debt, 250.0);
}

#[test]
fn snapshots_roundtrip_through_json_storage() {
    let checking = bank_account("Checking").with_closing_day(15);
    let mut snapshot = Snapshot::new();
    snapshot.accounts = vec![checking.clone()];
    snapshot.app_start_date = Some(date(2024, 1, 10));
    snapshot.ensure_statement_coverage(noon(2024, 3, 1));
    snapshot.record_transaction(income(&checking, date(2024, 3, 5), 1000.0));

    let temp = TempDir::new().expect("temp dir");
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("storage");
    storage.save(&snapshot, "main").expect("save");
    let loaded = storage.load("main").expect("load");

    let original = serde_json::to_value(&snapshot).expect("serialize original");
    let reloaded = serde_json::to_value(&loaded).expect("serialize reloaded");
    assert_eq!(original, reloaded);
}
