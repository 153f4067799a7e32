//! The explicit application-state container. Collaborators hold one
//! `Snapshot`, mutate it through these methods, and persist the result; no
//! engine function reads ambient state.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Account, AccountKind, Budget, Displayable, Flow, Identifiable, PlannedTransaction, Statement,
    Transaction,
};
use crate::errors::{CoreError, Result};
use crate::statements::{
    generate_missing_statements, merge_statements, regenerate_affected, should_run_scheduled_check,
};

/// Dashboard totals derived from account balances.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapshotSummary {
    /// Sum of positive balances across bank, cash, and investment accounts.
    pub total_available_funds: f64,
    /// Absolute sum of negative credit-card balances.
    pub total_credit_card_debt: f64,
}

/// Full application state: every persisted collection plus the tracking
/// start date and the last statement-coverage check timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub planned_transactions: Vec<PlannedTransaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub statements: Vec<Statement>,
    /// Date the user started tracking; statements are never generated for
    /// periods that end before it.
    #[serde(default)]
    pub app_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_statement_check: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn statement(&self, id: &str) -> Option<&Statement> {
        self.statements.iter().find(|stmt| stmt.id == id)
    }

    // ---- transactions -------------------------------------------------

    /// Appends a transaction, applies its balance effects, and regenerates
    /// any affected statements. Returns the statement-change messages.
    pub fn record_transaction(&mut self, transaction: Transaction) -> Vec<String> {
        self.apply_balance_effects(&transaction);
        let involved = transaction.flow.involved_accounts();
        self.transactions.push(transaction.clone());
        self.regenerate_for(&transaction, &involved)
    }

    /// Replaces a stored transaction: reverts the old entry's balance
    /// effects, applies the replacement's, and regenerates statements over
    /// the union of old and new involved accounts.
    pub fn amend_transaction(&mut self, updated: Transaction) -> Result<Vec<String>> {
        let position = self
            .transactions
            .iter()
            .position(|tx| tx.id == updated.id)
            .ok_or_else(|| CoreError::InvalidRef(format!("transaction {}", updated.id)))?;
        let original = self.transactions[position].clone();

        self.revert_balance_effects(&original);
        self.apply_balance_effects(&updated);

        let mut involved = original.flow.involved_accounts();
        for id in updated.flow.involved_accounts() {
            if !involved.contains(&id) {
                involved.push(id);
            }
        }
        self.transactions[position] = updated.clone();
        Ok(self.regenerate_for(&updated, &involved))
    }

    /// Removes a transaction, reverting its balance effects and
    /// regenerating any statements it touched.
    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Vec<String>> {
        let removed = remove_by_id(&mut self.transactions, id)
            .ok_or_else(|| CoreError::InvalidRef(format!("transaction {}", id)))?;
        self.revert_balance_effects(&removed);
        let involved = removed.flow.involved_accounts();
        Ok(self.regenerate_for(&removed, &involved))
    }

    fn regenerate_for(&mut self, changed: &Transaction, involved: &[Uuid]) -> Vec<String> {
        let (replacement, messages) = {
            let outcome = regenerate_affected(
                changed,
                involved,
                &self.transactions,
                &self.accounts,
                &self.statements,
            );
            match outcome.statements {
                Cow::Owned(list) => (Some(list), outcome.messages),
                Cow::Borrowed(_) => (None, outcome.messages),
            }
        };
        if let Some(list) = replacement {
            self.statements = list;
        }
        messages
    }

    fn apply_balance_effects(&mut self, tx: &Transaction) {
        self.shift_balances(tx, 1.0);
    }

    fn revert_balance_effects(&mut self, tx: &Transaction) {
        self.shift_balances(tx, -1.0);
    }

    fn shift_balances(&mut self, tx: &Transaction, sign: f64) {
        match tx.flow {
            Flow::Income { account_id } => self.adjust_balance(account_id, sign * tx.amount),
            Flow::Expense { account_id } => self.adjust_balance(account_id, -sign * tx.amount),
            Flow::Transfer {
                from_account_id,
                to_account_id,
            } => {
                self.adjust_balance(from_account_id, -sign * tx.amount);
                self.adjust_balance(to_account_id, sign * tx.amount);
            }
        }
    }

    fn adjust_balance(&mut self, account_id: Uuid, delta: f64) {
        if let Some(account) = self.accounts.iter_mut().find(|acc| acc.id == account_id) {
            account.balance += delta;
        }
    }

    // ---- accounts -----------------------------------------------------

    /// Adds an account. When it carries a closing day and a tracking start
    /// date is set, statement coverage is extended immediately; the number
    /// of statements created is returned.
    pub fn add_account(&mut self, account: Account, now: DateTime<Utc>) -> usize {
        let has_closing_day = account.statement_closing_day.is_some();
        self.accounts.push(account);
        self.accounts.sort_by(|a, b| a.name.cmp(&b.name));
        if has_closing_day && self.app_start_date.is_some() {
            self.ensure_statement_coverage(now)
        } else {
            0
        }
    }

    /// Replaces a stored account. A newly set or changed closing day
    /// triggers a statement-coverage pass.
    pub fn update_account(&mut self, account: Account, now: DateTime<Utc>) -> Result<usize> {
        let position = self
            .accounts
            .iter()
            .position(|acc| acc.id == account.id)
            .ok_or_else(|| CoreError::InvalidRef(format!("account {}", account.id)))?;
        let old_closing_day = self.accounts[position].statement_closing_day;
        let new_closing_day = account.statement_closing_day;

        self.accounts[position] = account;
        self.accounts.sort_by(|a, b| a.name.cmp(&b.name));

        if new_closing_day.is_some()
            && new_closing_day != old_closing_day
            && self.app_start_date.is_some()
        {
            Ok(self.ensure_statement_coverage(now))
        } else {
            Ok(0)
        }
    }

    /// Deletes an account and cascades to its saved statements.
    /// Transactions referencing the account are kept and become orphaned
    /// references.
    pub fn remove_account(&mut self, id: Uuid) -> Result<Account> {
        let removed = remove_by_id(&mut self.accounts, id)
            .ok_or_else(|| CoreError::InvalidRef(format!("account {}", id)))?;
        self.statements.retain(|stmt| stmt.account_id != id);
        tracing::info!(account = %removed.display_label(), "account and its statements removed");
        Ok(removed)
    }

    // ---- planned transactions and budgets -----------------------------

    pub fn add_planned_transaction(&mut self, planned: PlannedTransaction) {
        self.planned_transactions.push(planned);
        self.planned_transactions.sort_by_key(|pt| pt.due_date);
    }

    pub fn amend_planned_transaction(&mut self, updated: PlannedTransaction) -> Result<()> {
        let position = self
            .planned_transactions
            .iter()
            .position(|pt| pt.id == updated.id)
            .ok_or_else(|| CoreError::InvalidRef(format!("planned transaction {}", updated.id)))?;
        self.planned_transactions[position] = updated;
        self.planned_transactions.sort_by_key(|pt| pt.due_date);
        Ok(())
    }

    pub fn remove_planned_transaction(&mut self, id: Uuid) -> Result<PlannedTransaction> {
        remove_by_id(&mut self.planned_transactions, id)
            .ok_or_else(|| CoreError::InvalidRef(format!("planned transaction {}", id)))
    }

    pub fn add_budget(&mut self, budget: Budget) {
        self.budgets.push(budget);
    }

    pub fn remove_budget(&mut self, id: Uuid) -> Result<Budget> {
        remove_by_id(&mut self.budgets, id)
            .ok_or_else(|| CoreError::InvalidRef(format!("budget {}", id)))
    }

    // ---- statements ---------------------------------------------------

    pub fn remove_statement(&mut self, id: &str) -> Result<Statement> {
        let position = self
            .statements
            .iter()
            .position(|stmt| stmt.id == id)
            .ok_or_else(|| CoreError::InvalidRef(format!("statement {}", id)))?;
        Ok(self.statements.remove(position))
    }

    /// Generates every missing statement up to the horizon, merges the
    /// result into the saved set (deduplicated, sorted descending by period
    /// end), and stamps the check timestamp. Returns how many statements
    /// were created. Re-running with unchanged inputs creates nothing.
    pub fn ensure_statement_coverage(&mut self, now: DateTime<Utc>) -> usize {
        let Some(app_start) = self.app_start_date else {
            return 0;
        };
        let created = generate_missing_statements(
            &self.accounts,
            &self.transactions,
            &self.statements,
            app_start,
            now.date_naive(),
        );
        let count = created.len();
        if count > 0 {
            self.statements = merge_statements(&self.statements, &created);
            tracing::info!(count, "auto-generated statements");
        }
        self.last_statement_check = Some(now);
        count
    }

    /// The opportunistic 24-hour check: runs a coverage pass only when the
    /// last one is recorded and stale. Returns the number of statements
    /// created (zero when the gate does not fire).
    pub fn maybe_run_statement_check(&mut self, now: DateTime<Utc>) -> usize {
        if self.app_start_date.is_some()
            && should_run_scheduled_check(self.last_statement_check, now)
        {
            tracing::debug!("running scheduled statement check");
            self.ensure_statement_coverage(now)
        } else {
            0
        }
    }

    // ---- reporting ----------------------------------------------------

    pub fn summary(&self) -> SnapshotSummary {
        let mut summary = SnapshotSummary::default();
        for account in &self.accounts {
            match account.kind {
                AccountKind::Bank | AccountKind::Cash | AccountKind::Investment => {
                    if account.balance > 0.0 {
                        summary.total_available_funds += account.balance;
                    }
                }
                AccountKind::CreditCard => {
                    if account.balance < 0.0 {
                        summary.total_credit_card_debt += account.balance.abs();
                    }
                }
            }
        }
        summary
    }
}

fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> Option<T> {
    let position = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(position))
}
