use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Represents a financial account tracked by the application.
///
/// `balance` is the running signed balance, maintained synchronously by
/// snapshot mutations rather than derived from the transaction list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Calendar day (1-31) on which this account's billing cycle closes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_closing_day: Option<u32>,
    /// Calendar day (1-31) on which statement payments are usually made.
    /// Meaningful only for credit-card accounts; used for payment-date
    /// projection, never enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_payment_day: Option<u32>,
}

impl Account {
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            balance: 0.0,
            currency: None,
            notes: None,
            statement_closing_day: None,
            preferred_payment_day: None,
        }
    }

    /// Configures the billing-cycle closing day.
    pub fn with_closing_day(mut self, day: u32) -> Self {
        self.statement_closing_day = Some(day);
        self
    }

    /// Configures the preferred statement-payment day.
    pub fn with_payment_day(mut self, day: u32) -> Self {
        self.preferred_payment_day = Some(day);
        self
    }

    pub fn is_credit_card(&self) -> bool {
        self.kind == AccountKind::CreditCard
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({:?})", self.name, self.kind)
    }
}

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Bank,
    CreditCard,
    Cash,
    Investment,
}
