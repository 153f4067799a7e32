use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// Direction of a transaction relative to the accounts it touches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionNature {
    Income,
    Expense,
    Transfer,
}

/// Account linkage for a transaction. Income and expenses touch a single
/// account; transfers always carry both endpoints, so a transfer without a
/// destination cannot be represented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "nature", rename_all = "lowercase")]
pub enum Flow {
    Income { account_id: Uuid },
    Expense { account_id: Uuid },
    Transfer { from_account_id: Uuid, to_account_id: Uuid },
}

impl Flow {
    pub fn nature(&self) -> TransactionNature {
        match self {
            Flow::Income { .. } => TransactionNature::Income,
            Flow::Expense { .. } => TransactionNature::Expense,
            Flow::Transfer { .. } => TransactionNature::Transfer,
        }
    }

    /// The single account an income or expense posts against.
    pub fn account_id(&self) -> Option<Uuid> {
        match self {
            Flow::Income { account_id } | Flow::Expense { account_id } => Some(*account_id),
            Flow::Transfer { .. } => None,
        }
    }

    /// Every account id this flow touches, deduplicated.
    pub fn involved_accounts(&self) -> Vec<Uuid> {
        match self {
            Flow::Income { account_id } | Flow::Expense { account_id } => vec![*account_id],
            Flow::Transfer {
                from_account_id,
                to_account_id,
            } => {
                if from_account_id == to_account_id {
                    vec![*from_account_id]
                } else {
                    vec![*from_account_id, *to_account_id]
                }
            }
        }
    }
}

/// A concrete, dated ledger entry. `amount` is always stored positive;
/// direction is derived from `flow`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    #[serde(flatten)]
    pub flow: Flow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When a transfer pays down a credit card, the statement it settles.
    /// Decouples the payment date from the period the payment reduces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_statement_id: Option<String>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        flow: Flow,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            amount,
            category: category.into(),
            flow,
            notes: None,
            linked_statement_id: None,
        }
    }

    /// Tags a transfer as a payment toward a specific statement.
    pub fn with_linked_statement(mut self, statement_id: impl Into<String>) -> Self {
        self.linked_statement_id = Some(statement_id.into());
        self
    }

    pub fn nature(&self) -> TransactionNature {
        self.flow.nature()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} [{:?}]", self.description, self.flow.nature())
    }
}
