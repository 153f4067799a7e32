use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::domain::transaction::{Flow, TransactionNature};

/// Recurrence rule for a planned transaction. Each variant carries exactly
/// the fields that are meaningful for it, so an interval without a unit or
/// days-of-week on a monthly rule cannot be represented.
///
/// `days_of_week` uses 0 = Sunday through 6 = Saturday. When the set is
/// non-empty, `interval` counts whole weeks: a candidate date is produced
/// only when its weekday is in the set and the number of whole weeks since
/// the anchor date is a multiple of the interval (the anchor itself is
/// always eligible when its weekday matches).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Recurrence {
    OneTime,
    Daily {
        interval: u32,
    },
    Weekly {
        interval: u32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        days_of_week: Vec<u8>,
    },
    Monthly {
        interval: u32,
    },
    Yearly {
        interval: u32,
    },
}

impl Recurrence {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::OneTime)
    }
}

/// Terminator for a recurring rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RecurrenceEnd {
    #[default]
    Never,
    OnDate(NaiveDate),
    AfterOccurrences(u32),
}

/// A recurring (or one-time) planned transaction. This is a rule, not a
/// materialized series: occurrences are expanded on demand for a window and
/// never persisted individually.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedTransaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: String,
    #[serde(flatten)]
    pub flow: Flow,
    /// Anchor date: the first (or only) occurrence of the series.
    pub due_date: NaiveDate,
    pub recurrence: Recurrence,
    #[serde(default)]
    pub ends: RecurrenceEnd,
    /// Paused rules still exist but expand to nothing.
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_active() -> bool {
    true
}

impl PlannedTransaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        flow: Flow,
        due_date: NaiveDate,
        recurrence: Recurrence,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            category: category.into(),
            flow,
            due_date,
            recurrence,
            ends: RecurrenceEnd::Never,
            is_active: true,
            notes: None,
        }
    }

    pub fn ending(mut self, ends: RecurrenceEnd) -> Self {
        self.ends = ends;
        self
    }

    pub fn paused(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn nature(&self) -> TransactionNature {
        self.flow.nature()
    }
}

impl Identifiable for PlannedTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for PlannedTransaction {
    fn display_label(&self) -> String {
        format!("{} [{:?}]", self.description, self.recurrence)
    }
}
