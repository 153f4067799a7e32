use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};
use crate::errors::CoreError;

/// A closed date interval. Both bounds are inclusive: statement periods,
/// recurrence windows, and budget ranges all treat their endpoints as part
/// of the interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if end <= start {
            return Err(CoreError::InvalidInput(
                "window end must be after start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A reporting window. Budgets hold no transactions themselves; their
/// contents are computed by projecting planned transactions and credit-card
/// payments into the window at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub window: DateWindow,
}

impl Budget {
    pub fn new(
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            window: DateWindow::new(start, end)?,
        })
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Budget {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Budget {
    fn display_label(&self) -> String {
        format!("{} ({} - {})", self.name, self.window.start, self.window.end)
    }
}
