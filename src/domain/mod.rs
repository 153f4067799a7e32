//! Domain models: persistence-friendly types consumed by the engines.

pub mod account;
pub mod budget;
pub mod common;
pub mod planned;
pub mod statement;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use budget::{Budget, DateWindow};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use planned::{PlannedTransaction, Recurrence, RecurrenceEnd};
pub use statement::{statement_id, Statement};
pub use transaction::{Flow, Transaction, TransactionNature};
