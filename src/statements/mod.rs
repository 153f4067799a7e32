//! Statement engines: period math, statement building, auto-generation,
//! and change-reactive regeneration.

pub mod autogen;
pub mod builder;
pub mod period;
pub mod regenerate;

pub use autogen::{
    auto_generate_for_account, generate_missing_statements, merge_statements,
    should_run_scheduled_check, STATEMENT_CHECK_INTERVAL_HOURS,
};
pub use builder::{build_figures, build_statement, StatementFigures};
pub use period::{calculate_period, StatementPeriod};
pub use regenerate::{regenerate_affected, RegenerationOutcome};
