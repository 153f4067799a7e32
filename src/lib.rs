#![doc(test(attr(deny(warnings))))]

//! Fintrack Core provides the statement, recurrence, and budget-projection
//! engines behind a personal finance tracker, together with the snapshot
//! state container and JSON persistence those engines are fed from.

pub mod dates;
pub mod domain;
pub mod errors;
pub mod projection;
pub mod recurrence;
pub mod snapshot;
pub mod statements;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fintrack Core tracing initialized.");
    });
}
