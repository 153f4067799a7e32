//! Snapshot persistence. The engines never touch storage; collaborators
//! load a [`Snapshot`](crate::snapshot::Snapshot), call into the core, and
//! save the replacement.

pub mod json_backend;

use crate::errors::Result;
use crate::snapshot::Snapshot;

pub use json_backend::{load_snapshot_from_path, save_snapshot_to_path, JsonStorage};

/// Persistence interface for whole-snapshot save/load.
pub trait StorageBackend {
    fn save(&self, snapshot: &Snapshot, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Snapshot>;
}
