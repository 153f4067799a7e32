use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::Result;
use crate::snapshot::Snapshot;

use super::StorageBackend;

const APP_DIR: &str = "fintrack";
const TMP_SUFFIX: &str = "tmp";

/// JSON file storage for snapshots, rooted at the platform data directory
/// unless an explicit root is given (tests pass a temp dir).
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        });
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", canonical_name(name)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, snapshot: &Snapshot, name: &str) -> Result<()> {
        save_snapshot_to_path(snapshot, &self.snapshot_path(name))
    }

    fn load(&self, name: &str) -> Result<Snapshot> {
        load_snapshot_from_path(&self.snapshot_path(name))
    }
}

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_path(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a snapshot from disk, returning structured errors on failure.
pub fn load_snapshot_from_path(path: &Path) -> Result<Snapshot> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "snapshot".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
