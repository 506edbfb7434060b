// src/snapshot/store.rs
//! Durable storage for the most recent snapshot.

use super::Snapshot;
use crate::error::{RearchiveError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const BACKUP_SUBDIR: &str = "backup";
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// On-disk record. File contents are hex encoded.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    timestamp: u64,
    digest: String,
    files: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store under `<root>/.rearchive/backup/snapshot.json`.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self::at(
            root.join(crate::STATE_DIR)
                .join(BACKUP_SUBDIR)
                .join(SNAPSHOT_FILE),
        )
    }

    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Persists `snapshot`, replacing whatever was stored before.
    ///
    /// # Errors
    /// Returns error if the state directory or file cannot be written.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let record = SnapshotRecord {
            timestamp: snapshot.timestamp(),
            digest: snapshot.digest(),
            files: snapshot
                .files()
                .map(|(path, bytes)| (path.to_string(), hex::encode(bytes)))
                .collect(),
        };
        let content = serde_json::to_string(&record)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| RearchiveError::io(e, parent))?;
        }
        // Write beside the target then rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| RearchiveError::io(e, &tmp))?;
        fs::rename(&tmp, &self.path).map_err(|e| RearchiveError::io(e, &self.path))?;
        Ok(())
    }

    /// Loads the stored snapshot, or `None` when nothing was ever saved.
    ///
    /// # Errors
    /// Returns error if the file is unreadable, malformed, or fails its digest.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RearchiveError::io(e, &self.path)),
        };
        let record: SnapshotRecord = serde_json::from_str(&content)?;

        let mut files = BTreeMap::new();
        for (path, encoded) in record.files {
            if !is_safe_relative(&path) {
                return Err(RearchiveError::CorruptSnapshot {
                    reason: format!("entry escapes the workspace: {path}"),
                });
            }
            files.insert(path, hex::decode(encoded)?);
        }

        let snapshot = Snapshot::from_parts(record.timestamp, files);
        if snapshot.digest() != record.digest {
            return Err(RearchiveError::CorruptSnapshot {
                reason: "content digest mismatch".to_string(),
            });
        }
        Ok(Some(snapshot))
    }

    /// Like [`SnapshotStore::load`], but a missing snapshot is an error.
    ///
    /// # Errors
    /// Returns `NoSnapshot` if nothing is stored, or any `load` error.
    pub fn load_required(&self) -> Result<Snapshot> {
        self.load()?.ok_or_else(|| RearchiveError::NoSnapshot {
            path: self.path.clone(),
        })
    }
}

fn is_safe_relative(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && path.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}
