// src/snapshot/mod.rs
//! Full-content workspace snapshots for manual rollback.
//!
//! A `Snapshot` is immutable once captured. `restore` is the only thing that
//! reads it back into the tree, and it never deletes files that appeared after
//! the capture.

pub mod store;

pub use store::SnapshotStore;

use crate::discovery::normalize_path;
use crate::error::{RearchiveError, Result};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::{DirEntry, WalkDir};

/// Directories never captured: version-control metadata and our own state.
const EXCLUDED_DIRS: &[&str] = &[".git", crate::STATE_DIR];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    timestamp: u64,
    files: BTreeMap<String, Vec<u8>>,
}

impl Snapshot {
    pub(crate) fn from_parts(timestamp: u64, files: BTreeMap<String, Vec<u8>>) -> Self {
        Self { timestamp, files }
    }

    /// Capture time, Unix epoch seconds.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&[u8]> {
        self.files.get(rel).map(Vec::as_slice)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// SHA-256 over every (path, content) pair in path order.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (path, bytes) in &self.files {
            hasher.update(path.as_bytes());
            hasher.update([0u8]);
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
        hex::encode(hasher.finalize())
    }
}

/// Outcome of a restore: which files came back and which could not be written.
#[derive(Debug, Clone, Default)]
pub struct RestoreReport {
    pub restored: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl RestoreReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reads every file under `root` into a new snapshot.
///
/// # Errors
/// Returns error if the walk or any file read fails; a partial snapshot is
/// never returned.
pub fn capture(root: &Path) -> Result<Snapshot> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| RearchiveError::Other(e.to_string()))?
        .as_secs();

    let mut files = BTreeMap::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| RearchiveError::Other(e.to_string()))?;
        let bytes = fs::read(entry.path()).map_err(|e| RearchiveError::io(e, entry.path()))?;
        files.insert(normalize_path(rel), bytes);
    }

    Ok(Snapshot::from_parts(timestamp, files))
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && EXCLUDED_DIRS.contains(&entry.file_name().to_string_lossy().as_ref())
}

/// Writes every snapshot entry back under `root`, overwriting current content.
///
/// Failures are recorded per file and the remaining files are still restored.
#[must_use]
pub fn restore(snapshot: &Snapshot, root: &Path) -> RestoreReport {
    let mut report = RestoreReport::default();
    for (rel, bytes) in snapshot.files() {
        let target = rel
            .split('/')
            .fold(root.to_path_buf(), |acc, seg| acc.join(seg));
        match restore_file(&target, bytes) {
            Ok(()) => report.restored.push(rel.to_string()),
            Err(e) => report.failed.push((rel.to_string(), e.to_string())),
        }
    }
    report
}

fn restore_file(target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, bytes)
}
