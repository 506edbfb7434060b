// src/events.rs
//! Machine-readable event logging for audit trails.
//!
//! Events are appended to `.rearchive/events.jsonl`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const EVENTS_FILE: &str = "events.jsonl";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    AuditCompleted {
        files: usize,
        references: usize,
        findings: usize,
        high: usize,
    },
    SnapshotCaptured {
        files: usize,
        digest: String,
    },
    SnapshotRestored {
        restored: usize,
        failed: usize,
    },
    RestructureStarted {
        operations: usize,
        dry_run: bool,
    },
    OperationApplied {
        operation: String,
        status: String,
    },
    RestructureCompleted {
        mutated: usize,
        problems: usize,
    },
    SkillGenerated {
        name: String,
        path: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RearchiveEvent {
    pub timestamp: u64,
    pub kind: EventKind,
}

#[derive(Clone)]
pub struct EventLogger {
    log_path: PathBuf,
}

impl EventLogger {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        let log_path = root.join(crate::STATE_DIR).join(EVENTS_FILE);
        Self { log_path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(&self, kind: EventKind) {
        // Best-effort: a failed log write never fails the command.
        if let Ok(json) = Self::serialize_event(kind) {
            let _ = self.append_to_file(&json);
        }
    }

    fn serialize_event(kind: EventKind) -> Result<String> {
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let event = RearchiveEvent { timestamp, kind };
        Ok(serde_json::to_string(&event)?)
    }

    fn append_to_file(&self, line: &str) -> Result<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
