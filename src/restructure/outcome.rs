// src/restructure/outcome.rs
use super::Operation;
use serde::Serialize;
use std::fmt;

/// Result of one executed operation. Closed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Created,
    Exists,
    Moved,
    Copied,
    DryRun,
    SrcMissing,
    DstExists,
    Updated,
    NoChange,
    FileMissing,
    /// I/O failure inside this one operation.
    Failed(String),
}

impl OutcomeStatus {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Exists => "exists",
            Self::Moved => "moved",
            Self::Copied => "copied",
            Self::DryRun => "dry_run",
            Self::SrcMissing => "src_missing",
            Self::DstExists => "dst_exists",
            Self::Updated => "updated",
            Self::NoChange => "no_change",
            Self::FileMissing => "file_missing",
            Self::Failed(_) => "failed",
        }
    }

    /// Whether the operation changed the tree.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Created | Self::Moved | Self::Copied | Self::Updated
        )
    }

    /// Precondition failures and I/O errors.
    #[must_use]
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            Self::SrcMissing | Self::DstExists | Self::FileMissing | Self::Failed(_)
        )
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    pub operation: Operation,
    pub status: OutcomeStatus,
    /// Rewrite pairs that applied (or would apply, in dry-run).
    pub changes: Vec<(String, String)>,
}

impl OperationOutcome {
    #[must_use]
    pub fn new(operation: Operation, status: OutcomeStatus) -> Self {
        Self {
            operation,
            status,
            changes: Vec::new(),
        }
    }
}
