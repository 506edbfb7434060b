//! Planning and applying tree restructures.
//!
//! Planning is pure: it looks at an inventory and a declarative [`PlanSpec`]
//! and returns a [`RestructurePlan`]. Only [`execute`] touches the disk.

pub mod executor;
pub mod outcome;
pub mod plan;

pub use executor::{execute, ExecOptions};
pub use outcome::{OperationOutcome, OutcomeStatus};
pub use plan::{build_plan, MoveSpec, PlanSpec, RewriteSpec, SyncSpec};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    Move,
    Copy,
}

/// One step of a restructure. Carries no state about whether it ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    CreateDirectory {
        path: String,
    },
    MoveOrCopy {
        src: String,
        dst: String,
        mode: TransferMode,
    },
    RewriteReferences {
        file: String,
        pairs: Vec<(String, String)>,
    },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDirectory { path } => write!(f, "mkdir {path}"),
            Self::MoveOrCopy { src, dst, mode } => {
                let verb = match mode {
                    TransferMode::Move => "move",
                    TransferMode::Copy => "copy",
                };
                write!(f, "{verb} {src} -> {dst}")
            }
            Self::RewriteReferences { file, pairs } => {
                write!(f, "rewrite {file} ({} pairs)", pairs.len())
            }
        }
    }
}

/// Ordered operations; executed front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestructurePlan {
    pub operations: Vec<Operation>,
}

impl RestructurePlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
