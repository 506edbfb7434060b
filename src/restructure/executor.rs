// src/restructure/executor.rs
//! Applies a plan to the workspace, one outcome per operation.
//!
//! Every operation runs regardless of what happened before it. Nothing is
//! rolled back automatically; recovery goes through the snapshot store.

use super::{Operation, OperationOutcome, OutcomeStatus, RestructurePlan, TransferMode};
use crate::config::Workspace;
use std::fs;
use std::io;

pub const GITKEEP: &str = ".gitkeep";

#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOptions {
    /// Compute outcomes without mutating anything.
    pub dry_run: bool,
    /// Drop an empty `.gitkeep` into each created directory.
    pub gitkeep: bool,
}

/// Runs every operation in plan order.
///
/// The returned vector always has exactly `plan.len()` entries.
#[must_use]
pub fn execute(ws: &Workspace, plan: &RestructurePlan, opts: ExecOptions) -> Vec<OperationOutcome> {
    plan.operations
        .iter()
        .map(|op| apply(ws, op, opts))
        .collect()
}

fn apply(ws: &Workspace, op: &Operation, opts: ExecOptions) -> OperationOutcome {
    match op {
        Operation::CreateDirectory { path } => {
            let status = create_directory(ws, path, opts).unwrap_or_else(failed);
            OperationOutcome::new(op.clone(), status)
        }
        Operation::MoveOrCopy { src, dst, mode } => {
            let status = transfer(ws, src, dst, *mode, opts.dry_run).unwrap_or_else(failed);
            OperationOutcome::new(op.clone(), status)
        }
        Operation::RewriteReferences { file, pairs } => {
            match rewrite(ws, file, pairs, opts.dry_run) {
                Ok((status, changes)) => OperationOutcome {
                    operation: op.clone(),
                    status,
                    changes,
                },
                Err(e) => OperationOutcome::new(op.clone(), failed(e)),
            }
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn failed(e: io::Error) -> OutcomeStatus {
    OutcomeStatus::Failed(e.to_string())
}

fn create_directory(ws: &Workspace, path: &str, opts: ExecOptions) -> io::Result<OutcomeStatus> {
    let dir = ws.resolve(path);
    if dir.is_dir() {
        return Ok(OutcomeStatus::Exists);
    }
    if opts.dry_run {
        return Ok(OutcomeStatus::DryRun);
    }
    fs::create_dir_all(&dir)?;
    if opts.gitkeep {
        fs::write(dir.join(GITKEEP), b"")?;
    }
    Ok(OutcomeStatus::Created)
}

fn transfer(
    ws: &Workspace,
    src: &str,
    dst: &str,
    mode: TransferMode,
    dry_run: bool,
) -> io::Result<OutcomeStatus> {
    let from = ws.resolve(src);
    let to = ws.resolve(dst);
    if !from.is_file() {
        return Ok(OutcomeStatus::SrcMissing);
    }
    if to.exists() {
        return Ok(OutcomeStatus::DstExists);
    }
    if dry_run {
        return Ok(OutcomeStatus::DryRun);
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    // Original stays in place in both modes.
    fs::copy(&from, &to)?;
    Ok(match mode {
        TransferMode::Move => OutcomeStatus::Moved,
        TransferMode::Copy => OutcomeStatus::Copied,
    })
}

fn rewrite(
    ws: &Workspace,
    file: &str,
    pairs: &[(String, String)],
    dry_run: bool,
) -> io::Result<(OutcomeStatus, Vec<(String, String)>)> {
    let path = ws.resolve(file);
    if !path.is_file() {
        return Ok((OutcomeStatus::FileMissing, Vec::new()));
    }

    let original = fs::read_to_string(&path)?;
    let (content, changes) = apply_pairs(&original, pairs);
    if changes.is_empty() {
        return Ok((OutcomeStatus::NoChange, changes));
    }
    if dry_run {
        return Ok((OutcomeStatus::DryRun, changes));
    }
    fs::write(&path, content)?;
    Ok((OutcomeStatus::Updated, changes))
}

/// Applies each pair whose `old` is present and whose `new` is not yet.
///
/// Plain substring replacement of every occurrence; the guard on `new` is
/// what makes a second run a no-op.
#[must_use]
pub fn apply_pairs(text: &str, pairs: &[(String, String)]) -> (String, Vec<(String, String)>) {
    let mut content = text.to_string();
    let mut applied = Vec::new();
    for (old, new) in pairs {
        if old.is_empty() || !content.contains(old.as_str()) || content.contains(new.as_str()) {
            continue;
        }
        content = content.replace(old.as_str(), new);
        applied.push((old.clone(), new.clone()));
    }
    (content, applied)
}
