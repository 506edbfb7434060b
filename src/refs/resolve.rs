// src/refs/resolve.rs
//! Candidate path computation for references.
//!
//! Two interpretations are tried: root-relative and relative to the source
//! file's directory. Anything that would climb above the workspace root is
//! discarded, so resolution never reaches outside the tree.

use crate::config::Workspace;
use crate::discovery::Inventory;
use crate::file_class;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    /// The reference with its leading `/` stripped, read from the root.
    RootRelative,
    /// The reference joined onto the source file's parent directory.
    SourceRelative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub path: String,
    pub origin: CandidateOrigin,
    /// Set when this path is also the source-relative reading.
    pub on_disk: bool,
}

impl Candidate {
    /// Whether this single candidate names an existing file. Source-relative
    /// readings are also checked on disk, which covers files the scan ignored.
    #[must_use]
    pub fn exists(&self, ws: &Workspace, inventory: &Inventory) -> bool {
        if inventory.contains(&self.path) {
            return true;
        }
        self.on_disk && ws.resolve(&self.path).is_file()
    }
}

/// Resolves `.` and `..` segments of a `/`-separated path.
///
/// Returns `None` if the path climbs above its base or normalizes to nothing.
#[must_use]
pub fn normalize(path: &str) -> Option<String> {
    let mut stack: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                stack.pop()?;
            }
            s => stack.push(s),
        }
    }
    if stack.is_empty() {
        None
    } else {
        Some(stack.join("/"))
    }
}

/// Computes the ordered candidates for `raw` found in `source_file`.
///
/// Duplicate interpretations collapse to the first one, which then keeps the
/// disk check of the source-relative reading.
#[must_use]
pub fn candidates(source_file: &str, raw: &str) -> Vec<Candidate> {
    let reference = file_class::strip_suffixes(raw);
    let mut out: Vec<Candidate> = Vec::with_capacity(2);

    if let Some(path) = normalize(reference.trim_start_matches('/')) {
        out.push(Candidate {
            path,
            origin: CandidateOrigin::RootRelative,
            on_disk: false,
        });
    }

    // A root-absolute reference has no source-relative reading.
    if !reference.starts_with('/') {
        let parent = source_file.rsplit_once('/').map_or("", |(dir, _)| dir);
        let joined = if parent.is_empty() {
            reference.to_string()
        } else {
            format!("{parent}/{reference}")
        };
        if let Some(path) = normalize(&joined) {
            match out.iter_mut().find(|c| c.path == path) {
                Some(existing) => existing.on_disk = true,
                None => out.push(Candidate {
                    path,
                    origin: CandidateOrigin::SourceRelative,
                    on_disk: true,
                }),
            }
        }
    }

    out
}

/// Logical OR over every candidate; the order they are tried in does not
/// matter.
#[must_use]
pub fn any_exists(ws: &Workspace, inventory: &Inventory, candidates: &[Candidate]) -> bool {
    candidates.iter().any(|c| c.exists(ws, inventory))
}
