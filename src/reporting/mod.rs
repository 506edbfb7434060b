//! Human-facing output: colored console summaries and markdown reports.
//!
//! Everything here consumes findings and outcomes; nothing feeds back into
//! auditing or execution.

pub mod console;
pub mod markdown;
pub mod tree;

pub use markdown::{render_check_report, render_skills_report, render_structure_report};
pub use tree::render_tree;

use crate::error::{RearchiveError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `body` to `<root>/<reports_dir>/<name>`, creating the directory.
///
/// # Errors
/// Returns error if the directory or file cannot be written.
pub fn write_report(root: &Path, reports_dir: &str, name: &str, body: &str) -> Result<PathBuf> {
    let dir = root.join(reports_dir);
    fs::create_dir_all(&dir).map_err(|e| RearchiveError::io(e, &dir))?;
    let path = dir.join(name);
    fs::write(&path, body).map_err(|e| RearchiveError::io(e, &path))?;
    Ok(path)
}

#[must_use]
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
