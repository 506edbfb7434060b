// src/vcs.rs
//! Narrow read-only view of the version-control state around a workspace.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("git output was not valid UTF-8")]
    Utf8,
}

/// One entry of the recent history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub hash: String,
    pub subject: String,
}

pub trait VersionControl {
    /// # Errors
    /// Returns error if the query cannot run or fails.
    fn current_branch(&self) -> Result<String, VcsError>;

    /// # Errors
    /// Returns error if the query cannot run or no `origin` remote exists.
    fn remote_url(&self) -> Result<String, VcsError>;

    /// # Errors
    /// Returns error if the query cannot run or the history is empty.
    fn recent_log(&self, n: usize) -> Result<Vec<LogEntry>, VcsError>;
}

/// Shells out to the `git` binary in `root`.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, VcsError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                command: format!("git {}", args.join(" ")),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .map_err(|_| VcsError::Utf8)
    }
}

impl VersionControl for GitCli {
    fn current_branch(&self) -> Result<String, VcsError> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn remote_url(&self) -> Result<String, VcsError> {
        self.run(&["remote", "get-url", "origin"])
    }

    fn recent_log(&self, n: usize) -> Result<Vec<LogEntry>, VcsError> {
        let count = format!("-{n}");
        let text = self.run(&["log", &count, "--format=%h%x09%s"])?;
        Ok(parse_log(&text))
    }
}

fn parse_log(text: &str) -> Vec<LogEntry> {
    text.lines()
        .filter_map(|line| {
            let (hash, subject) = line.split_once('\t')?;
            Some(LogEntry {
                hash: hash.to_string(),
                subject: subject.to_string(),
            })
        })
        .collect()
}

/// Branch name for report headers; `None` outside a repository.
#[must_use]
pub fn branch_label(vcs: &dyn VersionControl) -> Option<String> {
    vcs.current_branch().ok().filter(|b| !b.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Detached;

    impl VersionControl for Detached {
        fn current_branch(&self) -> Result<String, VcsError> {
            Err(VcsError::Failed {
                command: "git rev-parse".into(),
                status: 128,
                stderr: "not a git repository".into(),
            })
        }
        fn remote_url(&self) -> Result<String, VcsError> {
            Err(VcsError::Utf8)
        }
        fn recent_log(&self, _n: usize) -> Result<Vec<LogEntry>, VcsError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn log_lines_split_on_tab() {
        let entries = parse_log("abc1234\tfix nav\nbadline\ndef5678\tadd lightbox");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].hash, "def5678");
        assert_eq!(entries[0].subject, "fix nav");
    }

    #[test]
    fn failed_branch_query_means_no_label() {
        assert_eq!(branch_label(&Detached), None);
    }

    #[test]
    fn non_repo_dir_reports_error() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        // Either git is missing (Spawn) or the dir is not a repo (Failed).
        assert!(GitCli::new(d.path()).current_branch().is_err());
        Ok(())
    }
}
