//! Explicit workspace context threaded through every component call.

use super::WorkspaceSettings;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    ignore_dirs: BTreeSet<String>,
    ignore_files: BTreeSet<String>,
    fragments_segment: String,
}

impl Workspace {
    /// Workspace rooted at `root` with default ignore sets.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self::from_settings(root, &WorkspaceSettings::default())
    }

    #[must_use]
    pub fn from_settings(root: &Path, settings: &WorkspaceSettings) -> Self {
        Self {
            root: root.to_path_buf(),
            ignore_dirs: settings.ignore_dirs.iter().cloned().collect(),
            ignore_files: settings.ignore_files.iter().cloned().collect(),
            fragments_segment: settings.fragments_segment.clone(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name)
    }

    #[must_use]
    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignore_files.contains(name)
    }

    #[must_use]
    pub fn ignore_dirs(&self) -> &BTreeSet<String> {
        &self.ignore_dirs
    }

    #[must_use]
    pub fn fragments_segment(&self) -> &str {
        &self.fragments_segment
    }

    /// Absolute path for a root-relative, `/`-separated path.
    #[must_use]
    pub fn resolve(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |acc, seg| acc.join(seg))
    }
}
