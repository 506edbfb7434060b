// src/config/mod.rs
pub mod types;
pub mod workspace;

pub use self::types::{AuditSettings, Preferences, RearchiveToml, RecommendedFile, WorkspaceSettings};
pub use self::workspace::Workspace;

use crate::error::{RearchiveError, Result};
use crate::restructure::PlanSpec;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const CONFIG_FILE: &str = "rearchive.toml";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub workspace: WorkspaceSettings,
    pub audit: AuditSettings,
    pub preferences: Preferences,
    pub restructure: PlanSpec,
    pub verbose: bool,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `rearchive.toml` from `root`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(RearchiveError::io(e, path)),
        }
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or has wrongly typed fields.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let parsed: RearchiveToml = toml::from_str(content)?;
        Ok(Self {
            workspace: parsed.workspace,
            audit: parsed.audit,
            preferences: parsed.preferences,
            restructure: parsed.restructure,
            verbose: false,
        })
    }

    /// Builds the explicit workspace context every component receives.
    #[must_use]
    pub fn workspace(&self, root: &Path) -> Workspace {
        Workspace::from_settings(root, &self.workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn missing_file_gives_defaults() -> Result<()> {
        let d = tempfile::tempdir()?;
        let c = Config::load(d.path())?;
        assert!(c.workspace.ignore_dirs.iter().any(|d| d == ".git"));
        assert_eq!(c.workspace.fragments_segment, "partials");
        assert!(c.preferences.gitkeep);
        assert!(!c.restructure.create_dirs.is_empty());
        Ok(())
    }

    #[test]
    fn partial_toml_keeps_other_defaults() -> Result<()> {
        let c = Config::parse_toml("[workspace]\nfragments_segment = \"includes\"\n")?;
        assert_eq!(c.workspace.fragments_segment, "includes");
        assert!(c.workspace.ignore_files.iter().any(|f| f == ".DS_Store"));
        assert_eq!(c.preferences.reports_dir, "reports");
        Ok(())
    }

    #[test]
    fn recommended_files_parse_severity() -> Result<()> {
        let c = Config::parse_toml(
            "[audit]\nrecommended = [{ path = \"a.html\", severity = \"LOW\", message = \"m\" }]\n",
        )?;
        assert_eq!(c.audit.recommended.len(), 1);
        assert_eq!(c.audit.recommended[0].severity, Severity::Low);
        Ok(())
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::parse_toml("[workspace\nbroken").is_err());
    }
}
