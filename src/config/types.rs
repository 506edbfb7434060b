use crate::restructure::PlanSpec;
use crate::types::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,
    /// Path segment that marks markup fragments (partials).
    #[serde(default = "default_fragments_segment")]
    pub fragments_segment: String,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            ignore_dirs: default_ignore_dirs(),
            ignore_files: default_ignore_files(),
            fragments_segment: default_fragments_segment(),
        }
    }
}

fn default_ignore_dirs() -> Vec<String> {
    [".git", "node_modules", "__pycache__", ".jekyll-cache", "_site", crate::STATE_DIR]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_ignore_files() -> Vec<String> {
    vec![".DS_Store".into(), "Thumbs.db".into(), ".gitignore".into()]
}

fn default_fragments_segment() -> String {
    "partials".to_string()
}

/// A file the `files` check expects to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedFile {
    pub path: String,
    pub severity: Severity,
    pub message: String,
}

impl RecommendedFile {
    fn new(path: &str, severity: Severity, message: &str) -> Self {
        Self {
            path: path.to_string(),
            severity,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    #[serde(default = "default_recommended")]
    pub recommended: Vec<RecommendedFile>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            recommended: default_recommended(),
        }
    }
}

fn default_recommended() -> Vec<RecommendedFile> {
    vec![
        RecommendedFile::new("index.html", Severity::High, "main entry point missing"),
        RecommendedFile::new("README.md", Severity::Medium, "project documentation missing"),
        RecommendedFile::new("styles/styles.css", Severity::Medium, "main stylesheet missing"),
        RecommendedFile::new("partials/header.html", Severity::Low, "header fragment missing"),
        RecommendedFile::new("partials/footer.html", Severity::Low, "footer fragment missing"),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Drop an empty `.gitkeep` into directories the executor creates.
    #[serde(default = "default_true")]
    pub gitkeep: bool,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            gitkeep: true,
            reports_dir: default_reports_dir(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_reports_dir() -> String {
    "reports".to_string()
}

/// On-disk shape of `rearchive.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RearchiveToml {
    #[serde(default)]
    pub workspace: WorkspaceSettings,
    #[serde(default)]
    pub audit: AuditSettings,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub restructure: PlanSpec,
}
