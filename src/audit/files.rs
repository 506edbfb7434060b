// src/audit/files.rs
use crate::config::{RecommendedFile, Workspace};
use crate::discovery::Inventory;
use crate::file_class::Category;
use crate::types::{Finding, Severity};

pub const MISSING_FILE: &str = "missing_file";
pub const STRUCTURE: &str = "structure";

/// Recommended files that are absent, plus loose root scripts.
#[must_use]
pub fn check(ws: &Workspace, inventory: &Inventory, recommended: &[RecommendedFile]) -> Vec<Finding> {
    let mut findings: Vec<Finding> = recommended
        .iter()
        .filter(|r| !ws.resolve(&r.path).exists())
        .map(|r| {
            Finding::new(r.severity, MISSING_FILE, &r.path, None, r.message.clone())
                .with_suggestion(format!("create `{}`", r.path))
        })
        .collect();

    let root_scripts = inventory
        .iter_category(Category::JavaScript)
        .filter(|e| !e.path.contains('/'))
        .count();
    if root_scripts > 0 && !ws.resolve("js").is_dir() {
        findings.push(
            Finding::new(
                Severity::Medium,
                STRUCTURE,
                ".",
                None,
                format!("{root_scripts} script file(s) at the root and no js/ directory"),
            )
            .with_suggestion("run `rearchive restructure` to move scripts under js/"),
        );
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditSettings;
    use crate::discovery;
    use std::fs;

    #[test]
    fn empty_tree_reports_every_recommendation() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        let ws = Workspace::new(d.path());
        let settings = AuditSettings::default();
        let f = check(&ws, &discovery::scan(&ws), &settings.recommended);
        assert_eq!(f.len(), settings.recommended.len());
        assert_eq!(f[0].severity, Severity::High);
        assert_eq!(f[0].source_file, "index.html");
        Ok(())
    }

    #[test]
    fn root_scripts_without_js_dir() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        fs::write(d.path().join("main.js"), "")?;
        let ws = Workspace::new(d.path());

        let f = check(&ws, &discovery::scan(&ws), &[]);
        assert_eq!(f.len(), 1);
        assert_eq!(f[0].category, STRUCTURE);

        fs::create_dir(d.path().join("js"))?;
        assert!(check(&ws, &discovery::scan(&ws), &[]).is_empty());
        Ok(())
    }
}
