// src/refs/validate.rs
use super::extract::ReferenceExtractor;
use super::resolve;
use super::Reference;
use crate::config::Workspace;
use crate::discovery::{self, Inventory};
use crate::file_class::Category;
use crate::types::{Finding, Severity};

/// Finding category for references that resolve to nothing.
pub const DANGLING_REFERENCE: &str = "dangling_reference";

/// Every reference seen, plus the findings for the ones that failed.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub references: Vec<Reference>,
    pub findings: Vec<Finding>,
}

impl Validation {
    #[must_use]
    pub fn dangling(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(|r| !r.exists)
    }
}

/// Extracts and resolves references from every markup file in the inventory.
///
/// Unreadable files contribute no references.
#[must_use]
pub fn validate(
    ws: &Workspace,
    inventory: &Inventory,
    extractor: &dyn ReferenceExtractor,
) -> Validation {
    let mut out = Validation::default();

    for entry in inventory.iter_category(Category::Html) {
        let text = discovery::read_text_lossy(&ws.resolve(&entry.path));
        for raw in extractor.extract(&text) {
            let candidates = resolve::candidates(&entry.path, &raw.text);
            let exists = resolve::any_exists(ws, inventory, &candidates);
            let reference = Reference {
                source_file: entry.path.clone(),
                raw_text: raw.text,
                kind: raw.kind,
                line: raw.line,
                candidates,
                exists,
            };
            if !reference.exists {
                out.findings.push(dangling_finding(&reference));
            }
            out.references.push(reference);
        }
    }

    out
}

fn dangling_finding(reference: &Reference) -> Finding {
    Finding::new(
        Severity::High,
        DANGLING_REFERENCE,
        &reference.source_file,
        Some(reference.line),
        format!("referenced file does not exist: `{}`", reference.raw_text),
    )
    .with_suggestion(format!(
        "create the file or fix the path: {}",
        reference.raw_text
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::PatternExtractor;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, rel: &str, body: &str) -> std::io::Result<()> {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, body)
    }

    fn run(root: &Path) -> Validation {
        let ws = Workspace::new(root);
        let inv = discovery::scan(&ws);
        validate(&ws, &inv, &PatternExtractor::default())
    }

    #[test]
    fn missing_script_is_one_high_finding() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        write(d.path(), "a.html", r#"<script src="b.js"></script>"#)?;

        let v = run(d.path());
        assert_eq!(v.findings.len(), 1);
        let f = &v.findings[0];
        assert_eq!(f.severity, Severity::High);
        assert_eq!(f.source_file, "a.html");
        assert!(f.message.contains("b.js"));
        Ok(())
    }

    #[test]
    fn relative_reference_from_subdirectory_resolves() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        write(d.path(), "main.js", "")?;
        write(d.path(), "pages/p.html", r#"<script src="../main.js"></script>"#)?;

        let v = run(d.path());
        assert!(v.findings.is_empty(), "{:?}", v.findings);
        assert_eq!(v.references.len(), 1);
        assert!(v.references[0].exists);
        Ok(())
    }

    #[test]
    fn ignored_dir_file_found_on_disk() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        write(d.path(), "node_modules/lib/x.js", "")?;
        write(d.path(), "index.html", r#"<script src="node_modules/lib/x.js"></script>"#)?;

        let v = run(d.path());
        assert!(v.findings.is_empty());
        Ok(())
    }

    #[test]
    fn escaping_reference_fails_closed() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        write(d.path(), "pages/p.html", r#"<img src="../../secret.png">"#)?;
        let v = run(d.path());
        assert_eq!(v.findings.len(), 1);
        assert!(v.references[0].candidates.is_empty());
        Ok(())
    }

    #[test]
    fn candidate_order_does_not_change_existence() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        write(d.path(), "pages/images/a.png", "")?;
        write(d.path(), "images/b.png", "")?;
        let ws = Workspace::new(d.path());
        let inv = discovery::scan(&ws);

        for raw in ["images/a.png", "images/b.png", "images/c.png"] {
            let forward = resolve::candidates("pages/p.html", raw);
            let mut backward = forward.clone();
            backward.reverse();
            assert_eq!(
                resolve::any_exists(&ws, &inv, &forward),
                resolve::any_exists(&ws, &inv, &backward),
                "{raw}"
            );
        }
        Ok(())
    }
}
