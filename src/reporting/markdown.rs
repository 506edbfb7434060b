// src/reporting/markdown.rs
//! Markdown reports written under the reports directory.

use crate::audit::AuditReport;
use crate::discovery::Inventory;
use crate::refs::RefKind;
use crate::restructure::OperationOutcome;
use crate::skills::{Detection, SkillOutcome};
use crate::snapshot::Snapshot;
use crate::types::{Finding, Severity};
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

fn write_header(out: &mut String, title: &str, branch: Option<&str>) -> Result<()> {
    writeln!(out, "# {title}")?;
    writeln!(out)?;
    if let Some(branch) = branch {
        writeln!(out, "> Branch: `{branch}`")?;
        writeln!(out)?;
    }
    Ok(())
}

/// Audit report: severity summary, file statistics, reference tallies and
/// every finding grouped by severity.
///
/// # Errors
/// Returns error if formatting fails.
pub fn render_check_report(
    report: &AuditReport,
    inventory: &Inventory,
    branch: Option<&str>,
) -> Result<String> {
    let mut out = String::new();
    write_header(&mut out, "Check Report", branch)?;

    let checks: Vec<&str> = report.checks.iter().map(|c| c.label()).collect();
    writeln!(out, "Checks run: {}", checks.join(", "))?;
    writeln!(out)?;

    write_severity_table(&mut out, report)?;
    write_category_table(&mut out, &report.findings)?;
    write_inventory_table(&mut out, inventory)?;
    if !report.references.is_empty() {
        write_reference_table(&mut out, report)?;
    }

    for severity in Severity::ALL {
        let group: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }
        writeln!(out, "## {severity} ({})", group.len())?;
        writeln!(out)?;
        for f in group {
            writeln!(out, "### [{}] {}", f.category, f.message)?;
            writeln!(out, "- **Location**: `{}`", f.location())?;
            if let Some(ref suggestion) = f.suggestion {
                writeln!(out, "- **Suggestion**: {suggestion}")?;
            }
            writeln!(out)?;
        }
    }

    Ok(out)
}

fn write_severity_table(out: &mut String, report: &AuditReport) -> Result<()> {
    let counts = report.counts();
    writeln!(out, "## Summary")?;
    writeln!(out)?;
    writeln!(out, "| Severity | Count |")?;
    writeln!(out, "|----------|-------|")?;
    for severity in Severity::ALL {
        writeln!(out, "| {severity} | {} |", counts.get(severity))?;
    }
    writeln!(out, "| **Total** | **{}** |", counts.total())?;
    writeln!(out)?;
    Ok(())
}

fn write_category_table(out: &mut String, findings: &[Finding]) -> Result<()> {
    if findings.is_empty() {
        return Ok(());
    }
    let mut by_category: BTreeMap<&str, [usize; 4]> = BTreeMap::new();
    for f in findings {
        let row = by_category.entry(f.category.as_str()).or_default();
        row[f.severity as usize] += 1;
    }

    writeln!(out, "## Findings by Category")?;
    writeln!(out)?;
    writeln!(out, "| Category | HIGH | MEDIUM | LOW | INFO |")?;
    writeln!(out, "|----------|------|--------|-----|------|")?;
    for (category, [h, m, l, i]) in by_category {
        writeln!(out, "| {category} | {h} | {m} | {l} | {i} |")?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_inventory_table(out: &mut String, inventory: &Inventory) -> Result<()> {
    writeln!(out, "## Files")?;
    writeln!(out)?;
    writeln!(out, "| Category | Files | Lines | Bytes |")?;
    writeln!(out, "|----------|-------|-------|-------|")?;
    for (category, stats) in inventory.category_stats() {
        writeln!(
            out,
            "| {category} | {} | {} | {} |",
            stats.files, stats.lines, stats.bytes
        )?;
    }
    writeln!(out, "| **Total** | **{}** | | |", inventory.len())?;
    if inventory.walk_errors() > 0 {
        writeln!(out)?;
        writeln!(out, "{} entries could not be read.", inventory.walk_errors())?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_reference_table(out: &mut String, report: &AuditReport) -> Result<()> {
    writeln!(out, "## References")?;
    writeln!(out)?;
    writeln!(out, "| Kind | Total | Dangling |")?;
    writeln!(out, "|------|-------|----------|")?;
    for kind in RefKind::ALL {
        let of_kind = report.references.iter().filter(|r| r.kind == kind);
        let (total, dangling) = of_kind.fold((0, 0), |(t, d), r| (t + 1, d + usize::from(!r.exists)));
        if total > 0 {
            writeln!(out, "| {kind} | {total} | {dangling} |")?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Restructure report: backup status, one row per operation, resulting tree.
///
/// # Errors
/// Returns error if formatting fails.
pub fn render_structure_report(
    outcomes: &[OperationOutcome],
    backup: Option<&Snapshot>,
    tree: &str,
    branch: Option<&str>,
) -> Result<String> {
    let mut out = String::new();
    write_header(&mut out, "Structure Report", branch)?;

    match backup {
        Some(snap) => writeln!(
            out,
            "Snapshot: {} files, sha256 `{}`. Roll back with `rearchive restructure --rollback`.",
            snap.len(),
            snap.digest()
        )?,
        None => writeln!(out, "Snapshot: none taken.")?,
    }
    writeln!(out)?;

    writeln!(out, "## Operations")?;
    writeln!(out)?;
    writeln!(out, "| # | Operation | Status |")?;
    writeln!(out, "|---|-----------|--------|")?;
    for (i, outcome) in outcomes.iter().enumerate() {
        writeln!(out, "| {} | `{}` | {} |", i + 1, outcome.operation, outcome.status)?;
        for (old, new) in &outcome.changes {
            writeln!(out, "| | `{old}` → `{new}` | |")?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Tree")?;
    writeln!(out)?;
    writeln!(out, "```")?;
    write!(out, "{tree}")?;
    writeln!(out, "```")?;
    Ok(out)
}

/// Skills report: what was detected and what happened to each artifact.
///
/// # Errors
/// Returns error if formatting fails.
pub fn render_skills_report(
    detected: &[Detection],
    outcomes: &[SkillOutcome],
    branch: Option<&str>,
) -> Result<String> {
    let mut out = String::new();
    write_header(&mut out, "Skills Report", branch)?;

    if !detected.is_empty() {
        writeln!(out, "## Detected")?;
        writeln!(out)?;
        for d in detected {
            writeln!(out, "- **{}**: {}", d.name, d.reason)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Artifacts")?;
    writeln!(out)?;
    if outcomes.is_empty() {
        writeln!(out, "Nothing to generate.")?;
        return Ok(out);
    }
    writeln!(out, "| Skill | Title | Path | Status | Lines |")?;
    writeln!(out, "|-------|-------|------|--------|-------|")?;
    for o in outcomes {
        writeln!(
            out,
            "| {} | {} | `{}` | {} | {} |",
            o.name,
            o.name.skill().title,
            o.path,
            o.status.label(),
            o.lines
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::CheckKind;
    use crate::restructure::{Operation, OutcomeStatus};
    use crate::skills::{SkillName, SkillStatus};

    fn finding(sev: Severity, cat: &str) -> Finding {
        Finding::new(sev, cat, "index.html", Some(3), "msg".to_string())
    }

    #[test]
    fn check_report_has_counts_and_groups() -> Result<()> {
        let report = AuditReport {
            checks: vec![CheckKind::Links, CheckKind::Html],
            findings: vec![
                finding(Severity::High, "dangling_reference"),
                finding(Severity::Medium, "html_structure"),
                finding(Severity::High, "html_structure"),
            ],
            references: Vec::new(),
        };
        let md = render_check_report(&report, &Inventory::default(), Some("main"))?;
        assert!(md.contains("> Branch: `main`"));
        assert!(md.contains("Checks run: links, html"));
        assert!(md.contains("| HIGH | 2 |"));
        assert!(md.contains("| html_structure | 1 | 1 | 0 | 0 |"));
        assert!(md.contains("## HIGH (2)"));
        assert!(md.contains("`index.html:3`"));
        assert!(!md.contains("## LOW"));
        Ok(())
    }

    #[test]
    fn structure_report_lists_changes() -> Result<()> {
        let outcomes = vec![OperationOutcome {
            operation: Operation::RewriteReferences {
                file: "index.html".into(),
                pairs: vec![("main.js".into(), "js/main.js".into())],
            },
            status: OutcomeStatus::Updated,
            changes: vec![("main.js".into(), "js/main.js".into())],
        }];
        let md = render_structure_report(&outcomes, None, "./\n", None)?;
        assert!(md.contains("Snapshot: none taken."));
        assert!(md.contains("| 1 | `rewrite index.html (1 pairs)` | updated |"));
        assert!(md.contains("`main.js` → `js/main.js`"));
        assert!(!md.contains("Branch"));
        Ok(())
    }

    #[test]
    fn skills_report_rows() -> Result<()> {
        let outcomes = vec![SkillOutcome {
            name: SkillName::Nav,
            path: "js/nav.js",
            lines: 10,
            status: SkillStatus::Created,
        }];
        let md = render_skills_report(&[], &outcomes, None)?;
        assert!(md.contains("| nav | Mobile navigation toggle | `js/nav.js` | created | 10 |"));
        Ok(())
    }
}
