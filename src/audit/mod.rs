// src/audit/mod.rs
//! Read-only workspace audit.
//!
//! Each [`CheckKind`] contributes findings; `links` also contributes the full
//! reference list used by reports.

pub mod files;
pub mod html;

use crate::config::{AuditSettings, Workspace};
use crate::discovery::Inventory;
use crate::refs::{self, PatternExtractor, Reference};
use crate::types::{Finding, Severity, SeverityCounts};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Dangling path references in markup.
    Links,
    /// Document structure and image alt text.
    Html,
    /// Recommended files and top-level layout.
    Files,
}

impl CheckKind {
    pub const ALL: [CheckKind; 3] = [Self::Links, Self::Html, Self::Files];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Links => "links",
            Self::Html => "html",
            Self::Files => "files",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub checks: Vec<CheckKind>,
    pub findings: Vec<Finding>,
    pub references: Vec<Reference>,
}

impl AuditReport {
    #[must_use]
    pub fn has_high(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::High)
    }

    #[must_use]
    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts::tally(&self.findings)
    }
}

/// Runs the requested checks; an empty slice means all of them.
#[must_use]
pub fn run_audit(
    ws: &Workspace,
    inventory: &Inventory,
    settings: &AuditSettings,
    checks: &[CheckKind],
) -> AuditReport {
    let mut checks: Vec<CheckKind> = if checks.is_empty() {
        CheckKind::ALL.to_vec()
    } else {
        checks.to_vec()
    };
    checks.sort_unstable();
    checks.dedup();

    let mut report = AuditReport {
        checks: checks.clone(),
        ..AuditReport::default()
    };

    for check in checks {
        match check {
            CheckKind::Links => {
                let extractor = PatternExtractor::new(ws.fragments_segment());
                let validation = refs::validate(ws, inventory, &extractor);
                report.findings.extend(validation.findings);
                report.references = validation.references;
            }
            CheckKind::Html => report.findings.extend(html::check(ws, inventory)),
            CheckKind::Files => {
                report
                    .findings
                    .extend(files::check(ws, inventory, &settings.recommended));
            }
        }
    }

    report.findings.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.source_file.cmp(&b.source_file))
            .then_with(|| a.line.cmp(&b.line))
    });
    report
}
