use super::pluralize;
use crate::audit::AuditReport;
use crate::discovery::Inventory;
use crate::restructure::{OperationOutcome, OutcomeStatus};
use crate::skills::{SkillOutcome, SkillStatus};
use crate::snapshot::RestoreReport;
use crate::types::{Finding, Severity};
use colored::Colorize;
use std::path::Path;

fn severity_tag(severity: Severity) -> colored::ColoredString {
    let tag = format!("{:<6}", severity.label());
    match severity {
        Severity::High => tag.red().bold(),
        Severity::Medium => tag.yellow(),
        Severity::Low => tag.cyan(),
        Severity::Info => tag.dimmed(),
    }
}

fn print_finding(f: &Finding) {
    println!("{} {} {}", severity_tag(f.severity), f.location().blue(), f.message);
    if let Some(ref suggestion) = f.suggestion {
        println!("       {} {}", "=".blue(), suggestion.dimmed());
    }
}

/// Prints every finding, then a one-line summary.
pub fn print_audit(report: &AuditReport, inventory: &Inventory) {
    for f in &report.findings {
        print_finding(f);
    }
    if !report.findings.is_empty() {
        println!();
    }

    let counts = report.counts();
    let files = inventory.len();
    if counts.total() == 0 {
        println!(
            "{} No findings across {files} {}.",
            "OK".green().bold(),
            pluralize("file", files)
        );
        return;
    }

    let parts: Vec<String> = Severity::ALL
        .iter()
        .filter(|s| counts.get(**s) > 0)
        .map(|s| format!("{} {}", counts.get(*s), s.label()))
        .collect();
    let head = if report.has_high() {
        "FAIL".red().bold()
    } else {
        "WARN".yellow().bold()
    };
    println!(
        "{head} {} across {files} {}.",
        parts.join(", "),
        pluralize("file", files)
    );
}

fn status_colored(status: &OutcomeStatus) -> colored::ColoredString {
    let text = status.to_string();
    match status {
        OutcomeStatus::Created
        | OutcomeStatus::Moved
        | OutcomeStatus::Copied
        | OutcomeStatus::Updated => text.green(),
        OutcomeStatus::DryRun => text.cyan(),
        OutcomeStatus::Exists | OutcomeStatus::NoChange => text.dimmed(),
        OutcomeStatus::SrcMissing | OutcomeStatus::DstExists | OutcomeStatus::FileMissing => {
            text.yellow()
        }
        OutcomeStatus::Failed(_) => text.red().bold(),
    }
}

pub fn print_outcomes(outcomes: &[OperationOutcome]) {
    for o in outcomes {
        println!("  {:<14} {}", status_colored(&o.status), o.operation);
        for (old, new) in &o.changes {
            println!("  {:<14} {} {} {}", "", old.dimmed(), "->".blue(), new);
        }
    }
    let mutated = outcomes.iter().filter(|o| o.status.is_mutation()).count();
    let problems = outcomes.iter().filter(|o| o.status.is_problem()).count();
    println!(
        "{} {} {}, {mutated} applied, {problems} skipped or failed.",
        "Restructure:".bold(),
        outcomes.len(),
        pluralize("operation", outcomes.len())
    );
}

pub fn print_restore(report: &RestoreReport) {
    for (path, reason) in &report.failed {
        println!("  {} {path}: {reason}", "failed".red().bold());
    }
    let head = if report.is_complete() {
        "OK".green().bold()
    } else {
        "PARTIAL".yellow().bold()
    };
    println!(
        "{head} Restored {} {} from snapshot.",
        report.restored.len(),
        pluralize("file", report.restored.len())
    );
}

pub fn print_skill_outcomes(outcomes: &[SkillOutcome]) {
    if outcomes.is_empty() {
        println!("{} No skills needed.", "OK".green().bold());
        return;
    }
    for o in outcomes {
        let status = match &o.status {
            SkillStatus::Created => "created".green(),
            SkillStatus::Exists => "exists".dimmed(),
            SkillStatus::DryRun => "dry_run".cyan(),
            SkillStatus::Failed(reason) => format!("failed: {reason}").red().bold(),
        };
        println!("  {:<10} {:<10} {} ({} lines)", status, o.name, o.path, o.lines);
    }
}

pub fn print_written(path: &Path) {
    println!("{} {}", "Report:".dimmed(), path.display());
}
