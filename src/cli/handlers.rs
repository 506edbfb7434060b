// src/cli/handlers.rs
use crate::audit::{self, CheckKind};
use crate::config::{Config, Workspace};
use crate::discovery::{self, Inventory};
use crate::error::RearchiveError;
use crate::events::{EventKind, EventLogger};
use crate::exit::RearchiveExit;
use crate::reporting::{self, console};
use crate::restructure::{self, ExecOptions, OutcomeStatus, PlanSpec};
use crate::skills::{self, SkillName, SkillStatus};
use crate::snapshot::{self, SnapshotStore};
use crate::vcs::{self, GitCli};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

const TREE_DEPTH: usize = 3;

/// Everything a handler needs about the workspace it runs against.
pub struct Session {
    pub root: PathBuf,
    pub config: Config,
    pub ws: Workspace,
    pub events: EventLogger,
}

impl Session {
    /// Resolves the root and loads its configuration.
    ///
    /// # Errors
    /// Returns error if the root is not a directory or the config is invalid.
    pub fn open(root: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let root = match root {
            Some(r) => r,
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        if !root.is_dir() {
            bail!("Workspace root is not a directory: {}", root.display());
        }
        let mut config = Config::load(&root)
            .with_context(|| format!("Failed to load config in {}", root.display()))?;
        config.verbose = verbose;
        let ws = config.workspace(&root);
        let events = EventLogger::new(&root);
        Ok(Self {
            root,
            config,
            ws,
            events,
        })
    }

    fn reports_dir(&self) -> &str {
        &self.config.preferences.reports_dir
    }

    fn branch(&self) -> Option<String> {
        vcs::branch_label(&GitCli::new(&self.root))
    }

    fn scan(&self) -> Inventory {
        let inventory = discovery::scan(&self.ws);
        if self.config.verbose {
            for e in inventory.entries() {
                let lines = e.line_count.map_or_else(|| "-".to_string(), |n| n.to_string());
                println!("  {} {} ({}, {lines} lines)", "scan".dimmed(), e.path, e.category);
            }
        }
        if inventory.walk_errors() > 0 {
            eprintln!(
                "{} {} entries could not be read during the scan",
                "warning:".yellow(),
                inventory.walk_errors()
            );
        }
        inventory
    }

    fn write_report(&self, name: &str, body: &str) -> Result<()> {
        let path = reporting::write_report(&self.root, self.reports_dir(), name, body)
            .with_context(|| format!("Failed to write report {name}"))?;
        console::print_written(&path);
        Ok(())
    }
}

/// Handles `audit`.
///
/// # Errors
/// Returns error if a report cannot be written.
pub fn handle_audit(
    session: &Session,
    only: &[CheckKind],
    fail_on_high: bool,
    json: bool,
) -> Result<RearchiveExit> {
    let inventory = session.scan();
    let report = audit::run_audit(&session.ws, &inventory, &session.config.audit, only);

    if session.config.verbose {
        for r in &report.references {
            let mark = if r.exists { "ok".green() } else { "missing".red() };
            println!(
                "  {} {}:{} {} [{}]",
                mark,
                r.source_file,
                r.line,
                r.raw_text,
                r.candidate_paths().join(" | ")
            );
        }
    }
    console::print_audit(&report, &inventory);

    let branch = session.branch();
    let md = reporting::render_check_report(&report, &inventory, branch.as_deref())?;
    session.write_report("check.md", &md)?;
    if json {
        let body = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        session.write_report("check.json", &body)?;
    }

    let counts = report.counts();
    session.events.log(EventKind::AuditCompleted {
        files: inventory.len(),
        references: report.references.len(),
        findings: counts.total(),
        high: counts.high,
    });

    if fail_on_high && report.has_high() {
        Ok(RearchiveExit::HighFindings)
    } else {
        Ok(RearchiveExit::Success)
    }
}

/// Handles `restructure` (without `--rollback`).
///
/// # Errors
/// Returns error if the plan cannot be loaded, or the snapshot cannot be
/// captured or saved. Nothing is mutated in those cases.
pub fn handle_restructure(
    session: &Session,
    dry_run: bool,
    no_backup: bool,
    plan_file: Option<&Path>,
) -> Result<RearchiveExit> {
    let spec = match plan_file {
        Some(path) => PlanSpec::load_file(path)
            .with_context(|| format!("Failed to load plan {}", path.display()))?,
        None => session.config.restructure.clone(),
    };

    let inventory = session.scan();
    let plan = restructure::build_plan(inventory.entries(), &spec);
    session.events.log(EventKind::RestructureStarted {
        operations: plan.len(),
        dry_run,
    });

    let backup = if dry_run || no_backup {
        None
    } else {
        let snap = snapshot::capture(&session.root).context("Failed to capture snapshot")?;
        SnapshotStore::new(&session.root)
            .save(&snap)
            .context("Failed to save snapshot")?;
        session.events.log(EventKind::SnapshotCaptured {
            files: snap.len(),
            digest: snap.digest(),
        });
        println!("{} {} files captured", "Snapshot:".bold(), snap.len());
        Some(snap)
    };

    let opts = ExecOptions {
        dry_run,
        gitkeep: session.config.preferences.gitkeep,
    };
    let outcomes = restructure::execute(&session.ws, &plan, opts);
    for o in &outcomes {
        session.events.log(EventKind::OperationApplied {
            operation: o.operation.to_string(),
            status: o.status.label().to_string(),
        });
    }
    console::print_outcomes(&outcomes);

    if !dry_run {
        let tree = reporting::render_tree(&session.ws, TREE_DEPTH);
        let branch = session.branch();
        let md = reporting::render_structure_report(
            &outcomes,
            backup.as_ref(),
            &tree,
            branch.as_deref(),
        )?;
        session.write_report("structure.md", &md)?;
    }

    session.events.log(EventKind::RestructureCompleted {
        mutated: outcomes.iter().filter(|o| o.status.is_mutation()).count(),
        problems: outcomes.iter().filter(|o| o.status.is_problem()).count(),
    });

    if outcomes
        .iter()
        .any(|o| matches!(o.status, OutcomeStatus::Failed(_)))
    {
        Ok(RearchiveExit::Error)
    } else {
        Ok(RearchiveExit::Success)
    }
}

/// Handles `restructure --rollback`.
///
/// # Errors
/// Returns error if the stored snapshot is unreadable or corrupt.
pub fn handle_rollback(session: &Session) -> Result<RearchiveExit> {
    let store = SnapshotStore::new(&session.root);
    let snap = match store.load_required() {
        Ok(snap) => snap,
        Err(e @ RearchiveError::NoSnapshot { .. }) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(RearchiveExit::NoSnapshot);
        }
        Err(e) => return Err(e).context("Failed to load snapshot"),
    };

    let report = snapshot::restore(&snap, &session.root);
    session.events.log(EventKind::SnapshotRestored {
        restored: report.restored.len(),
        failed: report.failed.len(),
    });
    console::print_restore(&report);

    if report.is_complete() {
        Ok(RearchiveExit::Success)
    } else {
        Ok(RearchiveExit::Error)
    }
}

/// Handles `skills`.
///
/// # Errors
/// Returns error if the report cannot be written.
pub fn handle_skills(
    session: &Session,
    dry_run: bool,
    forced: &[SkillName],
) -> Result<RearchiveExit> {
    let detected = if forced.is_empty() {
        skills::detect(&session.ws)
    } else {
        Vec::new()
    };
    let mut names: Vec<SkillName> = if forced.is_empty() {
        detected.iter().map(|d| d.name).collect()
    } else {
        forced.to_vec()
    };
    let mut seen = Vec::with_capacity(names.len());
    names.retain(|n| {
        let fresh = !seen.contains(n);
        seen.push(*n);
        fresh
    });

    if session.config.verbose {
        for d in &detected {
            println!("  {} {}: {}", "detect".dimmed(), d.name, d.reason);
        }
    }

    let outcomes = skills::generate(&session.ws, &names, dry_run);
    for o in outcomes.iter().filter(|o| o.status == SkillStatus::Created) {
        session.events.log(EventKind::SkillGenerated {
            name: o.name.to_string(),
            path: o.path.to_string(),
        });
    }
    console::print_skill_outcomes(&outcomes);

    if !dry_run {
        let branch = session.branch();
        let md = reporting::render_skills_report(&detected, &outcomes, branch.as_deref())?;
        session.write_report("skills.md", &md)?;
    }

    if outcomes
        .iter()
        .any(|o| matches!(o.status, SkillStatus::Failed(_)))
    {
        Ok(RearchiveExit::Error)
    } else {
        Ok(RearchiveExit::Success)
    }
}
