// src/cli/args.rs
use crate::audit::CheckKind;
use crate::skills::SkillName;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rearchive",
    version,
    about = "Audit and restructure a tree of interlinked web assets"
)]
pub struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Print per-file detail while scanning
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check references, document structure and recommended files
    Audit {
        /// Run only these check categories
        #[arg(long, value_enum, num_args = 1..)]
        only: Vec<CheckKind>,
        /// Exit with code 2 if any HIGH finding exists
        #[arg(long)]
        fail_on_high: bool,
        /// Also write reports/check.json
        #[arg(long)]
        json: bool,
    },
    /// Apply the restructure plan, or roll back to the last snapshot
    Restructure {
        /// Compute outcomes without changing anything
        #[arg(long, short = 'n')]
        dry_run: bool,
        /// Restore the stored snapshot instead of planning
        #[arg(long, conflicts_with_all = ["dry_run", "no_backup", "plan"])]
        rollback: bool,
        /// Skip the snapshot taken before execution
        #[arg(long)]
        no_backup: bool,
        /// Read the plan from this TOML file instead of rearchive.toml
        #[arg(long, value_name = "FILE")]
        plan: Option<PathBuf>,
    },
    /// Detect and generate missing site scripts and stylesheets
    Skills {
        /// Report what would be generated without writing
        #[arg(long, short = 'n')]
        dry_run: bool,
        /// Generate these skills regardless of detection
        #[arg(long, value_enum, num_args = 1..)]
        skill: Vec<SkillName>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_flags_parse() {
        let cli = Cli::try_parse_from([
            "rearchive", "--root", "site", "audit", "--only", "links", "files", "--fail-on-high",
        ]);
        let Ok(cli) = cli else {
            panic!("parse failed");
        };
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        match cli.command {
            Some(Commands::Audit {
                only, fail_on_high, ..
            }) => {
                assert_eq!(only, vec![CheckKind::Links, CheckKind::Files]);
                assert!(fail_on_high);
            }
            _ => panic!("expected audit"),
        }
    }

    #[test]
    fn rollback_conflicts_with_dry_run() {
        let res = Cli::try_parse_from(["rearchive", "restructure", "--rollback", "-n"]);
        assert!(res.is_err());
    }

    #[test]
    fn unknown_skill_rejected() {
        assert!(Cli::try_parse_from(["rearchive", "skills", "--skill", "carousel"]).is_err());
        assert!(Cli::try_parse_from(["rearchive", "skills", "--skill", "utils_css"]).is_ok());
    }
}
