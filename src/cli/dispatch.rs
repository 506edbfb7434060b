//! Command dispatch, kept out of the binary so it stays a thin shell.

use super::args::{Cli, Commands};
use super::handlers::{self, Session};
use crate::exit::RearchiveExit;
use anyhow::Result;

/// Executes the parsed command line.
///
/// # Errors
/// Returns error if loading the workspace or a handler fails.
pub fn execute(cli: Cli) -> Result<RearchiveExit> {
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        return Ok(RearchiveExit::Success);
    };

    let session = Session::open(cli.root, cli.verbose)?;

    match command {
        Commands::Audit {
            only,
            fail_on_high,
            json,
        } => handlers::handle_audit(&session, &only, fail_on_high, json),
        Commands::Restructure { rollback: true, .. } => handlers::handle_rollback(&session),
        Commands::Restructure {
            dry_run,
            no_backup,
            plan,
            ..
        } => handlers::handle_restructure(&session, dry_run, no_backup, plan.as_deref()),
        Commands::Skills { dry_run, skill } => handlers::handle_skills(&session, dry_run, &skill),
    }
}
