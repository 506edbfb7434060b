// src/exit.rs
//! Standardized process exit codes for `rearchive`.
//!
//! Provides a stable contract for scripts and CI jobs.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum RearchiveExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, malformed config or plan).
    Error = 1,
    /// `--fail-on-high` was requested and at least one HIGH finding exists.
    HighFindings = 2,
    /// `--rollback` was requested but no snapshot is stored.
    NoSnapshot = 3,
}

impl RearchiveExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for RearchiveExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
