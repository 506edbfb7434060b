// src/lib.rs
pub mod audit;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod exit;
pub mod file_class;
pub mod refs;
pub mod reporting;
pub mod restructure;
pub mod skills;
pub mod snapshot;
pub mod types;
pub mod vcs;

/// Hidden per-workspace state directory (snapshot store, event log).
pub const STATE_DIR: &str = ".rearchive";
