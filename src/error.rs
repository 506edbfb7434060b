// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RearchiveError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("No snapshot found at {path}. Nothing to roll back to.")]
    NoSnapshot { path: PathBuf },

    #[error("Snapshot is corrupt: {reason}")]
    CorruptSnapshot { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Directory walk failed: {0}")]
    Walk(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RearchiveError>;

impl RearchiveError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to RearchiveError::Io with unknown path.
impl From<std::io::Error> for RearchiveError {
    fn from(source: std::io::Error) -> Self {
        RearchiveError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<walkdir::Error> for RearchiveError {
    fn from(e: walkdir::Error) -> Self {
        RearchiveError::Walk(e.to_string())
    }
}
