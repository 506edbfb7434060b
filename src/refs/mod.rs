//! Path references between workspace files.
//!
//! Extraction finds path-like strings in markup, resolution turns each one into
//! candidate root-relative paths, validation decides existence and emits
//! findings for the dangling ones.

pub mod extract;
pub mod resolve;
pub mod validate;

pub use extract::{PatternExtractor, RawReference, ReferenceExtractor};
pub use resolve::{Candidate, CandidateOrigin};
pub use validate::{validate, Validation, DANGLING_REFERENCE};

use serde::Serialize;
use std::fmt;

/// What a reference points at, judged by its own extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    Script,
    Style,
    Image,
    Link,
    Partial,
}

impl RefKind {
    pub const ALL: [RefKind; 5] = [
        Self::Script,
        Self::Style,
        Self::Image,
        Self::Link,
        Self::Partial,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Style => "style",
            Self::Image => "image",
            Self::Link => "link",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reference found in a source file, with its resolution result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub source_file: String,
    pub raw_text: String,
    pub kind: RefKind,
    pub line: usize,
    pub candidates: Vec<Candidate>,
    pub exists: bool,
}

impl Reference {
    /// The ordered candidate paths that were tested.
    #[must_use]
    pub fn candidate_paths(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.path.as_str()).collect()
    }
}
