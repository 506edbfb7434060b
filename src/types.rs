// src/types.rs
use crate::file_class::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scanned file. Recreated on every scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Root-relative, `/`-separated.
    pub path: String,
    pub category: Category,
    pub size_bytes: u64,
    /// Only computed for text-like categories; `None` when unreadable.
    pub line_count: Option<usize>,
}

/// How serious a finding is. Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::High, Self::Medium, Self::Low, Self::Info];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single audit result. Write-once; consumed by reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: String,
    pub source_file: String,
    pub line: Option<usize>,
    pub message: String,
    pub suggestion: Option<String>,
}

impl Finding {
    #[must_use]
    pub fn new(
        severity: Severity,
        category: &str,
        source_file: &str,
        line: Option<usize>,
        message: String,
    ) -> Self {
        Self {
            severity,
            category: category.to_string(),
            source_file: source_file.to_string(),
            line,
            message,
            suggestion: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// `file:line` when a line is known, else just the file.
    #[must_use]
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{line}", self.source_file),
            None => self.source_file.clone(),
        }
    }
}

/// Per-severity totals for a set of findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

impl SeverityCounts {
    #[must_use]
    pub fn tally(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low + self.info
    }
}
