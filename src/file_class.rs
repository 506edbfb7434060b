//! File classification: maps extensions to asset categories.
//!
//! The category drives two decisions: whether a file gets a line count during
//! scanning, and what kind a reference to it gets during extraction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Asset category derived from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Html,
    Css,
    JavaScript,
    Markdown,
    Json,
    Python,
    Shell,
    Image,
    Video,
    Font,
    Other,
}

impl Category {
    /// Returns `true` for categories whose files are read for a line count.
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Html
                | Self::Css
                | Self::JavaScript
                | Self::Markdown
                | Self::Json
                | Self::Python
                | Self::Shell
        )
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::JavaScript => "JavaScript",
            Self::Markdown => "Markdown",
            Self::Json => "JSON",
            Self::Python => "Python",
            Self::Shell => "Shell",
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Font => "Font",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a path into a `Category` by its (case-insensitive) extension.
#[must_use]
pub fn classify(path: &Path) -> Category {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    classify_by_ext(&ext)
}

/// Classifies a `/`-separated path string. Query strings and fragments are
/// ignored, so `style.css?v=2` is still CSS.
#[must_use]
pub fn classify_str(path: &str) -> Category {
    classify(Path::new(strip_suffixes(path)))
}

/// Cuts a `?query` or `#fragment` suffix off a reference.
#[must_use]
pub fn strip_suffixes(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn classify_by_ext(ext: &str) -> Category {
    match ext {
        "html" | "htm" => Category::Html,
        "css" => Category::Css,
        "js" | "mjs" => Category::JavaScript,
        "md" => Category::Markdown,
        "json" => Category::Json,
        "py" => Category::Python,
        "sh" => Category::Shell,
        "jpg" | "jpeg" | "png" | "gif" | "svg" | "webp" | "ico" => Category::Image,
        "webm" | "mp4" => Category::Video,
        "woff" | "woff2" | "ttf" => Category::Font,
        _ => Category::Other,
    }
}
