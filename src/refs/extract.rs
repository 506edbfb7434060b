// src/refs/extract.rs
//! Pattern-based reference extraction from markup text.
//!
//! This is text scanning, not parsing. It finds `src=`/`href=` attribute
//! values and `fetch("…html")` calls; anything structural is out of reach.

use super::RefKind;
use crate::file_class::{self, Category};
use regex::Regex;
use std::sync::LazyLock;

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:src|href)\s*=\s*["']([^"']+)["']"#)
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static FETCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bfetch\s*\(\s*["']([^"']+\.html?)["']"#)
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap_or_else(|_| panic!("Invalid Regex")));
static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// A reference string as found in the text, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    pub text: String,
    pub kind: RefKind,
    /// 1-based line of the match.
    pub line: usize,
}

/// Capability seam: anything that can pull references out of markup text.
pub trait ReferenceExtractor {
    fn extract(&self, text: &str) -> Vec<RawReference>;
}

/// The default regex-driven extractor.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    fragments_segment: String,
}

impl PatternExtractor {
    #[must_use]
    pub fn new(fragments_segment: &str) -> Self {
        Self {
            fragments_segment: fragments_segment.to_string(),
        }
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new("partials")
    }
}

impl ReferenceExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> Vec<RawReference> {
        let text = blank_comments(text);
        let lines = LineIndex::new(&text);
        let mut found = Vec::new();

        for caps in ATTR_RE.captures_iter(&text) {
            let Some(m) = caps.get(1) else { continue };
            let raw = m.as_str().trim();
            if is_discarded(raw) {
                continue;
            }
            if let Some(kind) = classify_reference(raw, &self.fragments_segment) {
                found.push(RawReference {
                    text: raw.to_string(),
                    kind,
                    line: lines.line_of(m.start()),
                });
            }
        }

        for caps in FETCH_RE.captures_iter(&text) {
            let Some(m) = caps.get(1) else { continue };
            let raw = m.as_str().trim();
            if is_discarded(raw) {
                continue;
            }
            found.push(RawReference {
                text: raw.to_string(),
                kind: RefKind::Partial,
                line: lines.line_of(m.start()),
            });
        }

        found.sort_by_key(|r| r.line);
        found
    }
}

/// External, scheme-prefixed, protocol-relative and anchor references are
/// never workspace paths.
#[must_use]
pub fn is_discarded(raw: &str) -> bool {
    raw.is_empty() || raw.starts_with("//") || raw.starts_with('#') || SCHEME_RE.is_match(raw)
}

/// Classifies by the reference's own extension; `None` means "not a tracked
/// asset kind" and the reference is dropped.
#[must_use]
pub fn classify_reference(raw: &str, fragments_segment: &str) -> Option<RefKind> {
    match file_class::classify_str(raw) {
        Category::JavaScript => Some(RefKind::Script),
        Category::Css => Some(RefKind::Style),
        Category::Image => Some(RefKind::Image),
        Category::Html => {
            let path = file_class::strip_suffixes(raw);
            if path.split('/').any(|seg| seg == fragments_segment) {
                Some(RefKind::Partial)
            } else {
                Some(RefKind::Link)
            }
        }
        _ => None,
    }
}

/// Replaces HTML comments with spaces, keeping newlines so offsets and line
/// numbers still line up with the original text.
pub(crate) fn blank_comments(text: &str) -> String {
    COMMENT_RE
        .replace_all(text, |caps: &regex::Captures| {
            caps[0]
                .chars()
                .map(|c| if c == '\n' { '\n' } else { ' ' })
                .collect::<String>()
        })
        .into_owned()
}

pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    pub(crate) fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<RawReference> {
        PatternExtractor::default().extract(text)
    }

    #[test]
    fn attributes_classified_by_extension() {
        let refs = extract(
            r#"<script src="js/main.js"></script>
<link rel="stylesheet" href='styles/site.css?v=3'>
<img src="images/a.PNG">
<a href="pages/about.html">About</a>
<a href="partials/header.html">h</a>"#,
        );
        let kinds: Vec<RefKind> = refs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RefKind::Script,
                RefKind::Style,
                RefKind::Image,
                RefKind::Link,
                RefKind::Partial
            ]
        );
        assert_eq!(refs[1].text, "styles/site.css?v=3");
        assert_eq!(refs[4].line, 5);
    }

    #[test]
    fn external_and_anchor_refs_discarded() {
        let refs = extract(
            r##"<a href="https://x.org/a.html">x</a>
<script src="//cdn.example.com/lib.js"></script>
<a href="#main">skip</a>
<a href="mailto:me@example.com">m</a>
<a href="tel:+100">t</a>
<a href="javascript:void(0)">j</a>
<img src="data:image/png;base64,AAAA">"##,
        );
        assert!(refs.is_empty(), "{refs:?}");
    }

    #[test]
    fn unknown_extensions_are_not_extracted() {
        let refs = extract(r#"<a href="docs/">d</a><a href="cv.pdf">cv</a>"#);
        assert!(refs.is_empty());
    }

    #[test]
    fn fetch_calls_are_partials() {
        let refs = extract(
            "<script>\n  fetch('partials/footer.html').then(r => r.text());\n  fetch(\"nav.html\");\n</script>",
        );
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().all(|r| r.kind == RefKind::Partial));
        assert_eq!(refs[0].line, 2);
        assert_eq!(refs[1].text, "nav.html");
    }

    #[test]
    fn commented_markup_is_ignored() {
        let text = "<!-- TODO: restore <script src=\"old.js\"></script>\n -->\n<img src=\"a.png\">";
        let refs = extract(text);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].text, "a.png");
        assert_eq!(refs[0].line, 3);
    }

    #[test]
    fn root_absolute_paths_are_kept() {
        let refs = extract(r#"<script src="/js/app.js"></script>"#);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].text, "/js/app.js");
    }

    #[test]
    fn custom_fragments_segment() {
        let ex = PatternExtractor::new("includes");
        let refs = ex.extract(r#"<a href="includes/nav.html">n</a><a href="partials/x.html">x</a>"#);
        assert_eq!(refs[0].kind, RefKind::Partial);
        assert_eq!(refs[1].kind, RefKind::Link);
    }
}
