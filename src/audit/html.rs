// src/audit/html.rs
//! Document-structure basics, by substring and pattern, not by parsing.

use crate::config::Workspace;
use crate::discovery::{self, Inventory};
use crate::file_class::Category;
use crate::refs::extract::{blank_comments, LineIndex};
use crate::types::{Finding, Severity};
use regex::Regex;
use std::sync::LazyLock;

pub const HTML_STRUCTURE: &str = "html_structure";
pub const ACCESSIBILITY: &str = "accessibility";

static HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head[\s>]").unwrap_or_else(|_| panic!("Invalid Regex")));
static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body[\s>]").unwrap_or_else(|_| panic!("Invalid Regex")));
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<html(?:\s[^>]*)?>").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static LANG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\blang\s*=").unwrap_or_else(|_| panic!("Invalid Regex")));
static VIEWPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)name\s*=\s*["']viewport["']"#).unwrap_or_else(|_| panic!("Invalid Regex"))
});
static IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").unwrap_or_else(|_| panic!("Invalid Regex")));
static ALT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\balt\s*=").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Checks every markup file. Fragments only get the per-image check.
#[must_use]
pub fn check(ws: &Workspace, inventory: &Inventory) -> Vec<Finding> {
    let mut findings = Vec::new();
    for entry in inventory.iter_category(Category::Html) {
        let text = blank_comments(&discovery::read_text_lossy(&ws.resolve(&entry.path)));
        let is_fragment = entry
            .path
            .split('/')
            .any(|seg| seg == ws.fragments_segment());
        if !is_fragment {
            findings.extend(check_document(&entry.path, &text));
        }
        findings.extend(check_images(&entry.path, &text));
    }
    findings
}

/// Structure findings for a full document.
#[must_use]
pub fn check_document(file: &str, text: &str) -> Vec<Finding> {
    let lower = text.to_lowercase();
    let mut out = Vec::new();
    let mut push = |sev: Severity, line: Option<usize>, msg: &str, fix: &str| {
        out.push(
            Finding::new(sev, HTML_STRUCTURE, file, line, msg.to_string()).with_suggestion(fix),
        );
    };

    if !lower.contains("<!doctype html") {
        push(
            Severity::High,
            Some(1),
            "missing DOCTYPE declaration",
            "add <!DOCTYPE html> as the first line",
        );
    }
    let html_tag = HTML_TAG_RE.find(text);
    if html_tag.is_none() {
        push(Severity::High, Some(1), "missing <html> element", "wrap the document in <html>");
    }
    if !HEAD_RE.is_match(text) {
        push(Severity::High, Some(1), "missing <head> element", "add a <head> section");
    }
    if !BODY_RE.is_match(text) {
        push(Severity::High, Some(1), "missing <body> element", "add a <body> section");
    }
    if !lower.contains("<title") {
        push(Severity::Medium, None, "missing <title>", "add a <title> inside <head>");
    }
    if !lower.contains("charset") {
        push(
            Severity::Medium,
            None,
            "missing charset declaration",
            r#"add <meta charset="UTF-8">"#,
        );
    }
    if !VIEWPORT_RE.is_match(text) {
        push(
            Severity::Medium,
            None,
            "missing viewport meta",
            r#"add <meta name="viewport" content="width=device-width, initial-scale=1">"#,
        );
    }
    if let Some(tag) = html_tag {
        if !LANG_RE.is_match(tag.as_str()) {
            push(
                Severity::Medium,
                Some(1),
                "<html> has no lang attribute",
                r#"add a language, e.g. <html lang="en">"#,
            );
        }
    }
    out
}

/// One HIGH finding per `<img>` without an `alt` attribute.
#[must_use]
pub fn check_images(file: &str, text: &str) -> Vec<Finding> {
    let lines = LineIndex::new(text);
    IMG_RE
        .find_iter(text)
        .filter(|m| !ALT_RE.is_match(m.as_str()))
        .map(|m| {
            let tag: String = m.as_str().chars().take(60).collect();
            Finding::new(
                Severity::High,
                ACCESSIBILITY,
                file,
                Some(lines.line_of(m.start())),
                format!("<img> without alt attribute: {tag}"),
            )
            .with_suggestion(r#"add alt="" for decoration or a description"#)
        })
        .collect()
}
