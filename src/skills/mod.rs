// src/skills/mod.rs
//! Peripheral site artifacts (small scripts and a utility stylesheet) that a
//! workspace is likely to need.
//!
//! Detection only reads; generation only ever creates files that are absent.

use crate::config::Workspace;
use crate::discovery;
use clap::ValueEnum;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::fmt;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillName {
    Whatif,
    Contact,
    Nav,
    Lightbox,
    #[value(name = "utils_css")]
    UtilsCss,
}

impl SkillName {
    pub const ALL: [SkillName; 5] = [
        Self::Whatif,
        Self::Contact,
        Self::Nav,
        Self::Lightbox,
        Self::UtilsCss,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Whatif => "whatif",
            Self::Contact => "contact",
            Self::Nav => "nav",
            Self::Lightbox => "lightbox",
            Self::UtilsCss => "utils_css",
        }
    }

    #[must_use]
    pub fn skill(self) -> &'static Skill {
        match self {
            Self::Whatif => &WHATIF,
            Self::Contact => &CONTACT,
            Self::Nav => &NAV,
            Self::Lightbox => &LIGHTBOX,
            Self::UtilsCss => &UTILS_CSS,
        }
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug)]
pub struct Skill {
    pub name: SkillName,
    pub title: &'static str,
    pub output: &'static str,
    pub detect_in: &'static [&'static str],
    pub pattern: &'static str,
    /// Recommended even when nothing references it.
    pub always: bool,
    pub template: &'static str,
}

static WHATIF: Skill = Skill {
    name: SkillName::Whatif,
    title: "What-if category filter",
    output: "js/whatif.js",
    detect_in: &["pages/what-if.html"],
    pattern: r"whatif\.js|filter.*category|data-category",
    always: false,
    template: include_str!("../../templates/skills/whatif.js"),
};

static CONTACT: Skill = Skill {
    name: SkillName::Contact,
    title: "Contact form validation",
    output: "js/contact.js",
    detect_in: &["index.html", "pages/contact.html"],
    pattern: r"contact.*form|form.*contact|#contact",
    always: false,
    template: include_str!("../../templates/skills/contact.js"),
};

static NAV: Skill = Skill {
    name: SkillName::Nav,
    title: "Mobile navigation toggle",
    output: "js/nav.js",
    detect_in: &["partials/header.html"],
    pattern: r"hamburger|menu-toggle|nav-toggle|mobile.*nav",
    always: true,
    template: include_str!("../../templates/skills/nav.js"),
};

static LIGHTBOX: Skill = Skill {
    name: SkillName::Lightbox,
    title: "Image lightbox",
    output: "js/lightbox.js",
    detect_in: &["pages/projects.html", "index.html"],
    pattern: r"lightbox|modal.*image|gallery.*modal",
    always: true,
    template: include_str!("../../templates/skills/lightbox.js"),
};

static UTILS_CSS: Skill = Skill {
    name: SkillName::UtilsCss,
    title: "Utility stylesheet",
    output: "css/utils.css",
    detect_in: &["styles/styles.css"],
    pattern: r"\.sr-only|\.visually-hidden|\.container|\.flex",
    always: true,
    template: include_str!("../../templates/skills/utils.css"),
};

impl Skill {
    fn regex(&self) -> Option<Regex> {
        RegexBuilder::new(self.pattern)
            .case_insensitive(true)
            .build()
            .ok()
    }

    /// First inspected file whose text matches the detection pattern.
    fn referenced_in(&self, ws: &Workspace) -> Option<&'static str> {
        let re = self.regex()?;
        self.detect_in.iter().copied().find(|rel| {
            let path = ws.resolve(rel);
            path.is_file() && re.is_match(&discovery::read_text_lossy(&path))
        })
    }
}

/// Why a skill was judged necessary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectReason {
    Referenced(String),
    PageExists(String),
    Recommended,
}

impl fmt::Display for DetectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Referenced(file) => write!(f, "referenced in {file}"),
            Self::PageExists(file) => write!(f, "{file} exists"),
            Self::Recommended => f.write_str("recommended for every site"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub name: SkillName,
    pub reason: DetectReason,
}

/// Skills whose output is missing and which the workspace calls for.
#[must_use]
pub fn detect(ws: &Workspace) -> Vec<Detection> {
    SkillName::ALL
        .iter()
        .filter_map(|&name| {
            let skill = name.skill();
            if ws.resolve(skill.output).exists() {
                return None;
            }
            let reason = if let Some(file) = skill.referenced_in(ws) {
                DetectReason::Referenced(file.to_string())
            } else if name == SkillName::Whatif && ws.resolve("pages/what-if.html").is_file() {
                DetectReason::PageExists("pages/what-if.html".to_string())
            } else if skill.always {
                DetectReason::Recommended
            } else {
                return None;
            };
            Some(Detection { name, reason })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillStatus {
    Created,
    Exists,
    DryRun,
    Failed(String),
}

impl SkillStatus {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Exists => "exists",
            Self::DryRun => "dry_run",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillOutcome {
    pub name: SkillName,
    pub path: &'static str,
    pub lines: usize,
    pub status: SkillStatus,
}

/// Writes each named artifact unless it already exists.
#[must_use]
pub fn generate(ws: &Workspace, names: &[SkillName], dry_run: bool) -> Vec<SkillOutcome> {
    names
        .iter()
        .map(|&name| {
            let skill = name.skill();
            let status = write_skill(ws, skill, dry_run);
            SkillOutcome {
                name,
                path: skill.output,
                lines: skill.template.lines().count(),
                status,
            }
        })
        .collect()
}

fn write_skill(ws: &Workspace, skill: &Skill, dry_run: bool) -> SkillStatus {
    let target = ws.resolve(skill.output);
    if target.exists() {
        return SkillStatus::Exists;
    }
    if dry_run {
        return SkillStatus::DryRun;
    }
    let written = target
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| fs::write(&target, skill.template));
    match written {
        Ok(()) => SkillStatus::Created,
        Err(e) => SkillStatus::Failed(e.to_string()),
    }
}
