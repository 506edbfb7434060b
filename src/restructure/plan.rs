// src/restructure/plan.rs
use super::{Operation, RestructurePlan, TransferMode};
use crate::error::{RearchiveError, Result};
use crate::types::FileEntry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Declarative restructure description, read from `[restructure]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSpec {
    #[serde(default)]
    pub create_dirs: Vec<String>,
    #[serde(default)]
    pub moves: Vec<MoveSpec>,
    #[serde(default)]
    pub syncs: Vec<SyncSpec>,
    #[serde(default)]
    pub rewrites: Vec<RewriteSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSpec {
    pub src: String,
    pub dst: String,
    #[serde(default)]
    pub description: String,
}

/// Copies every inventoried file under `src_dir` to the same relative place
/// under `dst_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSpec {
    pub src_dir: String,
    pub dst_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteSpec {
    pub file: String,
    pub pairs: Vec<(String, String)>,
}

impl Default for PlanSpec {
    fn default() -> Self {
        Self {
            create_dirs: [
                "js",
                "css",
                "assets",
                "assets/images",
                "assets/media",
                "docs",
                "reports",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            moves: vec![MoveSpec {
                src: "main.js".into(),
                dst: "js/main.js".into(),
                description: "move the main script under js/".into(),
            }],
            syncs: vec![SyncSpec {
                src_dir: "images".into(),
                dst_dir: "assets/images".into(),
            }],
            rewrites: vec![RewriteSpec {
                file: "index.html".into(),
                pairs: vec![
                    ("main.js".into(), "js/main.js".into()),
                    ("images/".into(), "assets/images/".into()),
                ],
            }],
        }
    }
}

#[derive(Deserialize)]
struct PlanFile {
    #[serde(default)]
    restructure: PlanSpec,
}

impl PlanSpec {
    /// Reads a standalone plan file holding a `[restructure]` table.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid TOML.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| RearchiveError::io(e, path))?;
        let parsed: PlanFile = toml::from_str(&content)?;
        Ok(parsed.restructure)
    }
}

/// Expands `spec` against the current file list.
///
/// Order: directories, moves, sync copies (by path, `.gitkeep` skipped),
/// rewrites.
#[must_use]
pub fn build_plan(entries: &[FileEntry], spec: &PlanSpec) -> RestructurePlan {
    let mut operations: Vec<Operation> = spec
        .create_dirs
        .iter()
        .map(|path| Operation::CreateDirectory { path: path.clone() })
        .collect();

    operations.extend(spec.moves.iter().map(|m| Operation::MoveOrCopy {
        src: m.src.clone(),
        dst: m.dst.clone(),
        mode: TransferMode::Move,
    }));

    for sync in &spec.syncs {
        operations.extend(sync_copies(entries, sync));
    }

    operations.extend(spec.rewrites.iter().map(|r| Operation::RewriteReferences {
        file: r.file.clone(),
        pairs: r.pairs.clone(),
    }));

    RestructurePlan { operations }
}

fn sync_copies(entries: &[FileEntry], sync: &SyncSpec) -> Vec<Operation> {
    let src_dir = sync.src_dir.trim_end_matches('/');
    let dst_dir = sync.dst_dir.trim_end_matches('/');
    let prefix = format!("{src_dir}/");

    let mut rels: Vec<&str> = entries
        .iter()
        .filter_map(|e| e.path.strip_prefix(prefix.as_str()))
        .filter(|rel| !rel.rsplit('/').next().is_some_and(|name| name == ".gitkeep"))
        .collect();
    rels.sort_unstable();

    rels.into_iter()
        .map(|rel| Operation::MoveOrCopy {
            src: format!("{src_dir}/{rel}"),
            dst: format!("{dst_dir}/{rel}"),
            mode: TransferMode::Copy,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_class::{self, Category};

    fn entry(path: &str) -> FileEntry {
        FileEntry {
            path: path.to_string(),
            category: file_class::classify(Path::new(path)),
            size_bytes: 0,
            line_count: None,
        }
    }

    #[test]
    fn default_plan_orders_sections() {
        let entries = vec![
            entry("images/b.png"),
            entry("images/.gitkeep"),
            entry("images/a.png"),
            entry("index.html"),
        ];
        let plan = build_plan(&entries, &PlanSpec::default());

        let dirs = plan
            .operations
            .iter()
            .take_while(|op| matches!(op, Operation::CreateDirectory { .. }))
            .count();
        assert_eq!(dirs, 7);
        assert_eq!(
            plan.operations[7],
            Operation::MoveOrCopy {
                src: "main.js".into(),
                dst: "js/main.js".into(),
                mode: TransferMode::Move
            }
        );
        assert_eq!(
            plan.operations[8],
            Operation::MoveOrCopy {
                src: "images/a.png".into(),
                dst: "assets/images/a.png".into(),
                mode: TransferMode::Copy
            }
        );
        assert!(matches!(
            &plan.operations[9],
            Operation::MoveOrCopy { src, .. } if src == "images/b.png"
        ));
        assert!(matches!(
            plan.operations.last(),
            Some(Operation::RewriteReferences { file, .. }) if file == "index.html"
        ));
        assert_eq!(plan.len(), 11);
    }

    #[test]
    fn sync_does_not_match_sibling_prefix() {
        let entries = vec![entry("images2/x.png"), entry("images/sub/y.gif")];
        let spec = PlanSpec {
            create_dirs: vec![],
            moves: vec![],
            syncs: vec![SyncSpec {
                src_dir: "images/".into(),
                dst_dir: "assets/images".into(),
            }],
            rewrites: vec![],
        };
        let plan = build_plan(&entries, &spec);
        assert_eq!(
            plan.operations,
            vec![Operation::MoveOrCopy {
                src: "images/sub/y.gif".into(),
                dst: "assets/images/sub/y.gif".into(),
                mode: TransferMode::Copy
            }]
        );
        assert_eq!(entries[1].category, Category::Image);
    }

    #[test]
    fn plan_file_parses() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let d = tempfile::tempdir()?;
        let path = d.path().join("plan.toml");
        fs::write(
            &path,
            r#"
[restructure]
create_dirs = ["scripts"]

[[restructure.moves]]
src = "app.js"
dst = "scripts/app.js"

[[restructure.rewrites]]
file = "index.html"
pairs = [["app.js", "scripts/app.js"]]
"#,
        )?;
        let spec = PlanSpec::load_file(&path)?;
        assert_eq!(spec.create_dirs, vec!["scripts"]);
        assert_eq!(spec.moves[0].description, "");
        assert!(spec.syncs.is_empty());
        assert_eq!(
            spec.rewrites[0].pairs,
            vec![("app.js".to_string(), "scripts/app.js".to_string())]
        );
        Ok(())
    }

    #[test]
    fn planning_is_deterministic() {
        let entries = vec![entry("images/a.png")];
        let spec = PlanSpec::default();
        assert_eq!(build_plan(&entries, &spec), build_plan(&entries, &spec));
    }
}
