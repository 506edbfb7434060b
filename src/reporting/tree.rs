// src/reporting/tree.rs
use crate::config::Workspace;
use std::cmp::Ordering;
use std::fmt::Write;
use walkdir::{DirEntry, WalkDir};

/// Draws the workspace as an indented tree, directories before files, each
/// group in lexical order. Ignored directories and files are left out.
#[must_use]
pub fn render_tree(ws: &Workspace, max_depth: usize) -> String {
    let mut out = String::from("./\n");
    let walker = WalkDir::new(ws.root())
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by(dirs_first)
        .into_iter()
        .filter_entry(|e| !is_hidden_from_tree(ws, e));

    for entry in walker.filter_map(Result::ok) {
        let indent = "    ".repeat(entry.depth() - 1);
        let name = entry.file_name().to_string_lossy();
        let suffix = if entry.file_type().is_dir() { "/" } else { "" };
        let _ = writeln!(out, "{indent}{name}{suffix}");
    }
    out
}

fn dirs_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    b_dir
        .cmp(&a_dir)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_hidden_from_tree(ws: &Workspace, entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() {
        ws.is_ignored_dir(&name)
    } else {
        ws.is_ignored_file(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directories_come_first() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        fs::write(d.path().join("a.html"), "")?;
        fs::create_dir_all(d.path().join("z/inner"))?;
        fs::write(d.path().join("z/inner/x.js"), "")?;
        fs::create_dir_all(d.path().join("node_modules"))?;

        let tree = render_tree(&Workspace::new(d.path()), 4);
        assert_eq!(tree, "./\nz/\n    inner/\n        x.js\na.html\n");
        Ok(())
    }
}
