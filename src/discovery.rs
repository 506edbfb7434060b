// src/discovery.rs
use crate::config::Workspace;
use crate::file_class::{self, Category};
use crate::types::FileEntry;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// The scanned file list plus bookkeeping about what could not be read.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: Vec<FileEntry>,
    paths: BTreeSet<String>,
    walk_errors: usize,
}

impl Inventory {
    /// Builds an inventory from entries. Entries are re-sorted by path.
    #[must_use]
    pub fn from_entries(mut entries: Vec<FileEntry>) -> Self {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries.dedup_by(|a, b| a.path == b.path);
        let paths = entries.iter().map(|e| e.path.clone()).collect();
        Self {
            entries,
            paths,
            walk_errors: 0,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, rel: &str) -> bool {
        self.paths.contains(rel)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of directory entries the walk could not read.
    #[must_use]
    pub fn walk_errors(&self) -> usize {
        self.walk_errors
    }

    pub fn iter_category(&self, category: Category) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Totals per category: (file count, lines, bytes).
    #[must_use]
    pub fn category_stats(&self) -> BTreeMap<Category, CategoryStats> {
        let mut stats: BTreeMap<Category, CategoryStats> = BTreeMap::new();
        for entry in &self.entries {
            let s = stats.entry(entry.category).or_default();
            s.files += 1;
            s.lines += entry.line_count.unwrap_or(0);
            s.bytes += entry.size_bytes;
        }
        stats
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub files: usize,
    pub lines: usize,
    pub bytes: u64,
}

/// Scans every regular file under the workspace root.
///
/// Ignored directories are pruned, ignored file names are skipped. Unreadable
/// entries are counted, never fatal.
#[must_use]
pub fn scan(ws: &Workspace) -> Inventory {
    let walker = WalkDir::new(ws.root())
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(ws, e));

    let mut entries = Vec::new();
    let mut walk_errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if let Some(file) = to_file_entry(ws, &entry) {
                    entries.push(file);
                }
            }
            Err(_) => walk_errors += 1,
        }
    }

    let mut inventory = Inventory::from_entries(entries);
    inventory.walk_errors = walk_errors;
    inventory
}

fn is_pruned(ws: &Workspace, entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && ws.is_ignored_dir(&entry.file_name().to_string_lossy())
}

fn to_file_entry(ws: &Workspace, entry: &DirEntry) -> Option<FileEntry> {
    if !entry.file_type().is_file() {
        return None;
    }
    if ws.is_ignored_file(&entry.file_name().to_string_lossy()) {
        return None;
    }

    let rel = entry.path().strip_prefix(ws.root()).ok()?;
    let category = file_class::classify(rel);
    let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
    let line_count = if category.is_text() {
        count_lines(entry.path())
    } else {
        None
    };

    Some(FileEntry {
        path: normalize_path(rel),
        category,
        size_bytes,
        line_count,
    })
}

/// Counts lines with lossy decoding; malformed bytes never abort the scan.
fn count_lines(path: &Path) -> Option<usize> {
    let bytes = fs::read(path).ok()?;
    Some(String::from_utf8_lossy(&bytes).lines().count())
}

/// Normalizes a path to use forward slashes (cross-platform matching).
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Reads a file's text permissively. Unreadable files read as empty.
#[must_use]
pub fn read_text_lossy(path: &Path) -> String {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, body: &[u8]) -> std::io::Result<()> {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, body)
    }

    #[test]
    fn scan_is_sorted_and_skips_ignored() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        write(d.path(), "b.html", b"<p>\n</p>\n")?;
        write(d.path(), "a/z.js", b"x")?;
        write(d.path(), "node_modules/lib.js", b"x")?;
        write(d.path(), ".DS_Store", b"x")?;
        write(d.path(), "img/logo.png", &[0x89, 0x50])?;

        let inv = scan(&Workspace::new(d.path()));
        let paths: Vec<&str> = inv.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a/z.js", "b.html", "img/logo.png"]);
        Ok(())
    }

    #[test]
    fn line_counts_only_for_text() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        write(d.path(), "page.html", b"one\ntwo\nthree\n")?;
        write(d.path(), "pic.png", b"a\nb\n")?;

        let inv = scan(&Workspace::new(d.path()));
        let html = inv.entries().iter().find(|e| e.path == "page.html");
        let png = inv.entries().iter().find(|e| e.path == "pic.png");
        assert_eq!(html.and_then(|e| e.line_count), Some(3));
        assert_eq!(png.and_then(|e| e.line_count), None);
        Ok(())
    }

    #[test]
    fn malformed_utf8_is_counted_not_fatal() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        write(d.path(), "bad.css", &[0xff, 0xfe, b'\n', 0xc3, b'\n'])?;
        let inv = scan(&Workspace::new(d.path()));
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.entries()[0].line_count, Some(2));
        Ok(())
    }

    #[test]
    fn rescan_is_identical() -> std::io::Result<()> {
        let d = tempfile::tempdir()?;
        write(d.path(), "x/1.md", b"a")?;
        write(d.path(), "x/2.md", b"b")?;
        write(d.path(), "0.json", b"{}")?;
        let ws = Workspace::new(d.path());
        assert_eq!(scan(&ws).entries(), scan(&ws).entries());
        Ok(())
    }
}
