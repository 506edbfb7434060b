// tests/cli_rearchive.rs
//! Drives the compiled `rearchive` binary against temp workspaces.

mod common;

use common::{portfolio, write, Result};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run(root: &Path, args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_rearchive"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
}

#[test]
fn rollback_without_snapshot_exits_3() -> Result<()> {
    let d = tempfile::tempdir()?;
    write(d.path(), "index.html", "<p>x</p>")?;

    let out = run(d.path(), &["restructure", "--rollback"])?;
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("No snapshot"));
    assert_eq!(fs::read_to_string(d.path().join("index.html"))?, "<p>x</p>");
    Ok(())
}

#[test]
fn fail_on_high_exits_2_and_writes_reports() -> Result<()> {
    let d = tempfile::tempdir()?;
    write(d.path(), "a.html", r#"<script src="b.js"></script>"#)?;

    let out = run(d.path(), &["audit", "--only", "links", "--fail-on-high", "--json"])?;
    assert_eq!(out.status.code(), Some(2));

    let md = fs::read_to_string(d.path().join("reports/check.md"))?;
    assert!(md.contains("b.js"));
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(d.path().join("reports/check.json"))?)?;
    assert_eq!(json["findings"][0]["severity"], "HIGH");
    assert_eq!(json["findings"][0]["source_file"], "a.html");
    Ok(())
}

#[test]
fn audit_without_flag_exits_0() -> Result<()> {
    let d = tempfile::tempdir()?;
    write(d.path(), "a.html", r#"<script src="b.js"></script>"#)?;
    let out = run(d.path(), &["audit"])?;
    assert_eq!(out.status.code(), Some(0));
    Ok(())
}

#[test]
fn restructure_then_rollback() -> Result<()> {
    let d = tempfile::tempdir()?;
    portfolio(d.path())?;
    let original = fs::read_to_string(d.path().join("index.html"))?;

    let out = run(d.path(), &["restructure"])?;
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(d.path().join(".rearchive/backup/snapshot.json").is_file());
    assert!(d.path().join("reports/structure.md").is_file());
    assert_ne!(fs::read_to_string(d.path().join("index.html"))?, original);

    let out = run(d.path(), &["restructure", "--rollback"])?;
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(fs::read_to_string(d.path().join("index.html"))?, original);

    let events = fs::read_to_string(d.path().join(".rearchive/events.jsonl"))?;
    assert!(events.contains("snapshot_captured"));
    assert!(events.contains("snapshot_restored"));
    Ok(())
}

#[test]
fn dry_run_writes_no_snapshot_or_report() -> Result<()> {
    let d = tempfile::tempdir()?;
    portfolio(d.path())?;

    let out = run(d.path(), &["restructure", "--dry-run"])?;
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("dry_run"));
    assert!(!d.path().join(".rearchive/backup").exists());
    assert!(!d.path().join("reports").exists());
    assert!(!d.path().join("js").exists());
    Ok(())
}

#[test]
fn plan_file_overrides_default() -> Result<()> {
    let d = tempfile::tempdir()?;
    write(d.path(), "app.js", "x")?;
    let plan = d.path().join("plan.toml");
    fs::write(
        &plan,
        "[restructure]\ncreate_dirs = [\"scripts\"]\n\n[[restructure.moves]]\nsrc = \"app.js\"\ndst = \"scripts/app.js\"\n",
    )?;

    let plan_arg = plan.to_string_lossy().to_string();
    let out = run(d.path(), &["restructure", "--no-backup", "--plan", &plan_arg])?;
    assert_eq!(out.status.code(), Some(0));
    assert!(d.path().join("scripts/app.js").is_file());
    assert!(!d.path().join("css").exists());
    assert!(!d.path().join(".rearchive/backup").exists());
    Ok(())
}

#[test]
fn skills_generate_recommended_and_never_overwrite() -> Result<()> {
    let d = tempfile::tempdir()?;
    write(d.path(), "js/nav.js", "// custom")?;

    let out = run(d.path(), &["skills"])?;
    assert_eq!(out.status.code(), Some(0));
    assert!(d.path().join("js/lightbox.js").is_file());
    assert!(d.path().join("css/utils.css").is_file());
    assert_eq!(fs::read_to_string(d.path().join("js/nav.js"))?, "// custom");
    assert!(d.path().join("reports/skills.md").is_file());

    let out = run(d.path(), &["skills", "--skill", "nav"])?;
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("exists"));
    Ok(())
}

#[test]
fn bad_root_is_generic_error() -> Result<()> {
    let d = tempfile::tempdir()?;
    let out = run(&d.path().join("missing"), &["audit"])?;
    assert_eq!(out.status.code(), Some(1));
    Ok(())
}
