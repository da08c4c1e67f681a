//! Integration tests for the EngiPro CLI

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the engipro binary rooted at a temp data dir
fn engipro(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("engipro"));
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd.current_dir(data_dir.path());
    // Keep output scrape-friendly regardless of the host terminal.
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a project and return its id, scraped from `list`
fn add_project(data_dir: &TempDir, name: &str, steps: &[&str]) -> String {
    let mut cmd = engipro(data_dir);
    cmd.arg("add")
        .arg("--name")
        .arg(name)
        .arg("--location")
        .arg("Kampot")
        .arg("--owner")
        .arg("PDWS");
    for step in steps {
        cmd.arg("--step").arg(step);
    }
    cmd.assert().success();

    // The id is the first token of the project's list line.
    let output = engipro(data_dir)
        .arg("list")
        .arg("--search")
        .arg(name)
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find(|l| l.contains(name))
        .and_then(|l| l.split_whitespace().next())
        .expect("created project should appear in list")
        .to_string()
}

#[test]
fn test_help() {
    let temp = TempDir::new().unwrap();
    engipro(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("step-driven status"));
}

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();
    engipro(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_list_empty_collection() {
    let temp = TempDir::new().unwrap();
    engipro(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects yet"));
}

#[test]
fn test_add_and_list_project() {
    let temp = TempDir::new().unwrap();
    add_project(&temp, "Pump station", &["Survey"]);

    engipro(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pump station"))
        .stdout(predicate::str::contains("Not Started"))
        .stdout(predicate::str::contains("0/1 steps"));
}

#[test]
fn test_add_rejects_blank_name() {
    let temp = TempDir::new().unwrap();
    engipro(&temp)
        .arg("add")
        .arg("--name")
        .arg("  ")
        .arg("--location")
        .arg("Kampot")
        .arg("--owner")
        .arg("PDWS")
        .assert()
        .failure()
        .stderr(predicate::str::contains("name"));
}

#[test]
fn test_step_completion_drives_status_to_done() {
    let temp = TempDir::new().unwrap();
    let id = add_project(&temp, "Canal", &["Survey"]);

    engipro(&temp).arg("start").arg(&id).assert().success();

    // Scrape the step id from show output: "○ Survey  (<id>)".
    let output = engipro(&temp).arg("show").arg(&id).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let step_id = stdout
        .lines()
        .find(|l| l.contains("Survey"))
        .and_then(|l| l.rsplit('(').next())
        .map(|s| s.trim_end_matches(')').trim().to_string())
        .expect("step line present");

    engipro(&temp)
        .arg("step")
        .arg("toggle")
        .arg(&id)
        .arg(&step_id)
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1 steps complete"))
        .stdout(predicate::str::contains("Done"));

    // Adding a step resurrects the project.
    engipro(&temp)
        .arg("step")
        .arg("add")
        .arg(&id)
        .arg("Handover")
        .assert()
        .success()
        .stdout(predicate::str::contains("In Progress"));
}

#[test]
fn test_toggle_with_stale_step_id_is_a_noop() {
    let temp = TempDir::new().unwrap();
    let id = add_project(&temp, "Canal", &["Survey"]);

    engipro(&temp)
        .arg("step")
        .arg("toggle")
        .arg(&id)
        .arg("no-such-step")
        .assert()
        .success()
        .stdout(predicate::str::contains("0/1 steps complete"));
}

#[test]
fn test_finish_refuses_step_bearing_project() {
    let temp = TempDir::new().unwrap();
    let id = add_project(&temp, "Canal", &["Survey"]);

    engipro(&temp)
        .arg("finish")
        .arg(&id)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has steps"));
}

#[test]
fn test_finish_zero_step_project() {
    let temp = TempDir::new().unwrap();
    let id = add_project(&temp, "Paperwork", &[]);

    engipro(&temp)
        .arg("finish")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"));
}

#[test]
fn test_remove_requires_confirmation_and_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let id = add_project(&temp, "Canal", &[]);

    engipro(&temp)
        .arg("remove")
        .arg(&id)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    engipro(&temp)
        .arg("remove")
        .arg(&id)
        .arg("--yes")
        .assert()
        .success();

    // Second delete of the same id succeeds without complaint.
    engipro(&temp)
        .arg("remove")
        .arg(&id)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing removed"));
}

#[test]
fn test_export_import_round_trip() {
    let temp = TempDir::new().unwrap();
    add_project(&temp, "Canal", &["Survey"]);
    add_project(&temp, "Tower", &[]);

    let backup = temp.path().join("backup.json");
    engipro(&temp)
        .arg("export")
        .arg("--output")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 project(s)"));

    // Wipe and restore.
    let fresh = TempDir::new().unwrap();
    engipro(&fresh)
        .arg("import")
        .arg(&backup)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 project(s)"));

    engipro(&fresh)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Canal"))
        .stdout(predicate::str::contains("Tower"));
}

#[test]
fn test_export_empty_collection_fails() {
    let temp = TempDir::new().unwrap();
    engipro(&temp)
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no project data"));
}

#[test]
fn test_import_malformed_file_preserves_data() {
    let temp = TempDir::new().unwrap();
    add_project(&temp, "Canal", &[]);

    let bad = temp.path().join("bad.json");
    std::fs::write(&bad, "{\"not\": \"an array\"}").unwrap();

    engipro(&temp)
        .arg("import")
        .arg(&bad)
        .arg("--yes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an array"));

    engipro(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Canal"));
}

#[test]
fn test_theme_round_trip() {
    let temp = TempDir::new().unwrap();

    engipro(&temp)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("system"));

    engipro(&temp)
        .arg("theme")
        .arg("dark")
        .assert()
        .success();

    engipro(&temp)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn test_filter_by_status() {
    let temp = TempDir::new().unwrap();
    let started = add_project(&temp, "Started one", &[]);
    add_project(&temp, "Untouched one", &[]);

    engipro(&temp).arg("start").arg(&started).assert().success();

    let output = engipro(&temp)
        .arg("list")
        .arg("--status")
        .arg("in-progress")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Started one"));
    assert!(!stdout.contains("Untouched one"));
}

#[test]
fn test_stats_counts() {
    let temp = TempDir::new().unwrap();
    let a = add_project(&temp, "A", &[]);
    add_project(&temp, "B", &[]);
    engipro(&temp).arg("start").arg(&a).assert().success();

    engipro(&temp)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total projects: 2"))
        .stdout(predicate::str::contains("In progress:    1"));
}
