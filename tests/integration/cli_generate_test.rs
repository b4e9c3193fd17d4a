use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CI: &str = "name: CI\non: [push, pull_request]\njobs:\n  test:\n    runs-on: ubuntu-latest\n    steps:\n      - uses: actions/checkout@v4\n      - run: \"cargo build\\ncargo test\"\n";

fn ghaflow() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ghaflow"));
    cmd.env_remove("GHAFLOW_SRC_DIR")
        .env_remove("GHAFLOW_OUT_DIR")
        .env_remove("GHAFLOW_FORMAT")
        .env("GHAFLOW_LOG", "warn");
    cmd
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join(".github/workflows-src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("ci.yml"), CI).unwrap();
    dir
}

fn generated(root: &Path) -> String {
    fs::read_to_string(root.join(".github/workflows/ci.generated.yml")).unwrap()
}

#[test]
fn test_generate_writes_workflow_files() {
    let dir = project();
    ghaflow()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success();

    let text = generated(dir.path());
    assert!(text.starts_with("# Do not modify!"));
    assert!(text.contains("run: |-"));
}

#[test]
fn test_check_passes_when_up_to_date() {
    let dir = project();
    ghaflow().arg("generate").arg("--root").arg(dir.path()).assert().success();
    ghaflow()
        .args(["generate", "--check", "--root"])
        .arg(dir.path())
        .assert()
        .success();
}

#[test]
fn test_check_fails_on_stale_files() {
    let dir = project();
    ghaflow().arg("generate").arg("--root").arg(dir.path()).assert().success();
    let path = dir.path().join(".github/workflows/ci.generated.yml");
    fs::write(&path, "name: edited by hand\n").unwrap();

    ghaflow()
        .args(["generate", "--check", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of date"))
        .stderr(predicate::str::contains("ci.generated.yml"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "name: edited by hand\n");
}

#[test]
fn test_check_fails_on_missing_files() {
    let dir = project();
    ghaflow()
        .args(["generate", "--check", "--root"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 generated workflow(s) out of date"));
}

#[test]
fn test_cli_flags_override_directories() {
    let dir = project();
    fs::rename(dir.path().join(".github/workflows-src"), dir.path().join("defs")).unwrap();
    ghaflow()
        .args(["generate", "--src", "defs", "--out", "rendered", "--format", "json", "--root"])
        .arg(dir.path())
        .assert()
        .success();
    let text = fs::read_to_string(dir.path().join("rendered/ci.generated.yml")).unwrap();
    assert!(text.contains("\"runs-on\": \"ubuntu-latest\""));
}

#[test]
fn test_invalid_definition_fails_generation() {
    let dir = project();
    fs::write(
        dir.path().join(".github/workflows-src/bad.yml"),
        "name: Bad\non: push\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - name: nothing\n",
    )
    .unwrap();
    ghaflow()
        .arg("generate")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid step (job=build index=0)"));
}

#[test]
fn test_render_prints_to_stdout() {
    let dir = project();
    ghaflow()
        .arg("render")
        .arg(dir.path().join(".github/workflows-src/ci.yml"))
        .arg("--no-header")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name: CI\non:\n- push\n- pull_request\n"));
    assert!(!dir.path().join(".github/workflows").exists());
}

#[test]
fn test_help_lists_commands() {
    ghaflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("render"));
}
