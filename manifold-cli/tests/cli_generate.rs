use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const REGISTRY: &str = "\
agents:
  code-reviewer:
    description: Reviews code for quality
    team: Engineering
  ceo-cto:
    description: Strategic decisions
    team: Executive
  ghost:
    description: Has no source directory
";

fn manifold(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("manifold"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("MANIFOLD_REGISTRY")
        .env_remove("MANIFOLD_SOURCE_ROOT")
        .env_remove("MANIFOLD_OUTPUT_DIR")
        .env_remove("MANIFOLD_REPO_ROOT");
    cmd
}

/// `<home>/dev/zi/agents/` with a registry and two buildable agents.
fn default_tree(home: &Path) -> std::path::PathBuf {
    let agents = home.join("dev/zi/agents");
    for slug in ["code-reviewer", "ceo-cto"] {
        fs::create_dir_all(agents.join(slug)).unwrap();
        fs::write(agents.join(slug).join("Dockerfile"), "FROM python:3.12-slim\n").unwrap();
    }
    fs::write(agents.join("registry.yaml"), REGISTRY).unwrap();
    agents
}

#[test]
fn generate_uses_default_registry_and_reports_skips() {
    let home = TempDir::new().unwrap();
    default_tree(home.path());
    let out = TempDir::new().unwrap();

    manifold(home.path())
        .args(["generate", "--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(contains("code-reviewer [complex]"))
        .stdout(contains("ceo-cto [executive]"))
        .stdout(contains("ghost skipped: no directory in source tree"))
        .stdout(contains("Generated 2 agents"))
        .stdout(contains("Skipped 1."));

    assert!(out.path().join("deployments/code-reviewer.yaml").is_file());
    assert!(out.path().join("services/ceo-cto.yaml").is_file());
    assert!(!out.path().join("deployments/ghost.yaml").exists());
}

#[test]
fn missing_registry_is_fatal() {
    let home = TempDir::new().unwrap();
    manifold(home.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(contains("failed to load registry"));
}

#[test]
fn dry_run_json_report_writes_nothing() {
    let home = TempDir::new().unwrap();
    default_tree(home.path());
    let out = TempDir::new().unwrap();

    let output = manifold(home.path())
        .args(["generate", "--dry-run", "--json", "--output-dir"])
        .arg(out.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["generated"].as_array().unwrap().len(), 2);
    assert_eq!(report["skipped"][0]["slug"], "ghost");
    assert!(fs::read_dir(out.path()).unwrap().next().is_none());
}

#[test]
fn second_generate_is_unchanged_and_diff_is_clean() {
    let home = TempDir::new().unwrap();
    default_tree(home.path());
    let out = TempDir::new().unwrap();

    for _ in 0..2 {
        manifold(home.path())
            .args(["generate", "--output-dir"])
            .arg(out.path())
            .assert()
            .success();
    }
    manifold(home.path())
        .args(["generate", "--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(contains("0 files written, 4 unchanged"));

    manifold(home.path())
        .args(["diff", "--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(contains("No differences."));
}

#[test]
fn diff_shows_local_edit() {
    let home = TempDir::new().unwrap();
    default_tree(home.path());
    let out = TempDir::new().unwrap();
    manifold(home.path())
        .args(["generate", "--output-dir"])
        .arg(out.path())
        .assert()
        .success();

    let target = out.path().join("services/ceo-cto.yaml");
    let edited = fs::read_to_string(&target).unwrap().replace("8000", "9000");
    fs::write(&target, edited).unwrap();

    manifold(home.path())
        .args(["diff", "--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(contains("--- a/services/ceo-cto.yaml"))
        .stdout(contains("+++ b/services/ceo-cto.yaml"));
}

#[test]
fn builtin_registry_with_explicit_source_root() {
    let home = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    fs::create_dir_all(src.path().join("verifier")).unwrap();
    fs::write(src.path().join("verifier/Dockerfile"), "FROM scratch\n").unwrap();
    let out = TempDir::new().unwrap();

    manifold(home.path())
        .args(["generate", "--builtin", "--source-root"])
        .arg(src.path())
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(contains("Generated 1 agents"))
        .stdout(contains("Skipped 23."));

    assert!(out.path().join("deployments/verifier.yaml").is_file());
}

#[test]
fn env_vars_supply_paths() {
    let home = TempDir::new().unwrap();
    let agents = default_tree(home.path());
    let out = TempDir::new().unwrap();

    manifold(home.path())
        .env("MANIFOLD_REGISTRY", agents.join("registry.yaml"))
        .env("MANIFOLD_OUTPUT_DIR", out.path())
        .arg("generate")
        .assert()
        .success();
    assert!(out.path().join("deployments/ceo-cto.yaml").is_file());
}

#[test]
fn agents_table_and_json() {
    let home = TempDir::new().unwrap();
    manifold(home.path())
        .args(["agents", "--builtin"])
        .assert()
        .success()
        .stdout(contains("solutions-architect"))
        .stdout(contains("250m / 1"));

    let output = manifold(home.path())
        .args(["agents", "--builtin", "--json"])
        .output()
        .unwrap();
    let agents: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = agents.as_array().unwrap();
    assert_eq!(list.len(), 24);
    let debugger = list.iter().find(|a| a["slug"] == "debugger").unwrap();
    assert_eq!(debugger["tier"], "complex");
    assert_eq!(debugger["resources"]["limits_memory"], "2Gi");
}

#[test]
fn verbose_logging_goes_to_stderr() {
    let home = TempDir::new().unwrap();
    default_tree(home.path());
    let out = TempDir::new().unwrap();

    manifold(home.path())
        .args(["-v", "generate", "--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stderr(contains("skipping ghost"))
        .stdout(contains("skipping ghost").not());
}

#[test]
fn agents_logs_rejected_entries_as_warnings() {
    let home = TempDir::new().unwrap();
    let agents = home.path().join("dev/zi/agents");
    fs::create_dir_all(&agents).unwrap();
    fs::write(
        agents.join("registry.yaml"),
        "agents:\n  verifier:\n    description: checks\n  Bad Key:\n    description: nope\n",
    )
    .unwrap();

    manifold(home.path())
        .arg("agents")
        .assert()
        .success()
        .stdout(contains("verifier"))
        .stderr(contains("WARN"))
        .stderr(contains("registry entry 'Bad Key' rejected"));
}
