//! Error path integration tests

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn spool_cmd() -> Command {
    let mut cmd = Command::cargo_bin("spool").unwrap();
    cmd.env_remove("SPOOL_WORKSPACE");
    cmd
}

#[test]
fn test_bundle_missing_root_file() {
    let workspace = common::TestWorkspace::new();

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["bundle", "src/missing.script"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_invalid_config_rejected() {
    let workspace = common::TestWorkspace::with_config(
        "script:\n  extension: same\nmarkup:\n  extension: same\n",
    );
    workspace.write_file("src/main.same", "x\n");

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["bundle", "src/main.same"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("share the extension"));
}

#[test]
fn test_unparseable_config_rejected() {
    let workspace = common::TestWorkspace::with_config("include_paths: [unclosed\n");
    workspace.write_file("src/main.script", "x\n");

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["bundle", "src/main.script"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

#[test]
fn test_invalid_root_pattern_rejected() {
    let workspace = common::TestWorkspace::with_config(
        "script:\n  extension: script\n  roots:\n    - \"src/[\"\n",
    );
    workspace.write_file("src/main.script", "x\n");

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["bundle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid root pattern"));
}

#[test]
fn test_missing_explicit_workspace() {
    let workspace = common::TestWorkspace::new();

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["-w", "does/not/exist", "bundle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workspace not found"));
}

#[test]
fn test_bundle_no_roots_matched_is_ok() {
    let workspace = common::TestWorkspace::new();

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["bundle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No root modules matched"));
}

#[test]
fn test_unbundle_requires_files() {
    let workspace = common::TestWorkspace::new();

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["unbundle"])
        .assert()
        .failure();
}

#[test]
fn test_deep_include_chain_bundles() {
    let workspace = common::TestWorkspace::new();
    // a0 -> a1 -> ... -> a40, deep but acyclic
    for i in 0..40 {
        workspace.write_file(
            &format!("src/a{}.script", i),
            &format!("#include a{}\nlevel_{} = true\n", i + 1, i),
        );
    }
    workspace.write_file("src/a40.script", "bottom = true\n");

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["bundle", "src/a0.script", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bottom = true"))
        .stdout(predicate::str::contains("level_39 = true"));
}
