//! Graph command integration tests

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
fn test_graph_prints_flattening_order() {
    let workspace = common::TestWorkspace::new();
    workspace.script_project();

    let assert = spool_cmd()
        .current_dir(&workspace.path)
        .args(["graph", "src/main.script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flattening order for src/main.script"));

    // Dependencies order before dependents: math first, main last
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let math_pos = stdout.find("src/lib/math.script").unwrap();
    let util_pos = stdout.find("src/util.script").unwrap();
    let main_pos = stdout.rfind("src/main.script").unwrap();
    assert!(math_pos < util_pos);
    assert!(util_pos < main_pos);
}

#[test]
fn test_graph_json_output() {
    let workspace = common::TestWorkspace::new();
    workspace.script_project();

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["graph", "src/main.script", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"root\": \"src/main.script\""))
        .stdout(predicate::str::contains("\"modules\": ["))
        .stdout(predicate::str::contains("\"src/lib/math.script\""));
}

#[test]
fn test_graph_single_module() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file("src/solo.script", "alone()\n");

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["graph", "src/solo.script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1  src/solo.script"));
}

#[test]
fn test_graph_reports_cycle() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file("src/a.script", "#include b\n");
    workspace.write_file("src/b.script", "#include a\n");

    spool_cmd()
        .current_dir(&workspace.path)
        .args(["graph", "src/a.script"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cyclic include chain"));
}

#[test]
fn test_graph_deterministic_across_runs() {
    let workspace = common::TestWorkspace::new();
    workspace.script_project();

    let first = spool_cmd()
        .current_dir(&workspace.path)
        .args(["graph", "src/main.script"])
        .assert()
        .success();
    let second = spool_cmd()
        .current_dir(&workspace.path)
        .args(["graph", "src/main.script"])
        .assert()
        .success();

    assert_eq!(first.get_output().stdout, second.get_output().stdout);
}
