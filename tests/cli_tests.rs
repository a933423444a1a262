mod common;

use assert_fs::TempDir;
use common::command::{run_bitsim, scenario_dir, write_scenario};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

#[test]
fn commands_run_in_order() -> Result<(), Box<dyn std::error::Error>> {
    run_bitsim(&["-c", "init", "-c", "commit -m first", "-c", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Initialized empty repository on branch 'master'",
        ))
        .stdout(predicate::str::is_match(r"\[master \(root-commit\) [0-9a-f]{7}\] first")?)
        .stdout(predicate::str::contains("On branch master"))
        .stdout(predicate::str::contains("stash:    0"));

    Ok(())
}

#[test]
fn failure_is_reported_and_sets_exit_code() {
    run_bitsim(&["-c", "commit -m orphan"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: not a repository"));
}

#[test]
fn unknown_commands_are_errors() {
    run_bitsim(&["-c", "init", "-c", "frobnicate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error:"));
}

#[rstest]
fn scenario_files_are_replayed_with_echo(scenario_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let script = write_scenario(
        &scenario_dir,
        "merge.bit",
        &[
            "# diverge and merge",
            "init",
            "commit -m a",
            "branch f",
            "commit -m c",
            "checkout f",
            "commit -m \"b on f\"",
            "checkout master",
            "merge f",
            "log --oneline",
        ],
    );

    run_bitsim(&["--script", script.to_str().unwrap_or_default()])
        .assert()
        .success()
        .stdout(predicate::str::contains("$ merge f"))
        .stdout(predicate::str::contains("Merge made:"))
        .stdout(predicate::str::contains("b on f"))
        .stdout(predicate::str::contains("Merge branch 'f' into master"))
        .stdout(predicate::str::contains("diverge and merge").not());

    Ok(())
}

#[rstest]
fn scenario_continues_after_failures(scenario_dir: TempDir) {
    let script = write_scenario(
        &scenario_dir,
        "errors.bit",
        &["init", "merge nowhere", "commit -m still-runs"],
    );

    run_bitsim(&["--script", script.to_str().unwrap_or_default()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: branch 'nowhere' not found"))
        .stdout(predicate::str::contains("still-runs"));
}

#[test]
fn commands_can_come_from_stdin() {
    run_bitsim(&[])
        .write_stdin("init\ncommit -m piped\nlog --oneline\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("$ commit -m piped"))
        .stdout(predicate::str::is_match(r"[0-9a-f]{7} \(HEAD -> master\) piped").unwrap());
}

#[test]
fn snapshot_dump_is_json() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bitsim(&[
        "-c",
        "init",
        "-c",
        "commit -m a",
        "-c",
        "tag v1",
        "--dump-snapshot",
    ])
    .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let json_start = stdout.find('{').ok_or("no JSON in output")?;
    let snapshot: Value = serde_json::from_str(&stdout[json_start..])?;

    assert_eq!(snapshot["initialized"], Value::Bool(true));
    assert_eq!(snapshot["commits"].as_object().map(|c| c.len()), Some(1));
    assert_eq!(snapshot["head"]["mode"], "attached");
    assert_eq!(snapshot["head"]["target"], "master");
    assert!(snapshot["tags"].get("v1").is_some());

    Ok(())
}

#[test]
fn default_branch_can_be_overridden() {
    run_bitsim(&["--default-branch", "main", "-c", "init", "-c", "branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on branch 'main'"))
        .stdout(predicate::str::contains("* main"));
}

#[test]
fn invalid_default_branch_is_rejected() {
    run_bitsim(&["--default-branch", "bad name", "-c", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --default-branch"));
}

#[test]
fn log_limit_caps_history() {
    run_bitsim(&[
        "--log-limit",
        "1",
        "-c",
        "init",
        "-c",
        "commit -m one",
        "-c",
        "commit -m two",
        "-c",
        "log --oneline",
    ])
    .assert()
    .success()
    .stdout(predicate::str::is_match(r"(?m)^[0-9a-f]{7} \(HEAD -> master\) two$").unwrap())
    .stdout(predicate::str::is_match(r"(?m)^[0-9a-f]{7} one$").unwrap().not());
}

#[test]
fn output_has_no_escape_codes_without_color() {
    run_bitsim(&["-c", "init", "-c", "commit -m plain", "-c", "merge x"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\x1b[").not());
}
