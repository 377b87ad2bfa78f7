// File: crates/pathchart/tests/cli.rs
// Purpose: CLI end to end: output files, console preview, failure exit codes.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

fn pathchart() -> Command {
    Command::cargo_bin("pathchart").expect("binary built")
}

const PATHS: &str = "time,path_1,path_2\n0,100,100\n0.5,102,98\n1,101,99\n";

#[test]
fn writes_png_and_prints_preview() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "Data.csv", PATHS);
    let out = dir.path().join("chart.png");

    pathchart()
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 paths)"))
        .stdout(predicate::str::contains("time  path_1  path_2"));
    assert!(out.exists());
}

#[test]
fn html_mode_with_time_step_preset() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "steps.csv", "time_step,A\n0,1\n1,2\n2,3\n");
    let out = dir.path().join("steps.html");

    pathchart()
        .arg(&input)
        .args(["--preset", "time-step", "--mode", "html", "--preview-rows", "0"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("\"xLabel\":\"Time Step\""));
}

#[test]
fn config_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "semi.csv", "step;A;B\n0;1;2\n1;2;3\n");
    let out = dir.path().join("from_config.html");
    let config = write_csv(
        dir.path(),
        "pathchart.toml",
        &format!(
            "x-column = \"step\"\nx-limit = \"none\"\ndelimiter = \";\"\noutput = {:?}\n",
            out.display().to_string()
        ),
    );

    pathchart().arg(&input).arg("--config").arg(&config).assert().success();
    assert!(out.exists());
}

#[test]
fn missing_input_fails_in_load_stage() {
    let dir = tempfile::tempdir().unwrap();
    pathchart()
        .arg(dir.path().join("missing.csv"))
        .args(["--mode", "file"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("load: input file not found"));
}

#[test]
fn unknown_axis_fails_in_render_stage() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "Data.csv", PATHS);
    let out = dir.path().join("never.png");

    pathchart()
        .arg(&input)
        .args(["--x-column", "nonexistent"])
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("render: unknown x column 'nonexistent'"));
    assert!(!out.exists());
}

#[test]
fn malformed_row_is_reported_with_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), "bad.csv", "time,A,B\n0,1,2\n1,2\n");

    pathchart()
        .arg(&input)
        .args(["--mode", "html", "--output"])
        .arg(dir.path().join("bad.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}
