use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("tvchart").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tvchart"));
}

#[test]
fn render_writes_chart_layout_and_rows() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("chart.html");
    let layout = dir.path().join("layout.json");
    let rows = dir.path().join("rows.csv");

    let mut cmd = Command::cargo_bin("tvchart").unwrap();
    cmd.arg("render")
        .arg("--input")
        .arg(fixture("tv_series.csv"))
        .arg("--output")
        .arg(&out)
        .arg("--layout")
        .arg(&layout)
        .arg("--save")
        .arg(&rows)
        .arg("--stats");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Crime  count=5  min=8.6 max=9.5 mean=9.08 median=9.1",
        ))
        .stderr(predicate::str::contains("Wrote chart with 12 bars"));

    let html = fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("<rect class=\"bar\"").count(), 12);

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&layout).unwrap()).unwrap();
    assert_eq!(v["bars"].as_array().unwrap().len(), 12);
    assert_eq!(v["legend"].as_array().unwrap().len(), 6);

    let saved = fs::read_to_string(&rows).unwrap();
    assert_eq!(saved.lines().count(), 13);
    assert!(!saved.contains("Glee"));
}

#[test]
fn render_svg_with_custom_threshold() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("chart.svg");
    let mut cmd = Command::cargo_bin("tvchart").unwrap();
    cmd.arg("render")
        .arg("-i")
        .arg(fixture("tv_series.csv"))
        .arg("-o")
        .arg(&out)
        .args(["--min-rating", "9.3"]);
    cmd.assert().success();
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<rect class=\"bar\"").count(), 4);
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("tvchart").unwrap();
    cmd.arg("render")
        .args(["--input", "no/such/file.csv"])
        .arg("--output")
        .arg(dir.path().join("chart.html"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no/such/file.csv"));
    assert!(!dir.path().join("chart.html").exists());
}

#[test]
fn strict_mode_rejects_bad_ratings() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("tvchart").unwrap();
    cmd.arg("render")
        .arg("--input")
        .arg(fixture("malformed.csv"))
        .arg("--output")
        .arg(dir.path().join("chart.html"))
        .arg("--strict");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not a number"));
}

#[test]
fn lenient_mode_reports_skipped_rows() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("tvchart").unwrap();
    cmd.arg("render")
        .arg("--input")
        .arg(fixture("malformed.csv"))
        .arg("--output")
        .arg(dir.path().join("chart.html"));
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Skipped 1 rows"));
}
