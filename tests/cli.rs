use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const SAMPLE: &str = "\
date,primaryCategory,tertiaryCategory,inflowAmount,outflowAmount,currency,account,tags,note
2024-01-05,餐饮,外卖,,35.5,人民币,招商银行,,
2024-01-10,工资收入,工资,8000,,人民币,招商银行,,
2024-01-12,餐饮,午餐,,20,人民币,,,
2024-01-13,餐饮,晚餐,,,人民币,招商银行,,
bad-date,餐饮,晚餐,,10,人民币,招商银行,,
";

/// Temp HOME plus a sample ledger inside it.
fn setup() -> (TempDir, PathBuf) {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("ledger.csv");
    std::fs::write(&file, SAMPLE).unwrap();
    (home, file)
}

fn ledgerscope(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ledgerscope").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn import_prints_summary() {
    let (home, file) = setup();
    ledgerscope(home.path())
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("3 transactions, 1 errors, 1 warnings"))
        .stdout(contains("invalid date"));
}

#[test]
fn import_json_carries_secondary_mapping() {
    let (home, file) = setup();
    ledgerscope(home.path())
        .args(["import", "--json"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("\"secondaryCategory\": \"日常餐饮\""))
        .stdout(contains("\"hasSecondaryMapping\": true"));
}

#[test]
fn import_strict_reports_missing_columns() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("short.csv");
    std::fs::write(
        &file,
        "date,primaryCategory,tertiaryCategory,inflowAmount,outflowAmount,currency,account,tags\n",
    )
    .unwrap();
    ledgerscope(home.path())
        .args(["import", "--strict"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(contains("Missing columns: note"));
}

#[test]
fn import_with_custom_delimiter() {
    let home = tempfile::tempdir().unwrap();
    let file = home.path().join("semi.csv");
    std::fs::write(&file, SAMPLE.replace(',', ";")).unwrap();
    ledgerscope(home.path())
        .args(["import", "--delimiter", ";"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("3 transactions"));
}

#[test]
fn validate_counts_critical_rows() {
    let (home, file) = setup();
    ledgerscope(home.path())
        .args(["validate", "--json"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("\"critical\": 1"))
        .stdout(contains("\"total\": 3"));
}

#[test]
fn clean_drops_critical_by_default() {
    let (home, file) = setup();
    let out = home.path().join("clean.csv");
    ledgerscope(home.path())
        .arg("clean")
        .arg(&file)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Kept 2 of 3"));
    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(!content.contains("午餐"));
}

#[test]
fn clean_to_stdout_with_critical() {
    let (home, file) = setup();
    ledgerscope(home.path())
        .args(["clean", "--include-critical"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("午餐"))
        .stderr(contains("Kept 3 of 3"));
}

#[test]
fn report_months_and_categories() {
    let (home, file) = setup();
    ledgerscope(home.path())
        .args(["report", "months"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("2024年1月"));
    ledgerscope(home.path())
        .args(["report", "categories"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("日常餐饮"));
}

#[test]
fn health_json_has_grade() {
    let (home, file) = setup();
    ledgerscope(home.path())
        .args(["health", "--json"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("\"totalScore\""))
        .stdout(contains("\"grade\""))
        .stdout(contains("\"insufficientData\": true"));
}

#[test]
fn demo_output_feeds_health() {
    let home = tempfile::tempdir().unwrap();
    let out = home.path().join("demo.csv");
    ledgerscope(home.path())
        .arg("demo")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("demo transactions"));
    ledgerscope(home.path())
        .arg("health")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Grade:"));
}

#[test]
fn config_set_fixed_persists() {
    let home = tempfile::tempdir().unwrap();
    ledgerscope(home.path())
        .args(["config", "set-fixed", "房租", "保险"])
        .assert()
        .success();
    assert!(home
        .path()
        .join(".config/ledgerscope/settings.json")
        .exists());
    ledgerscope(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("房租, 保险"));
}

#[test]
fn config_taxonomy_round_trips() {
    let home = tempfile::tempdir().unwrap();
    let out = ledgerscope(home.path())
        .args(["config", "taxonomy"])
        .assert()
        .success()
        .stdout(contains("\"日常餐饮\""))
        .get_output()
        .stdout
        .clone();
    let tax = home.path().join("tax.json");
    std::fs::write(&tax, out).unwrap();
    ledgerscope(home.path())
        .args(["config", "set-taxonomy"])
        .arg(&tax)
        .assert()
        .success();
    ledgerscope(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("tax.json"));
}

#[test]
fn config_rejects_broken_taxonomy() {
    let home = tempfile::tempdir().unwrap();
    let tax = home.path().join("tax.json");
    std::fs::write(&tax, r#"{"expense": {"宠物": {"宠物用品": []}}}"#).unwrap();
    ledgerscope(home.path())
        .args(["config", "set-taxonomy"])
        .arg(&tax)
        .assert()
        .failure()
        .stderr(contains("Taxonomy error"));
    assert!(!home
        .path()
        .join(".config/ledgerscope/settings.json")
        .exists());
}

#[test]
fn missing_file_fails() {
    let home = tempfile::tempdir().unwrap();
    ledgerscope(home.path())
        .args(["import", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(contains("Error:").and(contains("IO error")));
}
