//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GERMAN_SNAPSHOT: &str = "\
Prüfungsnr,Bezeichnung der Leistung,Semester,Versuch,Note,Status,ECTS,Vermerk,Art
1234567,Intro to Systems,WiSe22/23,1,\"2,3\",bestanden,5,,
7654321,Ethics,SoSe23,1,,wip,3,pending,AWPF
";

/// A `gradecalc` command isolated from the user's config and environment.
fn gradecalc(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("gradecalc").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("GRADECALC_ECTS_REQUIRED")
        .env_remove("GRADECALC_ECTS_WITHOUT_GRADE")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace_with_snapshot() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("grades.csv"), GERMAN_SNAPSHOT).unwrap();
    dir
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    gradecalc(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("transcript"))
        .stdout(predicate::str::contains("--csv"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    gradecalc(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gradecalc"));
}

#[test]
fn csv_report_in_german() {
    let dir = workspace_with_snapshot();
    gradecalc(dir.path())
        .arg("--csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gesamtdurchschnitt: 2.3"))
        .stdout(predicate::str::contains("Mit Note (1 Noten)"))
        .stdout(predicate::str::contains("171"))
        .stdout(predicate::str::contains(
            "Noch benötigte ECTS in Modulen ohne Note: 34 - 3 = 31",
        ))
        .stdout(predicate::str::contains("WiSe22/23:"));
}

#[test]
fn csv_report_rewrites_snapshot_in_composite_order() {
    let dir = workspace_with_snapshot();
    gradecalc(dir.path()).arg("--csv").assert().success();

    let written = std::fs::read_to_string(dir.path().join("grades.csv")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    // General electives first, grades normalized to a dot.
    assert!(lines[1].starts_with("7654321,Ethics,SoSe23"));
    assert!(lines[2].contains(",2.3,bestanden,5,"));
}

#[test]
fn no_save_leaves_snapshot_untouched() {
    let dir = workspace_with_snapshot();
    gradecalc(dir.path())
        .args(["--csv", "--no-save"])
        .assert()
        .success();

    let written = std::fs::read_to_string(dir.path().join("grades.csv")).unwrap();
    assert_eq!(written, GERMAN_SNAPSHOT);
}

#[test]
fn credit_targets_from_flags() {
    let dir = workspace_with_snapshot();
    gradecalc(dir.path())
        .args(["--csv", "--ects-required", "180", "--ects-without-grade", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("165"))
        .stdout(predicate::str::contains(": 10 - 3 = 7"));
}

#[test]
fn credit_targets_from_environment() {
    let dir = workspace_with_snapshot();
    gradecalc(dir.path())
        .arg("--csv")
        .env("GRADECALC_ECTS_WITHOUT_GRADE", "20")
        .assert()
        .success()
        .stdout(predicate::str::contains(": 20 - 3 = 17"));
}

#[test]
fn json_format() {
    let dir = workspace_with_snapshot();
    let output = gradecalc(dir.path())
        .args(["--csv", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["locale"], "de");
    assert_eq!(value["report"]["overall_average"], 2.3);
    assert_eq!(value["report"]["credits"]["with_grade"], 5);
    assert_eq!(value["excluded"][0]["exam_code"], "7654321");
}

#[test]
fn snapshot_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("noten.csv"), GERMAN_SNAPSHOT).unwrap();
    std::fs::write(
        dir.path().join("gradecalc.toml"),
        "snapshot_file = \"noten.csv\"\nects_required = 200\n",
    )
    .unwrap();

    gradecalc(dir.path())
        .arg("--csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("161"));
}

#[test]
fn snapshot_from_other_locale_fails() {
    let dir = workspace_with_snapshot();
    gradecalc(dir.path())
        .args(["--csv", "--lang", "en"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("'Code'"));
}

#[test]
fn missing_snapshot_fails() {
    let dir = TempDir::new().unwrap();
    gradecalc(dir.path())
        .arg("--csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("grades.csv"));
}

#[test]
fn missing_document_fails() {
    let dir = TempDir::new().unwrap();
    gradecalc(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("abschluss*.pdf"));
}

#[test]
fn missing_document_suggests_snapshot() {
    let dir = workspace_with_snapshot();
    gradecalc(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("rerun with --csv"));
}

#[test]
fn unreadable_document_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("abschluss.pdf"), "not a pdf").unwrap();
    gradecalc(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not extract text"));
}

#[test]
fn csv_and_pdf_conflict() {
    let dir = TempDir::new().unwrap();
    gradecalc(dir.path())
        .args(["--csv", "--pdf"])
        .assert()
        .failure();
}

#[test]
fn csv_and_document_conflict() {
    let dir = workspace_with_snapshot();
    gradecalc(dir.path())
        .args(["--csv", "--document", "abschluss.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--document"));

    let written = std::fs::read_to_string(dir.path().join("grades.csv")).unwrap();
    assert_eq!(written, GERMAN_SNAPSHOT);
}

#[test]
fn unknown_locale_is_rejected() {
    let dir = TempDir::new().unwrap();
    gradecalc(dir.path())
        .args(["--lang", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown locale"));
}

#[test]
fn validate_snapshot() {
    let dir = workspace_with_snapshot();
    gradecalc(dir.path())
        .args(["validate", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "grades.csv: 2 records (1 graded, 1 without grade)",
        ))
        .stdout(predicate::str::contains("All records valid."));

    let written = std::fs::read_to_string(dir.path().join("grades.csv")).unwrap();
    assert_eq!(written, GERMAN_SNAPSHOT);
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("grades.csv"),
        "Prüfungsnr,Bezeichnung der Leistung,Semester,Versuch,Note,Status,ECTS,Vermerk,Art\n\
         1234567,Analysis,Herbst22,1,2.5,angerechnet,,,\n",
    )
    .unwrap();

    gradecalc(dir.path())
        .args(["validate", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1234567 Herbst22] WARNING"))
        .stdout(predicate::str::contains("unrecognized term"))
        .stdout(predicate::str::contains("credit is missing"))
        .stdout(predicate::str::contains("not on the grade scale"))
        .stdout(predicate::str::contains("4 warning(s) found."));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    gradecalc(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created gradecalc.toml"));

    let config = std::fs::read_to_string(dir.path().join("gradecalc.toml")).unwrap();
    assert!(config.contains("ects_required = 210"));

    gradecalc(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}
