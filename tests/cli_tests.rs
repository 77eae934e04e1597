//! Command-line behaviour of the catalog-dedup binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("catalog-dedup").unwrap()
}

#[test]
fn test_check_reports_exact_code_match() {
    cmd()
        .args(["check", "Wheet Flour", "--code", "ing-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wheat Flour"))
        .stdout(predicate::str::contains("exact code"));
}

#[test]
fn test_check_no_duplicates() {
    cmd()
        .args(["check", "Sugar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates found"));
}

#[test]
fn test_check_json_output() {
    let output = cmd()
        .args(["check", "baguete", "--kind", "product", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["has_duplicates"], true);
    assert_eq!(json["duplicates"][0]["name"], "Baguette");
    assert_eq!(json["duplicates"][0]["exact_match"], false);
}

#[test]
fn test_check_against_csv_entries() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "id,name,code").unwrap();
    writeln!(file, "10,Oat Milk,ING-900").unwrap();
    writeln!(file, "11,Almond Milk,").unwrap();
    writeln!(file, "12,\"Oat Milk, barista\",ING-901").unwrap();

    cmd()
        .args(["check", "Oat Milks", "--code", "ING-901", "--format", "tsv", "--entries"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("12\tOat Milk, barista\tING-901"))
        .stdout(predicate::str::contains("10\tOat Milk\tING-900"));
}

#[test]
fn test_check_rejects_bad_threshold() {
    cmd()
        .args(["check", "Flour", "--threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));
}

#[test]
fn test_compare() {
    cmd()
        .args(["compare", "kitten", "sitting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Edit distance: 3"))
        .stdout(predicate::str::contains("57.14%"));
}

#[test]
fn test_catalog_show_and_missing() {
    cmd()
        .args(["catalog", "show", "ingredient", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("White Sugar"));

    cmd()
        .args(["catalog", "show", "recipe", "404"])
        .assert()
        .failure();
}

#[test]
fn test_catalog_export_and_audit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{
            "version": "1.0.0",
            "ingredients": [
                { "id": 1, "name": "Wheat Flour", "code": "ING-001" },
                { "id": 2, "name": "Wheat flour", "code": "ING-077" },
                { "id": 3, "name": "Butter", "code": "ing-001" }
            ]
        }"#,
    )
    .unwrap();

    cmd()
        .args(["catalog", "audit", "--kind", "ingredient", "--format", "tsv", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ingredient\t1\tWheat Flour\t3\tButter"))
        .stdout(predicate::str::contains("ingredient\t1\tWheat Flour\t2\tWheat flour"));

    let exported = dir.path().join("exported.json");
    cmd()
        .args(["catalog", "export"])
        .arg(&exported)
        .arg("--catalog")
        .arg(&path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&exported).unwrap();
    assert!(content.contains("\"created_at\""));
    assert!(content.contains("Butter"));
}
