//! Command-line tests for the rpl-screen binary

use assert_cmd::Command;
use predicates::prelude::*;

const CUSTOMERS_CSV: &str = "\
Customer,Country,RPL Name
Acme Corp,US,ACME CORPORATION
Zenith Trading Co,DE,Zenith Trade
Kestrel Avionics,FR,
Blue River Foods,CA,
";

fn rpl_screen() -> Command {
    let mut cmd = Command::cargo_bin("rpl-screen").expect("binary should build");
    cmd.env_remove("RPL_SCREEN_CLEANER_API_KEY");
    cmd
}

fn customers_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("customers.csv");
    std::fs::write(&path, CUSTOMERS_CSV).expect("Failed to write customers");
    path
}

#[test]
fn test_screen_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = customers_file(&dir);

    rpl_screen()
        .arg("screen")
        .arg(&input)
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Corp -> ACME CORPORATION"))
        .stdout(predicate::str::contains("CRITICAL"))
        .stdout(predicate::str::contains("Zenith Trading Co -> Zenith Trade"))
        .stdout(predicate::str::contains("Kestrel Avionics").not());
}

#[test]
fn test_screen_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = customers_file(&dir);

    let output = rpl_screen()
        .args(["screen", "--format", "json", "--no-progress", "--sort"])
        .arg(&input)
        .args(["--threshold", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["customer_column"], "Customer");
    assert_eq!(json["reference_column"], "RPL Name");
    assert_eq!(json["summary"]["total"], 4);
    assert_eq!(json["summary"]["critical"], 1);

    let matches = json["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 4);
    assert_eq!(matches[0]["customer_name"], "Acme Corp");
    assert_eq!(matches[0]["risk_level"], "CRITICAL");
    assert_eq!(matches[3]["matched_rpl_name"], "");
}

#[test]
fn test_screen_tsv_limit() {
    let dir = tempfile::tempdir().unwrap();
    let input = customers_file(&dir);

    rpl_screen()
        .args(["screen", "-f", "tsv", "--no-progress", "--sort", "-n", "1"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::eq(
            "customer_name\tmatched_rpl_name\tsimilarity\trisk_level\nAcme Corp\tACME CORPORATION\t1.0000\tCRITICAL\n",
        ));
}

#[test]
fn test_screen_writes_full_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = customers_file(&dir);
    let report = dir.path().join("report.csv");

    rpl_screen()
        .arg("screen")
        .arg(&input)
        .arg("--no-progress")
        .arg("--output")
        .arg(&report)
        .assert()
        .success();

    let content = std::fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with("MATCHED_RPL_NAME,MATCH_SIMILARITY,RISK_LEVEL"));
    assert!(lines[4].starts_with("Blue River Foods,CA,"));
}

#[test]
fn test_screen_separate_reference_file() {
    let dir = tempfile::tempdir().unwrap();
    let customers = dir.path().join("clients.csv");
    std::fs::write(&customers, "Client\nNorthwind Traders\n").unwrap();
    let denied = dir.path().join("denied.csv");
    std::fs::write(&denied, "Denied Party\nNorthwind Trade\n").unwrap();

    rpl_screen()
        .arg("screen")
        .arg(&customers)
        .arg("--reference-file")
        .arg(&denied)
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.6667"))
        .stdout(predicate::str::contains("HIGH"));
}

#[test]
fn test_screen_unknown_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = customers_file(&dir);

    rpl_screen()
        .arg("screen")
        .arg(&input)
        .args(["--customer-column", "Nope", "--no-progress"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'Nope' not found"));
}

#[test]
fn test_screen_undetectable_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.csv");
    std::fs::write(&input, "A,B\nx,y\n").unwrap();

    rpl_screen()
        .arg("screen")
        .arg(&input)
        .arg("--no-progress")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--customer-column"));
}

#[test]
fn test_screen_rejects_bad_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let input = customers_file(&dir);

    rpl_screen()
        .arg("screen")
        .arg(&input)
        .args(["--threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 1"));
}

#[test]
fn test_screen_survives_unreachable_cleaner() {
    let dir = tempfile::tempdir().unwrap();
    let input = customers_file(&dir);

    rpl_screen()
        .arg("screen")
        .arg(&input)
        .args([
            "--no-progress",
            "--clean-endpoint",
            "http://127.0.0.1:9/clean",
            "--clean-timeout-secs",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Corp -> ACME CORPORATION"));
}

#[test]
fn test_screen_cleaning_adds_column_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = customers_file(&dir);
    let report = dir.path().join("report.csv");

    rpl_screen()
        .arg("screen")
        .arg(&input)
        .args([
            "--no-progress",
            "--clean-endpoint",
            "http://127.0.0.1:9/clean",
            "--clean-timeout-secs",
            "2",
        ])
        .arg("--output")
        .arg(&report)
        .assert()
        .success();

    let content = std::fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "Customer,Country,RPL Name,CLEANED_CUSTOMER_NAME,MATCHED_RPL_NAME,MATCH_SIMILARITY,RISK_LEVEL"
    );
    // The cleaner is unreachable, so the cleaned column falls back to the names as read
    assert!(lines[1].starts_with("Acme Corp,US,ACME CORPORATION,Acme Corp,ACME CORPORATION,"));
}

#[test]
fn test_compare_tsv() {
    rpl_screen()
        .args(["compare", "Zenith Trading Co", "Zenith Trade", "--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zenith trading\tzenith\t0.5556\tLOW\tzenith"));
}

#[test]
fn test_compare_text() {
    rpl_screen()
        .args(["compare", "Acme Corp", "ACME CORPORATION"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Similarity: 1.0000"))
        .stdout(predicate::str::contains("Risk level: CRITICAL"));
}

#[test]
fn test_columns_preview() {
    let dir = tempfile::tempdir().unwrap();
    let input = customers_file(&dir);

    rpl_screen()
        .arg("columns")
        .arg(&input)
        .args(["-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected customer column: Customer"))
        .stdout(predicate::str::contains("Detected reference column: RPL Name"))
        .stdout(predicate::str::contains("Acme Corp | US | ACME CORPORATION"))
        .stdout(predicate::str::contains("Kestrel").not());
}
