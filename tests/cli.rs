use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bkv(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bkv").unwrap();
    cmd.env("BKV_DATA_DIR", dir.path()).current_dir(dir.path());
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    bkv(dir).args(args).assert().success();
}

#[test]
fn test_init_creates_workspaces() {
    let dir = TempDir::new().unwrap();

    bkv(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(dir.path().join("config.json").exists());
    bkv(&dir)
        .args(["party", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Partei 3"));
}

#[test]
fn test_two_party_settlement() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["party", "remove", "Partei 3"]);
    run(&dir, &["party", "edit", "Partei 1", "-s", "50"]);
    run(&dir, &["party", "edit", "Partei 2", "-s", "50", "-p", "700"]);
    run(&dir, &["meter", "set", "Partei 1", "1", "100"]);
    run(&dir, &["meter", "set", "Partei 2", "1", "300"]);

    bkv(&dir)
        .args(["total", "1.000,00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€ 1.000,00"));

    bkv(&dir)
        .arg("calc")
        .assert()
        .success()
        .stdout(predicate::str::contains("€ 325,00"))
        .stdout(predicate::str::contains("€ 675,00"))
        .stdout(predicate::str::contains("€ 300,00"))
        .stdout(predicate::str::contains("€ 700,00"));

    bkv(&dir)
        .args(["report", "--party", "Partei 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Partei 1"))
        .stdout(predicate::str::contains("€ 175,00"));
}

#[test]
fn test_zero_floor_area_warning() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["total", "100"]);

    bkv(&dir)
        .arg("calc")
        .assert()
        .success()
        .stdout(predicate::str::contains("m²"));
}

#[test]
fn test_invalid_total_rejected() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);

    bkv(&dir).args(["total", "viel"]).assert().failure();
}

#[test]
fn test_documents() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);

    bkv(&dir)
        .args(["doc", "delete", "1"])
        .assert()
        .failure();

    bkv(&dir)
        .args(["doc", "new", "Haus Nord"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created document: Haus Nord"));

    bkv(&dir)
        .args(["doc", "duplicate", "Haus Nord"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Haus Nord (Kopie)"));

    bkv(&dir)
        .args(["doc", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Haus Nord (Kopie)"))
        .stdout(predicate::str::contains("Haus Nord"));

    bkv(&dir)
        .args(["doc", "delete", "Haus Nord (Kopie)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted document: Haus Nord (Kopie)"));
}

#[test]
fn test_export_and_import_as_new() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["doc", "rename", "1", "Export Test"]);
    run(&dir, &["party", "add", "Müller", "-s", "72,5"]);

    let file = dir.path().join("export.json");
    bkv(&dir)
        .args(["export", "json"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 'Export Test'"));

    let contents = std::fs::read_to_string(&file).unwrap();
    assert!(contents.contains("\"documentName\": \"Export Test\""));
    assert!(contents.contains("Müller"));

    bkv(&dir)
        .arg("import")
        .arg(&file)
        .arg("--new")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported as new document: Export Test"))
        .stdout(predicate::str::contains("Parteien: 4"));
}

#[test]
fn test_import_without_parties_fails() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);

    let file = dir.path().join("empty.json");
    std::fs::write(&file, r#"{"state": {"totalAmount": 10, "parties": []}}"#).unwrap();

    bkv(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Keine Parteien in der Datei gefunden."));
}

#[test]
fn test_euer_summary_and_csv() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["euer", "add", "income", "1000", "-d", "2023-05-01"]);
    run(
        &dir,
        &["euer", "add", "expense", "350,555", "-d", "2023-06-01", "-m", "Heizöl"],
    );

    bkv(&dir)
        .args(["euer", "years"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2023"));

    bkv(&dir)
        .args(["euer", "summary", "--year", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€ 1.000,00"))
        .stdout(predicate::str::contains("€ 350,56"))
        .stdout(predicate::str::contains("€ 649,44"));

    bkv(&dir)
        .args(["euer", "csv", "--year", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains("euer-2023.csv"));

    let csv = std::fs::read_to_string(dir.path().join("euer-2023.csv")).unwrap();
    assert!(csv.starts_with("\"Datum\";\"Typ\";\"Kategorie\";\"Beschreibung\";\"Betrag\""));
    assert!(csv.contains("\"Heizöl\""));
}

#[test]
fn test_euer_rejects_bad_date() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);

    bkv(&dir)
        .args(["euer", "add", "income", "10", "-d", "2023-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_audit_log() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    run(&dir, &["party", "add", "Huber"]);

    bkv(&dir)
        .args(["log", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE"))
        .stdout(predicate::str::contains("Huber"));
}

#[test]
fn test_corrupt_workspace_file_is_repaired() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    std::fs::write(
        dir.path()
            .join("data")
            .join("betriebkostenverrechner_workspace_v1.json"),
        "{ truncated",
    )
    .unwrap();

    bkv(&dir)
        .args(["party", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Partei 1"));

    bkv(&dir).arg("reset").assert().success();
}
