use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn silhouette(workdir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("silhouette");
    cmd.current_dir(workdir.path()).env_remove("RUST_LOG");
    cmd
}

fn only_run_dir(runs: &Path) -> PathBuf {
    let entries: Vec<PathBuf> = fs::read_dir(runs)
        .expect("runs dir")
        .map(|entry| entry.expect("entry").path())
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one run in {runs:?}");
    entries.into_iter().next().expect("run dir")
}

fn read_json(path: &Path) -> Value {
    let bytes = fs::read(path).expect("read json");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[test]
fn generate_writes_run_artifacts() {
    let workdir = TempDir::new().expect("temp dir");
    silhouette(&workdir)
        .args(["generate", "--seed", "7", "--run-dir", "runs"])
        .assert()
        .success()
        .stdout(contains("#1 · "))
        .stdout(contains("status: 10/10 valid"));

    let run = only_run_dir(&workdir.path().join("runs"));
    let name = run.file_name().and_then(|name| name.to_str()).expect("name");
    assert!(name.contains("__run_"));

    for file in [
        "config.json",
        "logs.ndjson",
        "generation_report.json",
        "stats.json",
        "stats.svg",
        "report.md",
    ] {
        assert!(run.join(file).is_file(), "missing {file}");
    }
    for index in 1..=10 {
        let svg = run.join(format!("silhouettes/silhouette_{index:02}.svg"));
        let content = fs::read_to_string(&svg).expect("svg");
        assert!(content.starts_with("<svg"));
    }
    assert!(!run.join("lookbook.html").exists());

    let config = read_json(&run.join("config.json"));
    let report = read_json(&run.join("generation_report.json"));
    assert_eq!(config["seed"], 7);
    assert_eq!(config["run_id"], report["run_id"]);
    assert_eq!(report["counters"]["valid"], 10);

    let stats = read_json(&run.join("stats.json"));
    assert_eq!(stats["summary"]["valid"], 10);

    let logs = fs::read_to_string(run.join("logs.ndjson")).expect("logs");
    let first = logs.lines().next().expect("at least one log line");
    let event: Value = serde_json::from_str(first).expect("ndjson line");
    assert!(event.get("timestamp").is_some());
}

#[test]
fn same_seed_draws_the_same_silhouettes() {
    let first = TempDir::new().expect("temp dir");
    let second = TempDir::new().expect("temp dir");
    for workdir in [&first, &second] {
        silhouette(workdir)
            .args(["generate", "--seed", "99", "--collar", "vneck"])
            .assert()
            .success();
    }

    let left = only_run_dir(&first.path().join("runs")).join("silhouettes");
    let right = only_run_dir(&second.path().join("runs")).join("silhouettes");
    for index in 1..=10 {
        let file = format!("silhouette_{index:02}.svg");
        assert_eq!(
            fs::read(left.join(&file)).expect("left svg"),
            fs::read(right.join(&file)).expect("right svg"),
            "{file} differs between runs"
        );
    }
}

#[test]
fn json_summary_lists_titles() {
    let workdir = TempDir::new().expect("temp dir");
    let out = silhouette(&workdir)
        .args(["generate", "--seed", "3", "--json", "--target", "4"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let summary: Value = serde_json::from_slice(&out).expect("json summary");
    assert_eq!(summary["produced"], 4);
    assert_eq!(summary["target"], 4);
    assert_eq!(summary["seed"], 3);
    assert_eq!(summary["base_valid"], true);
    let titles = summary["titles"].as_array().expect("titles");
    assert_eq!(titles.len(), 4);
    assert!(titles[0].as_str().expect("title").starts_with("#1 · "));
}

#[test]
fn unknown_values_are_rejected() {
    let workdir = TempDir::new().expect("temp dir");
    silhouette(&workdir)
        .args(["generate", "--shoulder", "round"])
        .assert()
        .failure()
        .stderr(contains("unknown value 'round' for parameter group 'shoulder'"));
    assert!(!workdir.path().join("runs").exists());
}

#[test]
fn forbidden_base_gets_a_notice() {
    let workdir = TempDir::new().expect("temp dir");
    silhouette(&workdir)
        .args([
            "generate", "--seed", "11", "--shoulder", "fluid", "--waist", "low", "--sleeve",
            "none",
        ])
        .assert()
        .success()
        .stdout(contains("notice: the base selection matches forbidden combination"))
        .stdout(contains("status: 10/10 valid"));

    let run = only_run_dir(&workdir.path().join("runs"));
    let report = fs::read_to_string(run.join("report.md")).expect("report");
    assert!(report.contains("matches a forbidden combination"));
}

#[test]
fn html_export_writes_a_lookbook() {
    let workdir = TempDir::new().expect("temp dir");
    silhouette(&workdir)
        .args(["generate", "--seed", "5", "--export", "html", "--no-chart"])
        .assert()
        .success()
        .stdout(contains("lookbook: "));

    let run = only_run_dir(&workdir.path().join("runs"));
    let html = fs::read_to_string(run.join("lookbook.html")).expect("lookbook");
    assert_eq!(html.matches("<section class=\"page\"").count(), 10);
    assert!(!run.join("stats.svg").exists());
}

#[test]
fn pdf_export_reports_unavailable() {
    let workdir = TempDir::new().expect("temp dir");
    silhouette(&workdir)
        .args(["generate", "--seed", "5", "--export", "pdf"])
        .assert()
        .failure()
        .stderr(contains("export failed"))
        .stderr(contains("no pdf backend"));

    let run = only_run_dir(&workdir.path().join("runs"));
    assert!(run.join("report.md").is_file());
    assert!(!run.join("lookbook.pdf").exists());
}

#[test]
fn export_help_says_pdf_is_not_built_in() {
    let workdir = TempDir::new().expect("temp dir");
    silhouette(&workdir)
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(contains("PDF is not built in"));
}

#[test]
fn settings_file_drives_a_partial_run() {
    let workdir = TempDir::new().expect("temp dir");
    fs::write(
        workdir.path().join("silhouette.toml"),
        r#"
[generation]
target = 30

[[forbidden]]
shoulder = "sharp"

[[forbidden]]
shoulder = "volume"

[[forbidden]]
collar = "asym"

[[forbidden]]
collar = "vneck"
"#,
    )
    .expect("write settings");

    silhouette(&workdir)
        .args(["generate", "--seed", "1", "--shoulder", "fluid", "--collar", "oversize"])
        .assert()
        .success()
        .stdout(contains("status: 27/30 valid"))
        .stdout(contains("produced 27 of 30 silhouettes"));

    let run = only_run_dir(&workdir.path().join("runs"));
    let report = read_json(&run.join("generation_report.json"));
    assert_eq!(report["completion"]["status"], "partial");
    assert_eq!(report["completion"]["produced"], 27);
}

#[test]
fn rules_table_covers_every_value() {
    let workdir = TempDir::new().expect("temp dir");
    silhouette(&workdir)
        .arg("rules")
        .assert()
        .success()
        .stdout(contains("shoulder"))
        .stdout(contains("Asymmetric collar"));

    let out = silhouette(&workdir)
        .args(["rules", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let rows: Value = serde_json::from_slice(&out).expect("rules json");
    assert_eq!(rows.as_array().expect("rows").len(), 15);
}

#[test]
fn config_schema_describes_settings() {
    let workdir = TempDir::new().expect("temp dir");
    let out = silhouette(&workdir)
        .arg("config-schema")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let schema: Value = serde_json::from_slice(&out).expect("schema json");
    assert_eq!(schema["title"], "SilhouetteSettings");
    assert!(schema["properties"]["generation"].is_object());
    assert!(schema["properties"]["output"].is_object());
}
