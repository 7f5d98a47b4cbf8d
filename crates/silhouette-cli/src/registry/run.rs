use std::fs::{OpenOptions, create_dir_all};
use std::path::PathBuf;
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use silhouette_core::{Candidate, ConstraintSet, RULES_VERSION};
use silhouette_generate::GenerateOptions;

use super::{RegistryResult, write_json_atomic};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    pub base: Candidate,
    pub options: GenerateOptions,
    pub constraints: ConstraintSet,
    pub export: Option<String>,
    pub chart: bool,
    pub run_dir: PathBuf,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig<'a> {
    pub run_id: &'a str,
    pub started_at: String,
    pub rules_version: &'static str,
    pub seed: u64,
    pub base: &'a Candidate,
    pub options: &'a GenerateOptions,
    pub forbidden: &'a ConstraintSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<&'a str>,
    pub chart: bool,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub logs_path: PathBuf,
    pub silhouettes_dir: PathBuf,
    pub report_json_path: PathBuf,
    pub stats_path: PathBuf,
    pub chart_path: PathBuf,
    pub report_md_path: PathBuf,
}

impl RunPaths {
    /// `silhouettes/silhouette_NN.svg`, numbered from 1.
    pub fn silhouette_path(&self, index: usize) -> PathBuf {
        self.silhouettes_dir
            .join(format!("silhouette_{:02}.svg", index + 1))
    }

    pub fn lookbook_path(&self, extension: &str) -> PathBuf {
        self.root.join(format!("lookbook.{extension}"))
    }
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));
    let silhouettes_dir = root.join("silhouettes");
    create_dir_all(&silhouettes_dir)?;

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        rules_version: RULES_VERSION,
        seed: ctx.seed,
        base: &ctx.base,
        options: &ctx.options,
        forbidden: &ctx.constraints,
        export: ctx.export.as_deref(),
        chart: ctx.chart,
        git: collect_git_info(),
    };
    write_json_atomic(&root.join("config.json"), &config)?;

    let logs_path = root.join("logs.ndjson");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        logs_path,
        silhouettes_dir,
        report_json_path: root.join("generation_report.json"),
        stats_path: root.join("stats.json"),
        chart_path: root.join("stats.svg"),
        report_md_path: root.join("report.md"),
        root,
    })
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    fn context(run_dir: PathBuf) -> RunContext {
        RunContext {
            run_id: "abc".to_string(),
            started_at: Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).single().expect("time"),
            seed: 42,
            base: Candidate::default(),
            options: GenerateOptions::default(),
            constraints: ConstraintSet::default(),
            export: Some("html".to_string()),
            chart: true,
            run_dir,
        }
    }

    #[test]
    fn run_directory_layout() {
        let dir = TempDir::new().expect("temp dir");
        let paths = start_run(&context(dir.path().to_path_buf())).expect("start run");

        assert_eq!(
            paths.root,
            dir.path().join("2026-03-04T05-06-07Z__run_abc")
        );
        assert!(paths.silhouettes_dir.is_dir());
        assert!(paths.logs_path.is_file());
        assert_eq!(
            paths.silhouette_path(0),
            paths.silhouettes_dir.join("silhouette_01.svg")
        );
        assert_eq!(paths.lookbook_path("html"), paths.root.join("lookbook.html"));

        let config: serde_json::Value = serde_json::from_slice(
            &std::fs::read(paths.root.join("config.json")).expect("config"),
        )
        .expect("json");
        assert_eq!(config["seed"], 42);
        assert_eq!(config["rules_version"], RULES_VERSION);
        assert_eq!(config["base"]["sleeve"], "none");
        assert_eq!(config["export"], "html");
        assert!(config["forbidden"].is_array());
    }
}
