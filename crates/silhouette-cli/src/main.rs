mod registry;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use silhouette_core::{
    Candidate, Error as CoreError, ParameterGroup, RULES_VERSION, label_of, metrics_of,
};
use silhouette_eval::{
    ChartingDisabled, DoughnutChart, RunStats, StatsDisplay, display_stats, render_report,
    status_line,
};
use silhouette_generate::{GenerationEngine, GenerationError};
use silhouette_render::{ExportError, exporter_for, render_batch};
use thiserror::Error;
use uuid::Uuid;

use registry::{
    RunContext, init_run_logging, start_run, write_bytes_atomic, write_json_atomic,
};
use settings::{ExportChoice, SettingsError, SilhouetteSettings, load_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "silhouette", version, about = "Silhouette sketch generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a batch of silhouettes around a base selection.
    Generate(GenerateArgs),
    /// Print the parameter rule table.
    Rules(RulesArgs),
    /// Print the JSON schema of silhouette.toml.
    ConfigSchema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Shoulder value (sharp, volume, fluid).
    #[arg(long)]
    shoulder: Option<String>,
    /// Collar value (asym, vneck, oversize).
    #[arg(long)]
    collar: Option<String>,
    /// Waist value (high, marked, low).
    #[arg(long)]
    waist: Option<String>,
    /// Length value (mini, midi, maxi).
    #[arg(long)]
    length: Option<String>,
    /// Sleeve value (none, short, long).
    #[arg(long)]
    sleeve: Option<String>,
    /// Seed for sampling and drawing; defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,
    /// Override the number of silhouettes to produce.
    #[arg(long)]
    target: Option<usize>,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Settings file; defaults to ./silhouette.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Lookbook format to export after generation. PDF is not built in:
    /// `pdf` always fails, so export html and print it to PDF.
    #[arg(long, value_enum)]
    export: Option<ExportChoice>,
    /// Skip the stats chart.
    #[arg(long, default_value_t = false)]
    no_chart: bool,
    /// Print a JSON summary instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct RulesArgs {
    /// Print the table as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct GenerateSummary {
    run_id: String,
    run_path: PathBuf,
    seed: u64,
    base_valid: bool,
    produced: usize,
    target: usize,
    status: String,
    titles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lookbook: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RuleRow {
    group: ParameterGroup,
    value: &'static str,
    label: String,
    metrics: silhouette_core::RuleEntry,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Rules(args) => run_rules(args),
        Command::ConfigSchema => run_config_schema(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        shoulder,
        collar,
        waist,
        length,
        sleeve,
        seed,
        target,
        run_dir,
        config,
        export,
        no_chart,
        json,
    } = args;

    let settings = load_settings(config.as_deref())?;
    let base = Candidate::from_selection([
        (ParameterGroup::Shoulder, shoulder.as_deref()),
        (ParameterGroup::Collar, collar.as_deref()),
        (ParameterGroup::Waist, waist.as_deref()),
        (ParameterGroup::Length, length.as_deref()),
        (ParameterGroup::Sleeve, sleeve.as_deref()),
    ])?;

    let mut options = settings.generation.clone();
    if let Some(target) = target {
        options.target = target;
    }
    let constraints = settings.constraints();
    let engine = GenerationEngine::with_constraints(options, constraints)?;

    let started_at = chrono::Utc::now();
    let seed =
        seed.unwrap_or_else(|| u64::try_from(started_at.timestamp_millis()).unwrap_or_default());
    let export = export.unwrap_or(settings.output.export).format();
    let chart = settings.output.chart && !no_chart;

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at,
        seed,
        base,
        options: engine.options().clone(),
        constraints: engine.constraints().clone(),
        export: export.map(|format| format.to_string()),
        chart,
        run_dir,
    };
    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        seed,
        base = %base.key(),
        rules_version = RULES_VERSION
    );

    if let Some(combo) = engine.constraints().first_violation(&base) {
        if !json {
            println!(
                "notice: the base selection matches forbidden combination ({}); it is left out of the batch",
                combo.describe()
            );
        }
    }

    let result = engine.run_with_id(run_id.clone(), &base, seed);
    let rendered = render_batch(&result.candidates, Some(seed));

    for silhouette in &rendered {
        let path = run_paths.silhouette_path(silhouette.index);
        write_bytes_atomic(&path, silhouette.to_svg().as_bytes())?;
    }
    tracing::info!(
        event = "silhouettes_written",
        count = rendered.len(),
        path = %run_paths.silhouettes_dir.display()
    );

    write_json_atomic(&run_paths.report_json_path, &result.report)?;

    let stats = RunStats::from_report(&result.report);
    write_json_atomic(&run_paths.stats_path, &stats)?;

    let display: &dyn StatsDisplay = if chart {
        &DoughnutChart
    } else {
        &ChartingDisabled
    };
    let chart_path = match display_stats(Some(display), &stats) {
        Some(output) => {
            write_bytes_atomic(&run_paths.chart_path, output.svg.as_bytes())?;
            tracing::info!(event = "chart_written", path = %run_paths.chart_path.display());
            Some(run_paths.chart_path.clone())
        }
        None => None,
    };

    let markdown = render_report(&result.report, &result.candidates, &stats);
    write_bytes_atomic(&run_paths.report_md_path, markdown.as_bytes())?;
    tracing::info!(event = "report_written", path = %run_paths.report_md_path.display());

    let lookbook = match export {
        Some(format) => {
            let exporter = exporter_for(format)?;
            let bytes = exporter.export(&rendered)?;
            let path = run_paths.lookbook_path(format.extension());
            write_bytes_atomic(&path, &bytes)?;
            tracing::info!(event = "lookbook_written", format = %format, path = %path.display());
            Some(path)
        }
        None => None,
    };

    tracing::info!(
        event = "run_finished",
        run_id = %run_id,
        valid = result.report.counters.valid,
        attempts = result.report.counters.attempts
    );

    let summary = GenerateSummary {
        run_id,
        run_path: run_paths.root.clone(),
        seed,
        base_valid: result.report.base_valid,
        produced: result.candidates.len(),
        target: result.report.target,
        status: status_line(&result.report),
        titles: rendered.iter().map(|silhouette| silhouette.title.clone()).collect(),
        chart: chart_path,
        lookbook,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for title in &summary.titles {
        println!("{title}");
    }
    println!("status: {}", summary.status);
    if let Some(missing) = result.shortfall() {
        println!(
            "produced {} of {} silhouettes ({missing} short); the constrained space is exhausted",
            summary.produced, summary.target
        );
    }
    if let Some(path) = &summary.lookbook {
        println!("lookbook: {}", path.display());
    }
    println!("run: {}", summary.run_path.display());
    Ok(())
}

fn run_rules(args: RulesArgs) -> Result<(), CliError> {
    let mut rows = Vec::new();
    for group in ParameterGroup::ALL {
        for value in group.values() {
            rows.push(RuleRow {
                group,
                value,
                label: label_of(group, value).to_string(),
                metrics: metrics_of(group, value)?,
            });
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("rules version {RULES_VERSION}");
    println!("{:<9} {:<11} {:<20} metrics", "group", "value", "label");
    for row in &rows {
        println!(
            "{:<9} {:<11} {:<20} {}",
            row.group.as_str(),
            row.value,
            row.label,
            serde_json::to_string(&row.metrics)?
        );
    }
    Ok(())
}

fn run_config_schema() -> Result<(), CliError> {
    let schema = schemars::schema_for!(SilhouetteSettings);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
