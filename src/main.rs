//! CLI entry point for the traffic survey tool.
//!
//! Provides subcommands for analysing a single survey file and for the
//! interactive date-driven loop over a directory of daily surveys.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use traffic_survey::{
    analyzers::{engine::evaluate, registry::MetricRegistry},
    config::MetricConfig,
    dataset::Dataset,
    histogram::HourJunctionMatrix,
    output::{append_report, save_json, write_json, write_outcomes},
    prompt::Prompter,
};

#[derive(Parser)]
#[command(name = "traffic_survey")]
#[command(about = "Daily traffic survey metrics", long_about = None)]
struct Cli {
    /// JSON file overriding junction names, column names and peak policy
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the survey metrics of one CSV file
    Analyze {
        /// Survey CSV file
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Text report to append results to
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Write the hour x junction counts as JSON to this path
        #[arg(short, long)]
        matrix: Option<PathBuf>,

        /// Print outcomes as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Prompt for survey dates and report each one until told to stop
    Survey {
        /// Directory holding traffic_dataDDMMYYYY.csv files
        #[arg(short = 'd', long, default_value = ".")]
        data_dir: PathBuf,

        /// Text report to append results to
        #[arg(short, long, default_value = "results.txt")]
        report: PathBuf,

        /// Directory to write per-date hour x junction JSON into
        #[arg(short, long)]
        matrix_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/traffic_survey.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("traffic_survey.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MetricConfig::load(path)
            .with_context(|| format!("loading metric config {}", path.display()))?,
        None => MetricConfig::default(),
    };
    let registry = MetricRegistry::standard(&config);

    match cli.command {
        Commands::Analyze {
            source,
            report,
            matrix,
            json,
        } => {
            let dataset = Dataset::from_path(&source)
                .with_context(|| format!("loading survey {}", source.display()))?;
            let outcomes = evaluate(&dataset, &registry)?;

            if json {
                write_json(io::stdout().lock(), &outcomes)?;
            } else {
                write_outcomes(io::stdout().lock(), &outcomes)?;
            }
            if let Some(report) = report {
                append_report(&report, &outcomes)?;
            }
            if let Some(matrix) = matrix {
                let counts = HourJunctionMatrix::build(&dataset, &config.junctions())?;
                save_json(&matrix, &counts)?;
            }
        }
        Commands::Survey {
            data_dir,
            report,
            matrix_dir,
        } => {
            run_survey_loop(&data_dir, &report, matrix_dir.as_deref(), &config, &registry)?;
        }
    }

    Ok(())
}

/// Repeatedly asks for a survey date, reports it, and asks whether to
/// continue. Stops on "N"; closing standard input ends with an error.
#[tracing::instrument(skip_all, fields(data_dir = %data_dir.display()))]
fn run_survey_loop(
    data_dir: &Path,
    report: &Path,
    matrix_dir: Option<&Path>,
    config: &MetricConfig,
    registry: &MetricRegistry,
) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    loop {
        let (date, path) = prompter.ask_survey(data_dir)?;
        info!(date = %date, path = %path.display(), "Processing survey");

        match Dataset::from_path(&path).and_then(|dataset| {
            let outcomes = evaluate(&dataset, registry)?;
            Ok((dataset, outcomes))
        }) {
            Ok((dataset, outcomes)) => {
                write_outcomes(io::stdout().lock(), &outcomes)?;
                append_report(report, &outcomes)?;

                if let Some(dir) = matrix_dir {
                    std::fs::create_dir_all(dir)?;
                    let counts = HourJunctionMatrix::build(&dataset, &config.junctions())?;
                    let target = dir.join(format!("hourly_{}.json", date.format("%Y-%m-%d")));
                    save_json(&target, &counts)?;
                }
            }
            Err(e) => {
                warn!(date = %date, error = %e, "Survey could not be processed");
                eprintln!("Could not process {}: {e}", path.display());
            }
        }

        if !prompter.ask_yes_no("Do you want to load another dataset? (Y/N): ")? {
            break;
        }
    }

    info!(report = %report.display(), "Survey session finished");
    Ok(())
}
