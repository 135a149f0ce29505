//! lakebench: TPC-H benchmark harness on DataFusion.
//!
//! # Commands
//!
//! - `run`: load the requested tables, run each query, print a report.
//! - `list`: show the 22 queries and the tables each one reads.
//!
//! The exit code is 0 when every query succeeded and 8 when the batch ran
//! with at least one failed query; see [`exit_codes`] for the rest.

use anyhow::Context;
use clap::{Parser, Subcommand};
use datafusion::prelude::SessionContext;
use lakebench_common::config::load_section;
use lakebench_common::{telemetry, BenchConfig, StorageOptions};
use lakebench_datasets::{DatasetCache, ParquetLoader};
use lakebench_error::{BenchError, ErrorCategory, ErrorCode};
use lakebench_queries::QueryParams;
use lakebench_runtime::{BenchmarkDriver, CsvTimingSink, TracingSink};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod exit_codes;
mod output;
mod settings;

use output::OutputFormat;
use settings::RunArgs;

#[derive(Parser)]
#[command(name = "lakebench")]
#[command(about = "TPC-H benchmark harness for DataFusion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Layered configuration file (YAML, TOML or JSON)
    #[arg(long, global = true, env = "LAKEBENCH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run TPC-H queries against the tables under the data root
    Run(RunArgs),
    /// List the queries and the tables each one reads
    List,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init_tracing(cli.verbose) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    match run_cli(&cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let exit_code = map_error_to_exit_code(&e);
            if cli.format.is_machine_readable() {
                let body = serde_json::json!({
                    "status": "error",
                    "message": format!("{e:#}"),
                    "exit_code": exit_code,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            }
            std::process::exit(exit_code);
        }
    }
}

fn map_error_to_exit_code(e: &anyhow::Error) -> i32 {
    if let Some(err) = e.downcast_ref::<BenchError>() {
        if err.code == ErrorCode::UnknownQuery {
            return exit_codes::USAGE_ERROR;
        }
        return match err.category() {
            ErrorCategory::Config => exit_codes::CONFIG_ERROR,
            _ => exit_codes::GENERAL_ERROR,
        };
    }
    exit_codes::GENERAL_ERROR
}

async fn run_cli(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::List => {
            print!("{}", output::render_listing(cli.format)?);
            Ok(exit_codes::SUCCESS)
        }
        Commands::Run(args) => run(cli, args).await,
    }
}

async fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<i32> {
    let config_path = cli.config.as_deref();
    let config = BenchConfig::from_file(config_path)?;
    let params: QueryParams = load_section(config_path, "params")?;
    let plan = settings::resolve(config, args)?;

    let storage_options = match &plan.storage_options_file {
        Some(path) => StorageOptions::from_file(path)?,
        None => StorageOptions::new(),
    };
    info!(
        root = %plan.root,
        load_mode = %plan.load_mode,
        storage_option_keys = ?storage_options.keys().collect::<Vec<_>>(),
        queries = plan.queries.len(),
        "Preparing benchmark"
    );

    let ctx = SessionContext::new_with_config(settings::session_config(&plan.engine)?);
    let cache = DatasetCache::new(
        ctx,
        Arc::new(ParquetLoader::new()),
        plan.root.clone(),
        storage_options,
    )
    .with_load_mode(plan.load_mode);

    let mut driver =
        BenchmarkDriver::new(cache, params, plan.driver.clone()).with_sink(TracingSink);
    if plan.log_time {
        let sink = CsvTimingSink::open(&plan.timing_file)
            .with_context(|| format!("Failed to open timing file {}", plan.timing_file.display()))?;
        driver = driver.with_sink(sink);
    }

    let report = driver.run(&plan.queries).await;
    match cli.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if report.all_succeeded() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::PARTIAL_FAILURE)
    }
}
