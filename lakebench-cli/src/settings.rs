//! Merges the layered configuration with command-line flags.
//!
//! Precedence, lowest first: defaults, config file, `LAKEBENCH_*` environment,
//! command-line flags.

use datafusion::prelude::SessionConfig;
use lakebench_common::config::EngineSettings;
use lakebench_common::{BenchConfig, LoadMode};
use lakebench_error::{BenchError, ErrorCode, ErrorContext, Result};
use lakebench_queries::Query;
use lakebench_runtime::DriverOptions;
use std::path::PathBuf;
use std::time::Duration;

/// Flags of `lakebench run` that can override configuration.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Data root holding one directory per table (local path or object store URL)
    #[arg(long)]
    pub path: Option<String>,

    /// JSON file with object store options, passed through to the loader
    #[arg(long, value_name = "FILE")]
    pub storage_options: Option<PathBuf>,

    /// TPC-H query ids to run (default: all 22)
    #[arg(short, long, num_args = 1.., value_parser = parse_query)]
    pub queries: Vec<Query>,

    /// Append per-query timings to the timing file
    #[arg(long, overrides_with = "no_log_time")]
    pub log_time: bool,

    /// Do not write the timing file
    #[arg(long)]
    pub no_log_time: bool,

    /// Timing file path (default: timings.csv)
    #[arg(long, value_name = "FILE")]
    pub timing_file: Option<PathBuf>,

    /// Pretty-print each query result
    #[arg(long)]
    pub print_result: bool,

    /// Count table loading inside each query's timer
    #[arg(long)]
    pub include_io: bool,

    /// Number of iterations per query
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: Option<u32>,

    /// Per-query time limit in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// How base tables are held: memory or scan
    #[arg(long)]
    pub load_mode: Option<LoadMode>,
}

fn parse_query(raw: &str) -> std::result::Result<Query, String> {
    raw.parse::<Query>().map_err(|e| e.to_string())
}

#[derive(Debug, Clone)]
pub struct RunPlan {
    pub root: String,
    pub storage_options_file: Option<PathBuf>,
    pub load_mode: LoadMode,
    pub queries: Vec<Query>,
    pub driver: DriverOptions,
    pub log_time: bool,
    pub timing_file: PathBuf,
    pub engine: EngineSettings,
}

pub fn resolve(config: BenchConfig, args: &RunArgs) -> Result<RunPlan> {
    let root = args.path.clone().or(config.data.path).ok_or_else(|| {
        BenchError::new(ErrorCode::InvalidConfig, "No data root configured")
            .with_hint("pass --path, set data.path in the config file or LAKEBENCH_DATA__PATH")
            .with_context(ErrorContext::Config {
                file_path: None,
                field: Some("data.path".to_string()),
            })
    })?;

    let queries = if !args.queries.is_empty() {
        args.queries.clone()
    } else {
        match config.run.queries {
            Some(ids) => ids
                .into_iter()
                .map(Query::try_from)
                .collect::<Result<Vec<_>>>()?,
            None => Query::ALL.to_vec(),
        }
    };

    let log_time = if args.no_log_time {
        false
    } else {
        args.log_time || config.logging.log_time
    };

    let driver = DriverOptions {
        include_io: args.include_io || config.run.include_io,
        iterations: args.iterations.unwrap_or(config.run.iterations),
        print_result: args.print_result || config.run.print_result,
        timeout: args
            .timeout_secs
            .or(config.run.timeout_secs)
            .map(Duration::from_secs),
    };

    Ok(RunPlan {
        root,
        storage_options_file: args
            .storage_options
            .clone()
            .or(config.data.storage_options_file),
        load_mode: args.load_mode.unwrap_or(config.data.load_mode),
        queries,
        driver,
        log_time,
        timing_file: args
            .timing_file
            .clone()
            .unwrap_or(config.logging.timing_file),
        engine: config.engine,
    })
}

pub fn session_config(engine: &EngineSettings) -> Result<SessionConfig> {
    let mut config = SessionConfig::new();
    if let Some(partitions) = engine.target_partitions {
        config = config.with_target_partitions(partitions);
    }
    if let Some(batch_size) = engine.batch_size {
        config = config.with_batch_size(batch_size);
    }
    for (key, value) in &engine.datafusion_config {
        config.options_mut().set(key, value).map_err(|e| {
            BenchError::new(
                ErrorCode::InvalidConfig,
                format!("Invalid DataFusion option '{key}': {e}"),
            )
            .with_context(ErrorContext::Config {
                file_path: None,
                field: Some(format!("engine.datafusion_config.{key}")),
            })
        })?;
    }
    Ok(config)
}
