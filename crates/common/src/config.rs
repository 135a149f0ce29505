use lakebench_error::{BenchError, ErrorCode, ErrorContext, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use validator::Validate;

// Default constants
pub const ENV_PREFIX: &str = "LAKEBENCH";
pub const DEFAULT_TIMING_FILE: &str = "timings.csv";
pub const DEFAULT_ITERATIONS: u32 = 1;
pub const DEFAULT_LOG_TIME: bool = true;

/// How the table loader materializes base tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Read every file into memory at load time; queries never touch storage.
    #[default]
    Memory,
    /// Keep a lazy scan over the files; I/O happens when a query materializes.
    Scan,
}

impl FromStr for LoadMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(LoadMode::Memory),
            "scan" => Ok(LoadMode::Scan),
            other => Err(format!(
                "invalid load mode '{other}', expected 'memory' or 'scan'"
            )),
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMode::Memory => f.write_str("memory"),
            LoadMode::Scan => f.write_str("scan"),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, Validate)]
pub struct BenchConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    #[validate(nested)]
    pub run: RunSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    #[validate(nested)]
    pub engine: EngineSettings,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DataSettings {
    /// Root whose `{root}/{table}` directories hold the Parquet files.
    #[serde(default)]
    pub path: Option<String>,
    /// JSON file with object store credentials.
    #[serde(default)]
    pub storage_options_file: Option<PathBuf>,
    #[serde(default)]
    pub load_mode: LoadMode,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct RunSettings {
    /// Query ids to run; all 22 when unset.
    #[serde(default)]
    pub queries: Option<Vec<u8>>,
    #[serde(default = "default_iterations")]
    #[validate(range(min = 1))]
    pub iterations: u32,
    #[serde(default)]
    pub include_io: bool,
    #[serde(default)]
    pub print_result: bool,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub timeout_secs: Option<u64>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            queries: None,
            iterations: default_iterations(),
            include_io: false,
            print_result: false,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    #[serde(default = "default_log_time")]
    pub log_time: bool,
    #[serde(default = "default_timing_file")]
    pub timing_file: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_time: default_log_time(),
            timing_file: default_timing_file(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, Validate)]
pub struct EngineSettings {
    #[serde(default)]
    #[validate(range(min = 1))]
    pub target_partitions: Option<usize>,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub batch_size: Option<usize>,
    /// Raw DataFusion options, e.g. `datafusion.execution.parquet.pushdown_filters`.
    #[serde(default)]
    pub datafusion_config: HashMap<String, String>,
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_log_time() -> bool {
    DEFAULT_LOG_TIME
}

fn default_timing_file() -> PathBuf {
    PathBuf::from(DEFAULT_TIMING_FILE)
}

fn build_layers(path: Option<&Path>) -> Result<config::Config> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(config_error(
                path,
                format!("Configuration file {} does not exist", path.display()),
            ));
        }
        builder = builder.add_source(config::File::from(path));
    }

    // LAKEBENCH_RUN__ITERATIONS maps to run.iterations, etc.
    let builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|e| {
        BenchError::new(
            ErrorCode::InvalidConfig,
            format!("Failed to build configuration: {e}"),
        )
    })
}

fn config_error(path: &Path, message: String) -> BenchError {
    BenchError::new(ErrorCode::InvalidConfig, message).with_context(ErrorContext::Config {
        file_path: Some(path.display().to_string()),
        field: None,
    })
}

impl BenchConfig {
    /// Load the optional file, then `LAKEBENCH_*` environment overrides, then validate.
    pub fn from_file(path: Option<&Path>) -> Result<Self> {
        let cfg = build_layers(path)?;

        let bench: BenchConfig = cfg.try_deserialize().map_err(|e| {
            BenchError::new(
                ErrorCode::InvalidConfig,
                format!("Failed to deserialize configuration: {e}"),
            )
        })?;

        bench.validate().map_err(|e| {
            BenchError::new(
                ErrorCode::InvalidConfig,
                format!("Configuration validation failed: {e}"),
            )
        })?;

        Ok(bench)
    }
}

/// Deserialize one top-level section of the layered configuration, falling
/// back to `T::default()` when the section is absent.
pub fn load_section<T>(path: Option<&Path>, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let cfg = build_layers(path)?;
    match cfg.get::<T>(key) {
        Ok(section) => Ok(section),
        Err(config::ConfigError::NotFound(_)) => Ok(T::default()),
        Err(e) => Err(BenchError::new(
            ErrorCode::InvalidConfig,
            format!("Failed to deserialize section '{key}': {e}"),
        )
        .with_context(ErrorContext::Config {
            file_path: path.map(|p| p.display().to_string()),
            field: Some(key.to_string()),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_validation() {
        let config = BenchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.run.iterations, 1);
        assert!(config.logging.log_time);
        assert_eq!(config.data.load_mode, LoadMode::Memory);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = BenchConfig {
            run: RunSettings {
                iterations: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_mode_parsing() {
        assert_eq!("scan".parse::<LoadMode>().unwrap(), LoadMode::Scan);
        assert_eq!("MEMORY".parse::<LoadMode>().unwrap(), LoadMode::Memory);
        assert!("eager".parse::<LoadMode>().is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "data:\n  path: /data/sf1\n  load_mode: scan\n\
             run:\n  queries: [1, 6]\n  iterations: 3\n\
             logging:\n  log_time: false"
        )
        .unwrap();

        let config = BenchConfig::from_file(Some(&path)).unwrap();
        assert_eq!(config.data.path.as_deref(), Some("/data/sf1"));
        assert_eq!(config.data.load_mode, LoadMode::Scan);
        assert_eq!(config.run.queries, Some(vec![1, 6]));
        assert_eq!(config.run.iterations, 3);
        assert!(!config.logging.log_time);
        assert_eq!(config.logging.timing_file, PathBuf::from(DEFAULT_TIMING_FILE));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = BenchConfig::from_file(Some(Path::new("/nonexistent/bench.yaml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_absent_section_uses_default() {
        #[derive(Debug, Deserialize, Default, PartialEq)]
        struct Extra {
            #[serde(default)]
            flag: bool,
        }
        let extra: Extra = load_section(None, "extra_section_not_present").unwrap();
        assert_eq!(extra, Extra::default());
    }
}
