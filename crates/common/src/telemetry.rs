//! Tracing subscriber setup for the lakebench binaries.
//!
//! `RUST_LOG` wins when set; otherwise the level comes from the CLI verbosity.
//! Events go to stderr so stdout carries only command output.

use lakebench_error::{BenchError, ErrorCode, Result};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Maps `-v` counts to a default filter directive.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init_tracing(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .map_err(|e| {
            BenchError::new(
                ErrorCode::InvalidConfig,
                format!("Failed to install tracing subscriber: {e}"),
            )
        })
}
