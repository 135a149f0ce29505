//! Common utilities, types, and configuration shared across lakebench crates.
//!
//! - **Configuration**: layered benchmark configuration (`config`).
//! - **Storage options**: opaque credential bag passed to the table loader (`storage`).
//! - **Telemetry**: tracing subscriber setup (`telemetry`).
pub mod config;
pub mod storage;
pub mod telemetry;

pub use crate::config::{BenchConfig, LoadMode};
pub use crate::storage::StorageOptions;
