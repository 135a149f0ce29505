//! Benchmark driver for the TPC-H queries.
//!
//! The [`BenchmarkDriver`] owns a [`DatasetCache`](lakebench_datasets::DatasetCache),
//! runs requested queries in order, times each attempt and isolates failures so
//! one broken query never takes down the batch. Records flow to any number of
//! [`RecordSink`]s; the final [`BatchReport`] renders as text or JSON.

pub mod driver;
pub mod record;
pub mod report;
pub mod sink;

pub use driver::{BenchmarkDriver, DriverOptions};
pub use record::{BenchmarkRecord, FailureKind, QueryOutcome};
pub use report::BatchReport;
pub use sink::{CsvTimingSink, MemorySink, RecordSink, TracingSink};
