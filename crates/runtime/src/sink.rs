//! Destinations for benchmark records.

use lakebench_error::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::record::BenchmarkRecord;

pub const CSV_HEADER: &str = "solution,version,query,iteration,duration_s,include_io,success";

/// Receives every record the driver produces, in order.
pub trait RecordSink: Send {
    fn name(&self) -> &'static str;

    fn record(&mut self, record: &BenchmarkRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Appends one CSV row per record to a timing file.
pub struct CsvTimingSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl CsvTimingSink {
    /// Opens `path` for appending. The header is written only when the file
    /// is new or empty, so repeated runs accumulate rows under one header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let is_new = std::fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = BufWriter::new(file);
        if is_new {
            writeln!(writer, "{CSV_HEADER}")?;
        }
        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn csv_row(record: &BenchmarkRecord) -> String {
    format!(
        "{},{},{},{},{},{},{}",
        record.engine,
        record.engine_version,
        record.query.id(),
        record.iteration,
        record.elapsed_secs,
        record.include_io,
        record.is_success()
    )
}

impl RecordSink for CsvTimingSink {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn record(&mut self, record: &BenchmarkRecord) -> Result<()> {
        writeln!(self.writer, "{}", csv_row(record))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Emits each record as a structured `info` event.
#[derive(Debug, Default)]
pub struct TracingSink;

impl RecordSink for TracingSink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn record(&mut self, record: &BenchmarkRecord) -> Result<()> {
        info!(
            target: "sink",
            query = %record.query,
            iteration = record.iteration,
            elapsed_secs = record.elapsed_secs,
            include_io = record.include_io,
            success = record.is_success(),
            "Benchmark record"
        );
        Ok(())
    }
}

/// Collects records in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<BenchmarkRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<BenchmarkRecord> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl RecordSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn record(&mut self, record: &BenchmarkRecord) -> Result<()> {
        let mut guard = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(record.clone());
        Ok(())
    }
}
