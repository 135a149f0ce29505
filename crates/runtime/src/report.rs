//! Batch summary and its renderings.

use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use lakebench_error::Result;
use lakebench_queries::Query;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::record::{BenchmarkRecord, FailureKind, QueryOutcome, ENGINE_NAME};

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub engine: &'static str,
    pub engine_version: &'static str,
    pub include_io: bool,
    /// Time spent preloading tables. `None` when loading was timed per query.
    pub preload_secs: Option<f64>,
    pub total_secs: f64,
    pub records: Vec<BenchmarkRecord>,
    /// Queries whose every iteration succeeded, in request order.
    pub succeeded: Vec<Query>,
    /// Queries with at least one failed iteration, in request order.
    pub failed: Vec<Query>,
    /// Failed attempts per phase.
    pub failures: BTreeMap<FailureKind, usize>,
}

impl BatchReport {
    pub fn new(
        include_io: bool,
        preload: Option<Duration>,
        total: Duration,
        records: Vec<BenchmarkRecord>,
    ) -> Self {
        let mut succeeded: Vec<Query> = Vec::new();
        let mut failed: Vec<Query> = Vec::new();
        let mut failures = BTreeMap::new();
        for record in &records {
            if let Some(kind) = record.outcome.failure_kind() {
                *failures.entry(kind).or_insert(0) += 1;
            }
            let query = record.query;
            if record.is_success() {
                if !succeeded.contains(&query) && !failed.contains(&query) {
                    succeeded.push(query);
                }
            } else if !failed.contains(&query) {
                succeeded.retain(|q| *q != query);
                failed.push(query);
            }
        }

        Self {
            engine: ENGINE_NAME,
            engine_version: datafusion::DATAFUSION_VERSION,
            include_io,
            preload_secs: preload.map(|d| d.as_secs_f64()),
            total_secs: total.as_secs_f64(),
            records,
            succeeded,
            failed,
            failures,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let rule = "-".repeat(64);
        let mut out = String::new();
        out.push_str(&format!(
            "LAKEBENCH REPORT ({} {}, include_io={})\n",
            self.engine, self.engine_version, self.include_io
        ));
        out.push_str(&"=".repeat(64));
        out.push('\n');
        out.push_str(&format!(
            "{:<8} {:<10} {:<12} {:<10} {}\n",
            "Query", "Iteration", "Seconds", "Rows", "Status"
        ));
        out.push_str(&rule);
        out.push('\n');

        for record in &self.records {
            let (rows, status) = match &record.outcome {
                QueryOutcome::Success { rows } => (rows.to_string(), "OK".to_string()),
                QueryOutcome::Failed { kind, code, .. } => {
                    ("-".to_string(), format!("FAILED ({kind}, {code})"))
                }
            };
            out.push_str(&format!(
                "{:<8} {:<10} {:<12.4} {:<10} {}\n",
                record.query.to_string(),
                record.iteration,
                record.elapsed_secs,
                rows,
                status
            ));
        }

        out.push_str(&rule);
        out.push('\n');
        if let Some(preload) = self.preload_secs {
            out.push_str(&format!("Total data loading time (s): {preload:.4}\n"));
        }
        out.push_str(&format!("Total query execution time (s): {:.4}\n", self.total_secs));
        out.push_str(&format!("Succeeded: {}\n", join_ids(&self.succeeded)));
        out.push_str(&format!("Failed: {}\n", join_ids(&self.failed)));
        if !self.failures.is_empty() {
            let counts: Vec<String> = self
                .failures
                .iter()
                .map(|(kind, n)| format!("{kind} {n}"))
                .collect();
            out.push_str(&format!("Failed attempts: {}\n", counts.join(", ")));
        }
        out
    }
}

fn join_ids(queries: &[Query]) -> String {
    if queries.is_empty() {
        return "none".to_string();
    }
    queries
        .iter()
        .map(|q| q.id().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pretty-print one query's result to stdout.
pub fn print_batches(query: Query, batches: &[RecordBatch]) -> Result<()> {
    let table = pretty_format_batches(batches).map_err(datafusion::error::DataFusionError::from)?;
    println!("{query} result:\n{table}");
    Ok(())
}
