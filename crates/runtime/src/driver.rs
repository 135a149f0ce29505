//! Runs requested queries one after another and measures each attempt.
//!
//! Every attempt walks `Pending -> Loading -> Built -> Materialized ->
//! Reported`. An error at any step moves it to `Failed`, is recorded as a
//! [`QueryOutcome::Failed`] and the batch carries on with the next attempt.

use arrow::record_batch::RecordBatch;
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::{BenchError, ErrorCode, ErrorContext};
use lakebench_queries::{Query, QueryParams};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::record::{BenchmarkRecord, FailureKind, QueryOutcome};
use crate::report::{self, BatchReport};
use crate::sink::RecordSink;

#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Count table loading inside each query's timer instead of preloading.
    pub include_io: bool,
    pub iterations: u32,
    pub print_result: bool,
    pub timeout: Option<Duration>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            include_io: false,
            iterations: 1,
            print_result: false,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptState {
    Pending,
    Loading,
    Built,
    Materialized,
    Reported,
    Failed,
}

struct Failure {
    kind: FailureKind,
    error: BenchError,
}

impl Failure {
    fn new(kind: FailureKind, error: BenchError) -> Self {
        Self { kind, error }
    }

    fn timeout(query: Query, limit: Duration) -> Self {
        let error = BenchError::new(
            ErrorCode::Timeout,
            format!("{query} did not finish within {:.3}s", limit.as_secs_f64()),
        )
        .with_context(ErrorContext::Timeout {
            query: query.id(),
            limit_secs: limit.as_secs(),
        });
        Self::new(FailureKind::Timeout, error)
    }
}

pub struct BenchmarkDriver {
    cache: DatasetCache,
    params: QueryParams,
    options: DriverOptions,
    sinks: Vec<Box<dyn RecordSink>>,
}

impl BenchmarkDriver {
    pub fn new(cache: DatasetCache, params: QueryParams, options: DriverOptions) -> Self {
        Self {
            cache,
            params,
            options,
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: impl RecordSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Run every query in `queries` for the configured number of iterations.
    /// Failures never abort the batch; they show up in the returned report.
    pub async fn run(&mut self, queries: &[Query]) -> BatchReport {
        let include_io = self.options.include_io;
        info!(
            target: "driver",
            queries = ?queries.iter().map(Query::id).collect::<Vec<_>>(),
            iterations = self.options.iterations,
            include_io,
            "Starting benchmark batch"
        );

        let (preload, failed_tables) = if include_io {
            (None, HashMap::new())
        } else {
            let (elapsed, failed) = self.preload(queries).await;
            (Some(elapsed), failed)
        };

        let start = Instant::now();
        let mut records = Vec::with_capacity(queries.len() * self.options.iterations as usize);
        for &query in queries {
            for iteration in 1..=self.options.iterations {
                let record = self.attempt(query, iteration, &failed_tables).await;
                records.push(self.report(record));
            }
        }
        let total = start.elapsed();

        for sink in &mut self.sinks {
            if let Err(e) = sink.flush() {
                warn!(target: "sink", sink = sink.name(), error = %e, "Failed to flush sink");
            }
        }

        let report = BatchReport::new(include_io, preload, total, records);
        info!(
            target: "driver",
            total_secs = report.total_secs,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Benchmark batch finished"
        );
        report
    }

    /// Load the union of the queries' tables in request order. Tables that
    /// fail are returned so dependent queries fail without retrying them.
    async fn preload(&self, queries: &[Query]) -> (Duration, HashMap<Table, BenchError>) {
        let mut tables: Vec<Table> = Vec::new();
        for table in queries.iter().flat_map(|q| q.dependencies()) {
            if !tables.contains(table) {
                tables.push(*table);
            }
        }

        let start = Instant::now();
        let mut failed = HashMap::new();
        for table in tables {
            if let Err(e) = self.cache.get_or_load(table).await {
                error!(target: "driver", table = %table, error = %e, "Preload failed");
                failed.insert(table, e);
            }
        }
        let elapsed = start.elapsed();
        info!(
            target: "driver",
            elapsed_secs = elapsed.as_secs_f64(),
            failed = failed.len(),
            "Total data loading time"
        );
        (elapsed, failed)
    }

    async fn attempt(
        &self,
        query: Query,
        iteration: u32,
        failed_tables: &HashMap<Table, BenchError>,
    ) -> BenchmarkRecord {
        self.transition(query, iteration, AttemptState::Pending);
        let start = Instant::now();
        let execution = self.execute(query, iteration, failed_tables);
        let result = match self.options.timeout {
            Some(limit) => match tokio::time::timeout(limit, execution).await {
                Ok(result) => result,
                Err(_) => Err(Failure::timeout(query, limit)),
            },
            None => execution.await,
        };
        let elapsed = start.elapsed().as_secs_f64();
        let include_io = self.options.include_io;

        match result {
            Ok(batches) => {
                let rows = batches.iter().map(RecordBatch::num_rows).sum();
                info!(
                    target: "driver",
                    query = %query,
                    iteration,
                    elapsed_secs = elapsed,
                    rows,
                    "Query finished"
                );
                let outcome = QueryOutcome::Success { rows };
                let record = BenchmarkRecord::new(query, iteration, include_io, elapsed, outcome);
                if self.options.print_result {
                    record.with_batches(batches)
                } else {
                    record
                }
            }
            Err(Failure { kind, error: err }) => {
                self.transition(query, iteration, AttemptState::Failed);
                error!(
                    target: "driver",
                    query = %query,
                    iteration,
                    kind = %kind,
                    code = %err.code,
                    error = %err,
                    "Query failed"
                );
                let outcome = QueryOutcome::Failed {
                    kind,
                    code: err.code,
                    detail: err.to_string(),
                };
                BenchmarkRecord::new(query, iteration, include_io, 0.0, outcome)
            }
        }
    }

    async fn execute(
        &self,
        query: Query,
        iteration: u32,
        failed_tables: &HashMap<Table, BenchError>,
    ) -> Result<Vec<RecordBatch>, Failure> {
        self.transition(query, iteration, AttemptState::Loading);
        for table in query.dependencies() {
            if let Some(err) = failed_tables.get(table) {
                return Err(Failure::new(FailureKind::Load, err.clone()));
            }
            self.cache
                .get_or_load(*table)
                .await
                .map_err(|e| Failure::new(FailureKind::Load, e))?;
        }

        let df = query
            .build(&self.cache, &self.params)
            .await
            .map_err(|e| Failure::new(FailureKind::Build, e))?;
        self.transition(query, iteration, AttemptState::Built);

        let batches = df
            .collect()
            .await
            .map_err(|e| Failure::new(FailureKind::Evaluation, BenchError::from(e)))?;
        self.transition(query, iteration, AttemptState::Materialized);
        Ok(batches)
    }

    /// Hands `record` to every sink, then prints its result if one was kept.
    /// The returned record no longer holds the batches.
    fn report(&mut self, mut record: BenchmarkRecord) -> BenchmarkRecord {
        for sink in &mut self.sinks {
            if let Err(e) = sink.record(&record) {
                warn!(
                    target: "sink",
                    sink = sink.name(),
                    query = %record.query,
                    error = %e,
                    "Failed to write benchmark record"
                );
            }
        }
        if let Some(batches) = record.batches.take() {
            if let Err(e) = report::print_batches(record.query, &batches) {
                warn!(
                    target: "driver",
                    query = %record.query,
                    error = %e,
                    "Failed to print result"
                );
            }
        }
        if record.is_success() {
            self.transition(record.query, record.iteration, AttemptState::Reported);
        }
        record
    }

    fn transition(&self, query: Query, iteration: u32, state: AttemptState) {
        debug!(target: "driver", query = %query, iteration, state = ?state, "State transition");
    }
}
