//! What one timed attempt produced.

use arrow::record_batch::RecordBatch;
use lakebench_error::ErrorCode;
use lakebench_queries::Query;
use serde::Serialize;
use std::fmt;

pub const ENGINE_NAME: &str = "datafusion";

/// The phase an attempt failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Load,
    Build,
    Evaluation,
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Load => "load",
            FailureKind::Build => "build",
            FailureKind::Evaluation => "evaluation",
            FailureKind::Timeout => "timeout",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    Success {
        rows: usize,
    },
    Failed {
        kind: FailureKind,
        code: ErrorCode,
        detail: String,
    },
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Success { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            QueryOutcome::Success { .. } => None,
            QueryOutcome::Failed { kind, .. } => Some(*kind),
        }
    }
}

/// One row of benchmark output, built once per attempt.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRecord {
    pub query: Query,
    pub iteration: u32,
    pub engine: &'static str,
    pub engine_version: &'static str,
    /// Wall-clock seconds from the start of loading to the end of `collect()`.
    /// Zero for failed attempts.
    pub elapsed_secs: f64,
    pub include_io: bool,
    pub outcome: QueryOutcome,
    /// Materialized result, kept only when printing was requested and only
    /// until the record has been reported.
    #[serde(skip)]
    pub batches: Option<Vec<RecordBatch>>,
}

impl BenchmarkRecord {
    pub fn new(
        query: Query,
        iteration: u32,
        include_io: bool,
        elapsed_secs: f64,
        outcome: QueryOutcome,
    ) -> Self {
        let elapsed_secs = if outcome.is_success() { elapsed_secs } else { 0.0 };
        Self {
            query,
            iteration,
            engine: ENGINE_NAME,
            engine_version: datafusion::DATAFUSION_VERSION,
            elapsed_secs,
            include_io,
            outcome,
            batches: None,
        }
    }

    pub fn with_batches(mut self, batches: Vec<RecordBatch>) -> Self {
        self.batches = Some(batches);
        self
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_record_has_zero_elapsed() {
        let outcome = QueryOutcome::Failed {
            kind: FailureKind::Load,
            code: ErrorCode::TableNotFound,
            detail: "missing".into(),
        };
        let record = BenchmarkRecord::new(Query::Q3, 1, false, 4.2, outcome);
        assert_eq!(record.elapsed_secs, 0.0);
        assert!(!record.is_success());
    }

    #[test]
    fn test_record_serializes_without_batches() {
        let outcome = QueryOutcome::Success { rows: 1 };
        let record = BenchmarkRecord::new(Query::Q6, 2, true, 0.5, outcome).with_batches(vec![]);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["query"], 6);
        assert_eq!(json["engine"], "datafusion");
        assert_eq!(json["outcome"]["status"], "success");
        assert_eq!(json["outcome"]["rows"], 1);
        assert!(json.get("batches").is_none());
    }

    #[test]
    fn test_failure_kind_serializes_snake_case() {
        let outcome = QueryOutcome::Failed {
            kind: FailureKind::Evaluation,
            code: ErrorCode::ExecutionFailed,
            detail: "boom".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "evaluation");
        assert_eq!(json["code"], "LKB-3001");
    }
}
