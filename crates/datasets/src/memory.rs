//! In-memory table loader.
//!
//! Serves record batches registered per table and counts how often each
//! table was requested. Used by tests and by embedders that generate data
//! in-process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use datafusion::datasource::MemTable;
use datafusion::prelude::{DataFrame, SessionContext};
use lakebench_common::StorageOptions;
use lakebench_error::{BenchError, ErrorCode, Result};
use tracing::debug;

use crate::loader::TableLoader;
use crate::table::Table;

#[derive(Default)]
pub struct MemoryLoader {
    tables: HashMap<Table, (SchemaRef, Vec<RecordBatch>)>,
    /// Remaining forced failures per table; `usize::MAX` fails forever.
    failures: HashMap<Table, AtomicUsize>,
    loads: [AtomicUsize; 8],
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: Table, batch: RecordBatch) -> Self {
        self.tables.insert(table, (batch.schema(), vec![batch]));
        self
    }

    pub fn with_batches(
        mut self,
        table: Table,
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Self {
        self.tables.insert(table, (schema, batches));
        self
    }

    /// Every load of `table` fails.
    pub fn failing(self, table: Table) -> Self {
        self.failing_times(table, usize::MAX)
    }

    /// The first `times` loads of `table` fail, later ones succeed.
    pub fn failing_times(mut self, table: Table, times: usize) -> Self {
        self.failures.insert(table, AtomicUsize::new(times));
        self
    }

    /// Number of times the loader was invoked for `table`, failed attempts included.
    pub fn load_count(&self, table: Table) -> usize {
        self.loads[table.index()].load(Ordering::SeqCst)
    }

    fn take_failure(&self, table: Table) -> bool {
        let Some(remaining) = self.failures.get(&table) else {
            return false;
        };
        remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| match n {
                0 => None,
                usize::MAX => Some(usize::MAX),
                n => Some(n - 1),
            })
            .is_ok()
    }
}

#[async_trait]
impl TableLoader for MemoryLoader {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(
        &self,
        ctx: &SessionContext,
        table: Table,
        root: &str,
        _storage_options: &StorageOptions,
    ) -> Result<DataFrame> {
        self.loads[table.index()].fetch_add(1, Ordering::SeqCst);

        if self.take_failure(table) {
            return Err(BenchError::load(
                ErrorCode::TableNotFound,
                table.name(),
                root,
                format!("Table '{table}' is unavailable"),
            ));
        }

        let (schema, batches) = self.tables.get(&table).ok_or_else(|| {
            BenchError::load(
                ErrorCode::TableNotFound,
                table.name(),
                root,
                format!("No batches registered for table '{table}'"),
            )
        })?;

        debug!(
            target: "loader",
            table = %table,
            batches = batches.len(),
            "Serving in-memory table"
        );
        let provider = MemTable::try_new(Arc::clone(schema), vec![batches.clone()])?;
        Ok(ctx.read_table(Arc::new(provider))?)
    }
}
