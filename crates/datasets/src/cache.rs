//! Memoized, per-table dataset cache.
//!
//! Each logical table is loaded at most once per cache. The first request
//! invokes the loader, normalizes the result and installs it in the session;
//! every later request returns a reference to the same `DataFrame`.
//!
//! Each table owns a `tokio::sync::OnceCell`, so concurrent first requests for
//! one table wait on a single load while different tables load independently.
//! A failed load leaves its cell empty and the next request retries.

use std::sync::Arc;
use std::time::{Duration, Instant};

use datafusion::prelude::{DataFrame, SessionContext};
use lakebench_common::{LoadMode, StorageOptions};
use lakebench_error::{BenchError, ErrorCategory, ErrorCode, ErrorContext, Result};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::loader::{install_table, normalize_table, TableLoader};
use crate::table::Table;

pub struct DatasetCache {
    ctx: SessionContext,
    loader: Arc<dyn TableLoader>,
    root: String,
    storage_options: StorageOptions,
    load_mode: LoadMode,
    entries: [OnceCell<DataFrame>; 8],
}

impl DatasetCache {
    pub fn new(
        ctx: SessionContext,
        loader: Arc<dyn TableLoader>,
        root: impl Into<String>,
        storage_options: StorageOptions,
    ) -> Self {
        Self {
            ctx,
            loader,
            root: root.into(),
            storage_options,
            load_mode: LoadMode::default(),
            entries: std::array::from_fn(|_| OnceCell::new()),
        }
    }

    pub fn with_load_mode(mut self, load_mode: LoadMode) -> Self {
        self.load_mode = load_mode;
        self
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn load_mode(&self) -> LoadMode {
        self.load_mode
    }

    /// Return the cached table, loading it on first access.
    pub async fn get_or_load(&self, table: Table) -> Result<&DataFrame> {
        let cell = &self.entries[table.index()];
        if let Some(df) = cell.get() {
            debug!(target: "cache", table = %table, "Cache hit");
            return Ok(df);
        }
        cell.get_or_try_init(|| self.load(table)).await
    }

    /// Load every table in order, stopping at the first failure.
    pub async fn preload<I>(&self, tables: I) -> Result<Duration>
    where
        I: IntoIterator<Item = Table>,
    {
        let start = Instant::now();
        for table in tables {
            self.get_or_load(table).await?;
        }
        Ok(start.elapsed())
    }

    pub fn is_loaded(&self, table: Table) -> bool {
        self.entries[table.index()].initialized()
    }

    pub fn loaded_tables(&self) -> Vec<Table> {
        Table::ALL
            .into_iter()
            .filter(|t| self.is_loaded(*t))
            .collect()
    }

    async fn load(&self, table: Table) -> Result<DataFrame> {
        let start = Instant::now();
        info!(
            target: "cache",
            table = %table,
            root = %self.root,
            loader = self.loader.name(),
            mode = %self.load_mode,
            "Loading table"
        );

        let result = async {
            let raw = self
                .loader
                .load(&self.ctx, table, &self.root, &self.storage_options)
                .await?;
            let normalized = normalize_table(raw, table)?;
            install_table(&self.ctx, table, normalized, self.load_mode).await
        }
        .await;

        match result {
            Ok(df) => {
                info!(
                    target: "cache",
                    table = %table,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Table loaded"
                );
                Ok(df)
            }
            Err(e) => {
                warn!(target: "cache", table = %table, error = %e, "Table load failed");
                Err(as_load_error(e, table, &self.root))
            }
        }
    }
}

/// Errors raised while loading keep their load code; anything else (a cast
/// failing during collection, say) is reported as an unreadable table.
fn as_load_error(err: BenchError, table: Table, root: &str) -> BenchError {
    if err.category() == ErrorCategory::Load {
        return err;
    }
    let context = err.context.clone().unwrap_or(ErrorContext::TableLoad {
        table: table.name().to_string(),
        path: root.to_string(),
    });
    BenchError::new(
        ErrorCode::TableUnreadable,
        format!("Failed to load '{table}': {}", err.message),
    )
    .with_context(context)
}
