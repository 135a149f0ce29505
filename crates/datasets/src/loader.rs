//! The table loader seam and the normalization applied to every loaded table.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::datatypes::{DataType, SchemaRef};
use async_trait::async_trait;
use datafusion::datasource::MemTable;
use datafusion::logical_expr::{cast, ident, Expr};
use datafusion::prelude::{DataFrame, SessionContext};
use lakebench_common::{LoadMode, StorageOptions};
use lakebench_error::{BenchError, ErrorCode, ErrorContext, Result};
use tracing::debug;

use crate::table::Table;

/// Reads one logical table. Implementations return the raw table; the
/// dataset cache normalizes and installs it.
#[async_trait]
pub trait TableLoader: Send + Sync {
    fn name(&self) -> &'static str;

    async fn load(
        &self,
        ctx: &SessionContext,
        table: Table,
        root: &str,
        storage_options: &StorageOptions,
    ) -> Result<DataFrame>;
}

/// Lowercase every column name, cast the table's date columns to `Date32`
/// and decimal measures to `Float64`.
///
/// Fails with `SchemaMismatch` when a designated date column is absent or
/// when no column carries the table's prefix, which is what a directory
/// holding some other table looks like.
pub fn normalize_table(df: DataFrame, table: Table) -> Result<DataFrame> {
    let fields: Vec<_> = df.schema().fields().iter().cloned().collect();

    let present: HashSet<String> = fields
        .iter()
        .map(|f| f.name().to_ascii_lowercase())
        .collect();
    let missing: Vec<String> = table
        .date_columns()
        .iter()
        .filter(|c| !present.contains(**c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(BenchError::new(
            ErrorCode::SchemaMismatch,
            format!(
                "Table '{}' is missing date column(s) {}",
                table,
                missing.join(", ")
            ),
        )
        .with_context(ErrorContext::SchemaMismatch {
            table: table.name().to_string(),
            missing_columns: missing,
        }));
    }

    let prefix = table.column_prefix();
    if !present.iter().any(|c| c.starts_with(prefix)) {
        return Err(BenchError::new(
            ErrorCode::SchemaMismatch,
            format!("Table '{table}' has no {prefix}* columns"),
        )
        .with_hint(format!("check that {table}/ under the data root holds the {table} table"))
        .with_context(ErrorContext::SchemaMismatch {
            table: table.name().to_string(),
            missing_columns: vec![format!("{prefix}*")],
        }));
    }

    let projection: Vec<Expr> = fields
        .iter()
        .map(|field| {
            let lowered = field.name().to_ascii_lowercase();
            let column = ident(field.name());
            let expr = if table.date_columns().contains(&lowered.as_str()) {
                cast(column, DataType::Date32)
            } else if matches!(
                field.data_type(),
                DataType::Decimal128(..) | DataType::Decimal256(..)
            ) {
                cast(column, DataType::Float64)
            } else {
                column
            };
            expr.alias(lowered)
        })
        .collect();

    Ok(df.select(projection)?)
}

/// Register a normalized table under its logical name and return the
/// session's handle to it.
///
/// `Memory` collects the table into a `MemTable` first, so the I/O and the
/// casts happen here exactly once. `Scan` registers the lazy plan as a view.
pub async fn install_table(
    ctx: &SessionContext,
    table: Table,
    normalized: DataFrame,
    mode: LoadMode,
) -> Result<DataFrame> {
    match mode {
        LoadMode::Memory => {
            let schema: SchemaRef = Arc::clone(normalized.schema().inner());
            let partitions = normalized.collect_partitioned().await?;
            let rows: usize = partitions
                .iter()
                .flat_map(|p| p.iter())
                .map(|b| b.num_rows())
                .sum();
            debug!(
                target: "loader",
                table = %table,
                partitions = partitions.len(),
                rows,
                "Materialized table into memory"
            );
            let provider = MemTable::try_new(schema, partitions)?;
            ctx.register_table(table.name(), Arc::new(provider))?;
        }
        LoadMode::Scan => {
            ctx.register_table(table.name(), normalized.into_view())?;
        }
    }

    Ok(ctx.table(table.name()).await?)
}
