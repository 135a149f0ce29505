//! Parquet table loader.
//!
//! Reads every `*.parquet` file under `{root}/{table}/` through DataFusion's
//! `ListingTable`. Local paths and remote object stores (S3, GCS, Azure,
//! HTTP) are both supported; remote stores are built from the storage
//! options.
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use datafusion::datasource::file_format::parquet::ParquetFormat;
use datafusion::datasource::listing::{
    ListingOptions, ListingTable, ListingTableConfig, ListingTableUrl,
};
use datafusion::prelude::{DataFrame, SessionContext};
use lakebench_common::StorageOptions;
use lakebench_error::{BenchError, ErrorCode, Result};
use tracing::{debug, info};
use url::Url;

use crate::loader::TableLoader;
use crate::table::Table;

const PARQUET_EXTENSION: &str = ".parquet";

#[derive(Debug, Clone, Default)]
pub struct ParquetLoader;

impl ParquetLoader {
    pub fn new() -> Self {
        Self
    }
}

/// `{root}/{table}/`, with the trailing slash that marks a listing prefix.
pub fn table_location(root: &str, table: Table) -> String {
    format!("{}/{}/", root.trim_end_matches('/'), table.name())
}

fn remote_url(location: &str) -> Option<Url> {
    // Single-letter schemes are Windows drive letters, not URLs.
    Url::parse(location)
        .ok()
        .filter(|url| url.scheme().len() > 1 && url.scheme() != "file")
}

fn register_object_store(
    ctx: &SessionContext,
    table: Table,
    url: &Url,
    options: &StorageOptions,
) -> Result<()> {
    let (store, _) = object_store::parse_url_opts(url, options.exposed()).map_err(|e| {
        BenchError::load(
            ErrorCode::ObjectStore,
            table.name(),
            url.as_str(),
            format!("Failed to configure object store for {}: {e}", url.scheme()),
        )
    })?;

    let mut store_url = url.clone();
    store_url.set_path("");
    store_url.set_query(None);
    store_url.set_fragment(None);

    debug!(
        target: "loader",
        store = %store_url,
        option_keys = ?options.keys().collect::<Vec<_>>(),
        "Registering object store"
    );
    ctx.register_object_store(&store_url, Arc::from(store));
    Ok(())
}

#[async_trait]
impl TableLoader for ParquetLoader {
    fn name(&self) -> &'static str {
        "parquet"
    }

    async fn load(
        &self,
        ctx: &SessionContext,
        table: Table,
        root: &str,
        storage_options: &StorageOptions,
    ) -> Result<DataFrame> {
        let location = table_location(root, table);

        match remote_url(&location) {
            Some(url) => register_object_store(ctx, table, &url, storage_options)?,
            None => {
                if !Path::new(&location).is_dir() {
                    return Err(BenchError::load(
                        ErrorCode::TableNotFound,
                        table.name(),
                        &location,
                        format!("Directory {location} does not exist"),
                    )
                    .with_hint("The data root must contain one directory per TPC-H table"));
                }
            }
        }

        let load_err = |code: ErrorCode, e: &dyn std::fmt::Display| {
            BenchError::load(code, table.name(), &location, format!("{table}: {e}"))
        };

        let table_url =
            ListingTableUrl::parse(&location).map_err(|e| load_err(ErrorCode::TableNotFound, &e))?;
        let listing_options = ListingOptions::new(Arc::new(ParquetFormat::default()))
            .with_file_extension(PARQUET_EXTENSION);

        let schema = listing_options
            .infer_schema(&ctx.state(), &table_url)
            .await
            .map_err(|e| load_err(ErrorCode::TableUnreadable, &e))?;
        if schema.fields().is_empty() {
            return Err(load_err(
                ErrorCode::TableNotFound,
                &format!("no {PARQUET_EXTENSION} files under {location}"),
            ));
        }

        info!(
            target: "loader",
            table = %table,
            location = %location,
            columns = schema.fields().len(),
            "Resolved parquet listing"
        );

        let config = ListingTableConfig::new(table_url)
            .with_listing_options(listing_options)
            .with_schema(schema);
        let provider =
            ListingTable::try_new(config).map_err(|e| load_err(ErrorCode::TableUnreadable, &e))?;

        Ok(ctx.read_table(Arc::new(provider))?)
    }
}
