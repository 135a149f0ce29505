//! Logical TPC-H tables and the dataset cache shared by every query.
//!
//! - [`Table`]: the eight logical tables and their normalization rules.
//! - [`TableLoader`]: the external loader seam; [`ParquetLoader`] reads
//!   `{root}/{table}/*.parquet`, [`MemoryLoader`] serves in-memory batches.
//! - [`DatasetCache`]: loads each table at most once and hands every caller
//!   the same normalized `DataFrame`.
pub mod cache;
pub mod loader;
pub mod memory;
pub mod parquet;
pub mod table;

pub use cache::DatasetCache;
pub use lakebench_common::{LoadMode, StorageOptions};
pub use loader::{install_table, normalize_table, TableLoader};
pub use memory::MemoryLoader;
pub use parquet::ParquetLoader;
pub use table::Table;
