//! The 22 TPC-H queries as DataFusion `DataFrame` pipelines.
//!
//! A [`Query`] knows the tables it reads and builds its pipeline over a
//! [`DatasetCache`](lakebench_datasets::DatasetCache). Building never touches
//! data; the caller decides when to `collect()`.
//!
//! ```ignore
//! let df = Query::Q6.build(&cache, &QueryParams::default()).await?;
//! let batches = df.collect().await?;
//! ```
mod exprs;
pub mod params;
mod query;
mod tpch;

pub use params::QueryParams;
pub use query::Query;
