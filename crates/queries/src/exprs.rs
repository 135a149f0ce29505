//! Expression helpers shared by the query pipelines.

use chrono::{Datelike, NaiveDate};
use datafusion::common::ScalarValue;
use datafusion::functions::expr_fn::{btrim, date_part, round};
use datafusion::prelude::{col, lit, DataFrame, Expr};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

/// Days between 0001-01-01 and 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub(crate) fn date_lit(date: NaiveDate) -> Expr {
    lit(ScalarValue::Date32(Some(
        date.num_days_from_ce() - EPOCH_DAYS_FROM_CE,
    )))
}

/// `l_extendedprice * (1 - l_discount)`
pub(crate) fn disc_price() -> Expr {
    col("l_extendedprice") * (lit(1.0) - col("l_discount"))
}

pub(crate) fn round2(expr: Expr) -> Expr {
    round(vec![expr, lit(2_i64)])
}

pub(crate) fn year(expr: Expr) -> Expr {
    date_part(lit("year"), expr)
}

/// Strip surrounding whitespace from a text column, keeping its name.
pub(crate) fn trimmed(name: &str) -> Expr {
    btrim(vec![col(name)]).alias(name)
}

pub(crate) fn str_list(values: &[String]) -> Vec<Expr> {
    values.iter().map(|v| lit(v.as_str())).collect()
}

/// A fresh handle on a cached table. Every branch of a pipeline starts from
/// its own clone, so filters on one branch never reach the others.
pub(crate) async fn scan(cache: &DatasetCache, table: Table) -> Result<DataFrame> {
    Ok(cache.get_or_load(table).await?.clone())
}
