use datafusion::functions_aggregate::expr_fn::{max, sum};
use datafusion::prelude::{col, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, disc_price, round2, scan};
use crate::params::Q15Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q15Params) -> Result<DataFrame> {
    let lineitem = scan(cache, Table::Lineitem).await?;
    let supplier = scan(cache, Table::Supplier).await?;

    let revenue = lineitem
        .filter(col("l_shipdate").gt_eq(date_lit(params.date_from)))?
        .filter(col("l_shipdate").lt(date_lit(params.date_to)))?
        .aggregate(
            vec![col("l_suppkey")],
            vec![sum(disc_price()).alias("total_revenue")],
        )?
        .select(vec![
            col("l_suppkey").alias("supplier_no"),
            col("total_revenue"),
        ])?;

    let top = revenue
        .clone()
        .aggregate(vec![], vec![max(col("total_revenue")).alias("max_revenue")])?;

    Ok(supplier
        .join(revenue, JoinType::Inner, &["s_suppkey"], &["supplier_no"], None)?
        .join_on(
            top,
            JoinType::Inner,
            [col("total_revenue").eq(col("max_revenue"))],
        )?
        .select(vec![
            col("s_suppkey"),
            col("s_name"),
            col("s_address"),
            col("s_phone"),
            round2(col("total_revenue")).alias("total_revenue"),
        ])?
        .sort(vec![col("s_suppkey").sort(true, false)])?)
}
