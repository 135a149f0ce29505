use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, disc_price, scan};
use crate::params::Q3Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q3Params) -> Result<DataFrame> {
    let customer = scan(cache, Table::Customer).await?;
    let orders = scan(cache, Table::Orders).await?;
    let lineitem = scan(cache, Table::Lineitem).await?;

    Ok(customer
        .filter(col("c_mktsegment").eq(lit(params.segment.as_str())))?
        .join(orders, JoinType::Inner, &["c_custkey"], &["o_custkey"], None)?
        .join(lineitem, JoinType::Inner, &["o_orderkey"], &["l_orderkey"], None)?
        .filter(col("o_orderdate").lt(date_lit(params.date)))?
        .filter(col("l_shipdate").gt(date_lit(params.date)))?
        .aggregate(
            vec![col("o_orderkey"), col("o_orderdate"), col("o_shippriority")],
            vec![sum(disc_price()).alias("revenue")],
        )?
        .select(vec![
            col("o_orderkey").alias("l_orderkey"),
            col("revenue"),
            col("o_orderdate"),
            col("o_shippriority"),
        ])?
        .sort(vec![
            col("revenue").sort(false, false),
            col("o_orderdate").sort(true, false),
        ])?
        .limit(0, Some(10))?)
}
