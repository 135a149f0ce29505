use datafusion::functions_aggregate::expr_fn::{avg, sum};
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{round2, scan};
use crate::params::Q17Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q17Params) -> Result<DataFrame> {
    let lineitem = scan(cache, Table::Lineitem).await?;
    let part = scan(cache, Table::Part).await?;

    let lines = part
        .filter(col("p_brand").eq(lit(params.brand.as_str())))?
        .filter(col("p_container").eq(lit(params.container.as_str())))?
        .join(lineitem, JoinType::Inner, &["p_partkey"], &["l_partkey"], None)?;

    let part_avg = lines
        .clone()
        .aggregate(
            vec![col("p_partkey")],
            vec![avg(col("l_quantity")).alias("mean_quantity")],
        )?
        .select(vec![
            col("p_partkey").alias("key"),
            (lit(params.quantity_factor) * col("mean_quantity")).alias("avg_quantity"),
        ])?;

    Ok(lines
        .join(part_avg, JoinType::Inner, &["p_partkey"], &["key"], None)?
        .filter(col("l_quantity").lt(col("avg_quantity")))?
        .aggregate(
            vec![],
            vec![sum(col("l_extendedprice")).alias("small_order_price")],
        )?
        .select(vec![
            round2(col("small_order_price") / lit(7.0)).alias("avg_yearly"),
        ])?)
}
