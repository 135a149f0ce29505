use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::scan;
use crate::params::Q18Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q18Params) -> Result<DataFrame> {
    let customer = scan(cache, Table::Customer).await?;
    let lineitem = scan(cache, Table::Lineitem).await?;
    let orders = scan(cache, Table::Orders).await?;

    let large_orders = lineitem
        .clone()
        .aggregate(
            vec![col("l_orderkey")],
            vec![sum(col("l_quantity")).alias("order_quantity")],
        )?
        .filter(col("order_quantity").gt(lit(params.quantity)))?
        .select(vec![col("l_orderkey").alias("key")])?;

    Ok(large_orders
        .join(orders, JoinType::Inner, &["key"], &["o_orderkey"], None)?
        .join(lineitem, JoinType::Inner, &["key"], &["l_orderkey"], None)?
        .join(customer, JoinType::Inner, &["o_custkey"], &["c_custkey"], None)?
        .aggregate(
            vec![
                col("c_name"),
                col("o_custkey"),
                col("key"),
                col("o_orderdate"),
                col("o_totalprice"),
            ],
            vec![sum(col("l_quantity")).alias("sum_quantity")],
        )?
        .select(vec![
            col("c_name"),
            col("o_custkey").alias("c_custkey"),
            col("key").alias("o_orderkey"),
            col("o_orderdate"),
            col("o_totalprice"),
            col("sum_quantity"),
        ])?
        .sort(vec![
            col("o_totalprice").sort(false, false),
            col("o_orderdate").sort(true, false),
        ])?
        .limit(0, Some(100))?)
}
