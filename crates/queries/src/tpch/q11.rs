use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{round2, scan};
use crate::params::Q11Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q11Params) -> Result<DataFrame> {
    let partsupp = scan(cache, Table::Partsupp).await?;
    let supplier = scan(cache, Table::Supplier).await?;
    let nation = scan(cache, Table::Nation).await?;

    let stock = partsupp
        .join(supplier, JoinType::Inner, &["ps_suppkey"], &["s_suppkey"], None)?
        .join(nation, JoinType::Inner, &["s_nationkey"], &["n_nationkey"], None)?
        .filter(col("n_name").eq(lit(params.nation.as_str())))?;

    let stock_value = || col("ps_supplycost") * col("ps_availqty");

    // The national total is rounded before the fraction is applied.
    let threshold = stock
        .clone()
        .aggregate(vec![], vec![sum(stock_value()).alias("total_value")])?
        .select(vec![
            (round2(col("total_value")) * lit(params.fraction)).alias("threshold"),
        ])?;

    Ok(stock
        .aggregate(
            vec![col("ps_partkey")],
            vec![sum(stock_value()).alias("value")],
        )?
        .select(vec![col("ps_partkey"), round2(col("value")).alias("value")])?
        .join_on(threshold, JoinType::Inner, [col("value").gt(col("threshold"))])?
        .select(vec![col("ps_partkey"), col("value")])?
        .sort(vec![col("value").sort(false, false)])?)
}
