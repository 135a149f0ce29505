use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{disc_price, round2, scan, year};
use crate::params::Q9Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q9Params) -> Result<DataFrame> {
    let part = scan(cache, Table::Part).await?;
    let supplier = scan(cache, Table::Supplier).await?;
    let lineitem = scan(cache, Table::Lineitem).await?;
    let partsupp = scan(cache, Table::Partsupp).await?;
    let orders = scan(cache, Table::Orders).await?;
    let nation = scan(cache, Table::Nation).await?;

    let amount = disc_price() - col("ps_supplycost") * col("l_quantity");

    Ok(lineitem
        .join(supplier, JoinType::Inner, &["l_suppkey"], &["s_suppkey"], None)?
        .join(
            partsupp,
            JoinType::Inner,
            &["l_suppkey", "l_partkey"],
            &["ps_suppkey", "ps_partkey"],
            None,
        )?
        .join(part, JoinType::Inner, &["l_partkey"], &["p_partkey"], None)?
        .join(orders, JoinType::Inner, &["l_orderkey"], &["o_orderkey"], None)?
        .join(nation, JoinType::Inner, &["s_nationkey"], &["n_nationkey"], None)?
        .filter(col("p_name").like(lit(format!("%{}%", params.color))))?
        .select(vec![
            col("n_name").alias("nation"),
            year(col("o_orderdate")).alias("o_year"),
            amount.alias("amount"),
        ])?
        .aggregate(
            vec![col("nation"), col("o_year")],
            vec![sum(col("amount")).alias("sum_profit")],
        )?
        .select(vec![
            col("nation"),
            col("o_year"),
            round2(col("sum_profit")).alias("sum_profit"),
        ])?
        .sort(vec![
            col("nation").sort(true, false),
            col("o_year").sort(false, false),
        ])?)
}
