use datafusion::functions_aggregate::expr_fn::{count, count_distinct};
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::scan;
use crate::params::Q21Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q21Params) -> Result<DataFrame> {
    let lineitem = scan(cache, Table::Lineitem).await?;
    let supplier = scan(cache, Table::Supplier).await?;
    let nation = scan(cache, Table::Nation).await?;
    let orders = scan(cache, Table::Orders).await?;

    let multi_supplier_orders = lineitem
        .clone()
        .aggregate(
            vec![col("l_orderkey")],
            vec![count_distinct(col("l_suppkey")).alias("suppliers")],
        )?
        .filter(col("suppliers").gt(lit(1_i64)))?
        .select(vec![col("l_orderkey").alias("multi_orderkey")])?;

    let late_lines = lineitem
        .filter(col("l_receiptdate").gt(col("l_commitdate")))?
        .select(vec![
            col("l_orderkey").alias("late_orderkey"),
            col("l_suppkey").alias("late_suppkey"),
        ])?;

    let late_in_multi = multi_supplier_orders.join(
        late_lines,
        JoinType::Inner,
        &["multi_orderkey"],
        &["late_orderkey"],
        None,
    )?;

    // Orders where the late supplier was the only late one.
    let late_suppliers = late_in_multi
        .clone()
        .aggregate(
            vec![col("late_orderkey")],
            vec![count_distinct(col("late_suppkey")).alias("late_suppliers")],
        )?
        .select(vec![
            col("late_orderkey").alias("single_orderkey"),
            col("late_suppliers"),
        ])?;

    Ok(late_suppliers
        .join(
            late_in_multi,
            JoinType::Inner,
            &["single_orderkey"],
            &["late_orderkey"],
            None,
        )?
        .join(supplier, JoinType::Inner, &["late_suppkey"], &["s_suppkey"], None)?
        .join(nation, JoinType::Inner, &["s_nationkey"], &["n_nationkey"], None)?
        .join(orders, JoinType::Inner, &["late_orderkey"], &["o_orderkey"], None)?
        .filter(col("late_suppliers").eq(lit(1_i64)))?
        .filter(col("n_name").eq(lit(params.nation.as_str())))?
        .filter(col("o_orderstatus").eq(lit(params.order_status.as_str())))?
        .aggregate(vec![col("s_name")], vec![count(lit(1)).alias("numwait")])?
        .sort(vec![
            col("numwait").sort(false, false),
            col("s_name").sort(true, false),
        ])?
        .limit(0, Some(100))?)
}
