use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, scan, trimmed};
use crate::params::Q20Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q20Params) -> Result<DataFrame> {
    let lineitem = scan(cache, Table::Lineitem).await?;
    let nation = scan(cache, Table::Nation).await?;
    let supplier = scan(cache, Table::Supplier).await?;
    let part = scan(cache, Table::Part).await?;
    let partsupp = scan(cache, Table::Partsupp).await?;

    let shipped = lineitem
        .filter(col("l_shipdate").gt_eq(date_lit(params.date_from)))?
        .filter(col("l_shipdate").lt(date_lit(params.date_to)))?
        .aggregate(
            vec![col("l_partkey"), col("l_suppkey")],
            vec![sum(col("l_quantity")).alias("shipped_quantity")],
        )?
        .select(vec![
            col("l_partkey"),
            col("l_suppkey"),
            (col("shipped_quantity") * lit(params.quantity_factor)).alias("sum_quantity"),
        ])?;

    let national_suppliers = supplier.join(
        nation.filter(col("n_name").eq(lit(params.nation.as_str())))?,
        JoinType::Inner,
        &["s_nationkey"],
        &["n_nationkey"],
        None,
    )?;

    Ok(part
        .filter(col("p_name").like(lit(format!("{}%", params.name_prefix))))?
        .select(vec![col("p_partkey")])?
        .distinct()?
        .join(partsupp, JoinType::Inner, &["p_partkey"], &["ps_partkey"], None)?
        .join(
            shipped,
            JoinType::Inner,
            &["ps_suppkey", "p_partkey"],
            &["l_suppkey", "l_partkey"],
            None,
        )?
        .filter(col("ps_availqty").gt(col("sum_quantity")))?
        .select(vec![col("ps_suppkey")])?
        .distinct()?
        .join(national_suppliers, JoinType::Inner, &["ps_suppkey"], &["s_suppkey"], None)?
        .select(vec![col("s_name"), trimmed("s_address")])?
        .sort(vec![col("s_name").sort(true, false)])?)
}
