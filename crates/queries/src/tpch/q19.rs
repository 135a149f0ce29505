use datafusion::functions::expr_fn::coalesce;
use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame, Expr, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{disc_price, round2, scan, str_list};
use crate::params::{Q19Group, Q19Params};

fn matches_group(group: &Q19Group) -> Expr {
    col("p_brand")
        .eq(lit(group.brand.as_str()))
        .and(col("p_container").in_list(str_list(&group.containers), false))
        .and(col("l_quantity").between(lit(group.quantity_min), lit(group.quantity_max)))
        .and(col("p_size").between(lit(1_i64), lit(group.size_max)))
}

pub(crate) async fn build(cache: &DatasetCache, params: &Q19Params) -> Result<DataFrame> {
    let lineitem = scan(cache, Table::Lineitem).await?;
    let part = scan(cache, Table::Part).await?;

    let any_group = params
        .groups
        .iter()
        .map(matches_group)
        .reduce(Expr::or)
        .unwrap_or_else(|| lit(false));

    Ok(part
        .join(lineitem, JoinType::Inner, &["p_partkey"], &["l_partkey"], None)?
        .filter(col("l_shipmode").in_list(str_list(&params.ship_modes), false))?
        .filter(col("l_shipinstruct").eq(lit(params.ship_instruct.as_str())))?
        .filter(any_group)?
        .aggregate(vec![], vec![sum(disc_price()).alias("revenue")])?
        .select(vec![
            round2(coalesce(vec![col("revenue"), lit(0.0)])).alias("revenue"),
        ])?)
}
