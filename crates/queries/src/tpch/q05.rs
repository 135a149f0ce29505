use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, disc_price, scan};
use crate::params::Q5Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q5Params) -> Result<DataFrame> {
    let region = scan(cache, Table::Region).await?;
    let nation = scan(cache, Table::Nation).await?;
    let customer = scan(cache, Table::Customer).await?;
    let orders = scan(cache, Table::Orders).await?;
    let lineitem = scan(cache, Table::Lineitem).await?;
    let supplier = scan(cache, Table::Supplier).await?;

    Ok(region
        .join(nation, JoinType::Inner, &["r_regionkey"], &["n_regionkey"], None)?
        .join(customer, JoinType::Inner, &["n_nationkey"], &["c_nationkey"], None)?
        .join(orders, JoinType::Inner, &["c_custkey"], &["o_custkey"], None)?
        .join(lineitem, JoinType::Inner, &["o_orderkey"], &["l_orderkey"], None)?
        // Supplier and customer share a nation.
        .join(
            supplier,
            JoinType::Inner,
            &["l_suppkey", "n_nationkey"],
            &["s_suppkey", "s_nationkey"],
            None,
        )?
        .filter(col("r_name").eq(lit(params.region.as_str())))?
        .filter(col("o_orderdate").gt_eq(date_lit(params.date_from)))?
        .filter(col("o_orderdate").lt(date_lit(params.date_to)))?
        .aggregate(vec![col("n_name")], vec![sum(disc_price()).alias("revenue")])?
        .sort(vec![col("revenue").sort(false, false)])?)
}
