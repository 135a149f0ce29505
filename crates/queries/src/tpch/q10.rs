use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, disc_price, round2, scan, trimmed};
use crate::params::Q10Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q10Params) -> Result<DataFrame> {
    let customer = scan(cache, Table::Customer).await?;
    let orders = scan(cache, Table::Orders).await?;
    let lineitem = scan(cache, Table::Lineitem).await?;
    let nation = scan(cache, Table::Nation).await?;

    Ok(customer
        .join(orders, JoinType::Inner, &["c_custkey"], &["o_custkey"], None)?
        .join(lineitem, JoinType::Inner, &["o_orderkey"], &["l_orderkey"], None)?
        .join(nation, JoinType::Inner, &["c_nationkey"], &["n_nationkey"], None)?
        .filter(col("o_orderdate").gt_eq(date_lit(params.date_from)))?
        .filter(col("o_orderdate").lt(date_lit(params.date_to)))?
        .filter(col("l_returnflag").eq(lit(params.return_flag.as_str())))?
        .aggregate(
            vec![
                col("c_custkey"),
                col("c_name"),
                col("c_acctbal"),
                col("c_phone"),
                col("n_name"),
                col("c_address"),
                col("c_comment"),
            ],
            vec![sum(disc_price()).alias("revenue")],
        )?
        .select(vec![
            col("c_custkey"),
            col("c_name"),
            round2(col("revenue")).alias("revenue"),
            col("c_acctbal"),
            col("n_name"),
            trimmed("c_address"),
            col("c_phone"),
            trimmed("c_comment"),
        ])?
        .sort(vec![col("revenue").sort(false, false)])?
        .limit(0, Some(20))?)
}
