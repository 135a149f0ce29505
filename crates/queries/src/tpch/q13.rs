use datafusion::functions_aggregate::expr_fn::count;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::scan;
use crate::params::Q13Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q13Params) -> Result<DataFrame> {
    let customer = scan(cache, Table::Customer).await?;
    let orders = scan(cache, Table::Orders).await?.filter(
        col("o_comment").not_like(lit(format!("%{}%{}%", params.word1, params.word2))),
    )?;

    // Customers without orders survive the left join with a null order key,
    // which `count` skips, so they land in the c_count = 0 bucket.
    Ok(customer
        .join(orders, JoinType::Left, &["c_custkey"], &["o_custkey"], None)?
        .aggregate(
            vec![col("c_custkey")],
            vec![count(col("o_orderkey")).alias("c_count")],
        )?
        .aggregate(vec![col("c_count")], vec![count(lit(1)).alias("custdist")])?
        .sort(vec![
            col("custdist").sort(false, false),
            col("c_count").sort(false, false),
        ])?)
}
