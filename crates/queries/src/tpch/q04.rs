use datafusion::functions_aggregate::expr_fn::count;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, scan};
use crate::params::Q4Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q4Params) -> Result<DataFrame> {
    let lineitem = scan(cache, Table::Lineitem).await?;
    let orders = scan(cache, Table::Orders).await?;

    Ok(lineitem
        .join(orders, JoinType::Inner, &["l_orderkey"], &["o_orderkey"], None)?
        .filter(col("o_orderdate").gt_eq(date_lit(params.date_from)))?
        .filter(col("o_orderdate").lt(date_lit(params.date_to)))?
        .filter(col("l_commitdate").lt(col("l_receiptdate")))?
        // An order counts once no matter how many of its lines were late.
        .select(vec![col("o_orderpriority"), col("l_orderkey")])?
        .distinct()?
        .aggregate(
            vec![col("o_orderpriority")],
            vec![count(lit(1)).alias("order_count")],
        )?
        .sort(vec![col("o_orderpriority").sort(true, false)])?)
}
