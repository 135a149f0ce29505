use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::logical_expr::when;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, scan, str_list};
use crate::params::Q12Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q12Params) -> Result<DataFrame> {
    let orders = scan(cache, Table::Orders).await?;
    let lineitem = scan(cache, Table::Lineitem).await?;

    let priority_is_high = |negated| {
        col("o_orderpriority").in_list(str_list(&params.high_priorities), negated)
    };
    let high_line = when(priority_is_high(false), lit(1_i64)).otherwise(lit(0_i64))?;
    let low_line = when(priority_is_high(true), lit(1_i64)).otherwise(lit(0_i64))?;

    Ok(orders
        .join(lineitem, JoinType::Inner, &["o_orderkey"], &["l_orderkey"], None)?
        .filter(col("l_shipmode").in_list(str_list(&params.ship_modes), false))?
        .filter(col("l_commitdate").lt(col("l_receiptdate")))?
        .filter(col("l_shipdate").lt(col("l_commitdate")))?
        .filter(col("l_receiptdate").gt_eq(date_lit(params.date_from)))?
        .filter(col("l_receiptdate").lt(date_lit(params.date_to)))?
        .aggregate(
            vec![col("l_shipmode")],
            vec![
                sum(high_line).alias("high_line_count"),
                sum(low_line).alias("low_line_count"),
            ],
        )?
        .sort(vec![col("l_shipmode").sort(true, false)])?)
}
