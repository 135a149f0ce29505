use datafusion::functions::expr_fn::coalesce;
use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, scan};
use crate::params::Q6Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q6Params) -> Result<DataFrame> {
    let lineitem = scan(cache, Table::Lineitem).await?;

    Ok(lineitem
        .filter(col("l_shipdate").gt_eq(date_lit(params.date_from)))?
        .filter(col("l_shipdate").lt(date_lit(params.date_to)))?
        .filter(
            col("l_discount").between(lit(params.discount_min), lit(params.discount_max)),
        )?
        .filter(col("l_quantity").lt(lit(params.quantity)))?
        .aggregate(
            vec![],
            vec![sum(col("l_extendedprice") * col("l_discount")).alias("revenue")],
        )?
        // An empty selection sums to 0, not NULL.
        .select(vec![coalesce(vec![col("revenue"), lit(0.0)]).alias("revenue")])?)
}
