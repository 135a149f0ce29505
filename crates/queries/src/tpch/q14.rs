use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::logical_expr::when;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, disc_price, round2, scan};
use crate::params::Q14Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q14Params) -> Result<DataFrame> {
    let lineitem = scan(cache, Table::Lineitem).await?;
    let part = scan(cache, Table::Part).await?;

    let promo = when(
        col("p_type").like(lit(format!("{}%", params.type_prefix))),
        disc_price(),
    )
    .otherwise(lit(0.0))?;

    Ok(lineitem
        .join(part, JoinType::Inner, &["l_partkey"], &["p_partkey"], None)?
        .filter(col("l_shipdate").gt_eq(date_lit(params.date_from)))?
        .filter(col("l_shipdate").lt(date_lit(params.date_to)))?
        .aggregate(
            vec![],
            vec![
                sum(promo).alias("promo_volume"),
                sum(disc_price()).alias("total_volume"),
            ],
        )?
        .select(vec![round2(
            lit(100.0) * col("promo_volume") / col("total_volume"),
        )
        .alias("promo_revenue")])?)
}
