use datafusion::functions_aggregate::expr_fn::{avg, count, sum};
use datafusion::prelude::{col, lit, DataFrame};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, disc_price, scan};
use crate::params::Q1Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q1Params) -> Result<DataFrame> {
    let lineitem = scan(cache, Table::Lineitem).await?;

    let charge = disc_price() * (lit(1.0) + col("l_tax"));

    Ok(lineitem
        .filter(col("l_shipdate").lt_eq(date_lit(params.delta_date)))?
        .aggregate(
            vec![col("l_returnflag"), col("l_linestatus")],
            vec![
                sum(col("l_quantity")).alias("sum_qty"),
                sum(col("l_extendedprice")).alias("sum_base_price"),
                sum(disc_price()).alias("sum_disc_price"),
                sum(charge).alias("sum_charge"),
                avg(col("l_quantity")).alias("avg_qty"),
                avg(col("l_extendedprice")).alias("avg_price"),
                avg(col("l_discount")).alias("avg_disc"),
                count(lit(1)).alias("count_order"),
            ],
        )?
        .sort(vec![
            col("l_returnflag").sort(true, false),
            col("l_linestatus").sort(true, false),
        ])?)
}
