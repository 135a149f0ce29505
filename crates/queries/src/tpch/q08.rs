use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::logical_expr::when;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, disc_price, round2, scan, year};
use crate::params::Q8Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q8Params) -> Result<DataFrame> {
    let part = scan(cache, Table::Part).await?;
    let supplier = scan(cache, Table::Supplier).await?;
    let lineitem = scan(cache, Table::Lineitem).await?;
    let orders = scan(cache, Table::Orders).await?;
    let customer = scan(cache, Table::Customer).await?;
    let nation = scan(cache, Table::Nation).await?;
    let region = scan(cache, Table::Region).await?;

    // Customer side resolves the region, supplier side names the nation.
    let cust_nation = nation.clone().select(vec![
        col("n_nationkey").alias("cust_nationkey"),
        col("n_regionkey").alias("cust_regionkey"),
    ])?;
    let supp_nation = nation.select(vec![
        col("n_nationkey").alias("supp_nationkey"),
        col("n_name").alias("nation"),
    ])?;

    let brazil_volume = when(col("nation").eq(lit(params.nation.as_str())), col("volume"))
        .otherwise(lit(0.0))?;

    Ok(part
        .join(lineitem, JoinType::Inner, &["p_partkey"], &["l_partkey"], None)?
        .join(supplier, JoinType::Inner, &["l_suppkey"], &["s_suppkey"], None)?
        .join(orders, JoinType::Inner, &["l_orderkey"], &["o_orderkey"], None)?
        .join(customer, JoinType::Inner, &["o_custkey"], &["c_custkey"], None)?
        .join(cust_nation, JoinType::Inner, &["c_nationkey"], &["cust_nationkey"], None)?
        .join(region, JoinType::Inner, &["cust_regionkey"], &["r_regionkey"], None)?
        .filter(col("r_name").eq(lit(params.region.as_str())))?
        .join(supp_nation, JoinType::Inner, &["s_nationkey"], &["supp_nationkey"], None)?
        .filter(
            col("o_orderdate").between(date_lit(params.date_from), date_lit(params.date_to)),
        )?
        .filter(col("p_type").eq(lit(params.part_type.as_str())))?
        .select(vec![
            year(col("o_orderdate")).alias("o_year"),
            disc_price().alias("volume"),
            col("nation"),
        ])?
        .aggregate(
            vec![col("o_year")],
            vec![
                sum(brazil_volume).alias("nation_volume"),
                sum(col("volume")).alias("total_volume"),
            ],
        )?
        .select(vec![
            col("o_year"),
            round2(col("nation_volume") / col("total_volume")).alias("mkt_share"),
        ])?
        .sort(vec![col("o_year").sort(true, false)])?)
}
