use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{date_lit, disc_price, scan, year};
use crate::params::Q7Params;

/// Nation read twice, once per side of the shipment, under distinct names.
fn nation_as(nation: &DataFrame, name: &str, side: &str) -> Result<DataFrame> {
    Ok(nation
        .clone()
        .filter(col("n_name").eq(lit(name)))?
        .select(vec![
            col("n_nationkey").alias(format!("{side}_nationkey")),
            col("n_name").alias(format!("{side}_nation")),
        ])?)
}

pub(crate) async fn build(cache: &DatasetCache, params: &Q7Params) -> Result<DataFrame> {
    let nation = scan(cache, Table::Nation).await?;
    let customer = scan(cache, Table::Customer).await?;
    let orders = scan(cache, Table::Orders).await?;
    let lineitem = scan(cache, Table::Lineitem).await?;
    let supplier = scan(cache, Table::Supplier).await?;

    let shipments = |supp_nation: &str, cust_nation: &str| -> Result<DataFrame> {
        Ok(customer
            .clone()
            .join(
                nation_as(&nation, cust_nation, "cust")?,
                JoinType::Inner,
                &["c_nationkey"],
                &["cust_nationkey"],
                None,
            )?
            .join(orders.clone(), JoinType::Inner, &["c_custkey"], &["o_custkey"], None)?
            .join(lineitem.clone(), JoinType::Inner, &["o_orderkey"], &["l_orderkey"], None)?
            .join(supplier.clone(), JoinType::Inner, &["l_suppkey"], &["s_suppkey"], None)?
            .join(
                nation_as(&nation, supp_nation, "supp")?,
                JoinType::Inner,
                &["s_nationkey"],
                &["supp_nationkey"],
                None,
            )?
            .select(vec![
                col("supp_nation"),
                col("cust_nation"),
                col("l_shipdate"),
                col("l_extendedprice"),
                col("l_discount"),
            ])?)
    };

    let forward = shipments(&params.nation1, &params.nation2)?;
    let backward = shipments(&params.nation2, &params.nation1)?;

    Ok(forward
        .union(backward)?
        .filter(
            col("l_shipdate").between(date_lit(params.date_from), date_lit(params.date_to)),
        )?
        .select(vec![
            col("supp_nation"),
            col("cust_nation"),
            year(col("l_shipdate")).alias("l_year"),
            disc_price().alias("volume"),
        ])?
        .aggregate(
            vec![col("supp_nation"), col("cust_nation"), col("l_year")],
            vec![sum(col("volume")).alias("revenue")],
        )?
        .sort(vec![
            col("supp_nation").sort(true, false),
            col("cust_nation").sort(true, false),
            col("l_year").sort(true, false),
        ])?)
}
