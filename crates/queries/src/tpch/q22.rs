use datafusion::functions::expr_fn::substring;
use datafusion::functions_aggregate::expr_fn::{avg, count, sum};
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{round2, scan, str_list};
use crate::params::Q22Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q22Params) -> Result<DataFrame> {
    let orders = scan(cache, Table::Orders).await?;
    let customer = scan(cache, Table::Customer).await?;

    let candidates = customer
        .with_column(
            "cntrycode",
            substring(col("c_phone"), lit(1_i64), lit(2_i64)),
        )?
        .filter(col("cntrycode").in_list(str_list(&params.country_codes), false))?
        .select(vec![col("c_acctbal"), col("c_custkey"), col("cntrycode")])?;

    let average_balance = candidates
        .clone()
        .filter(col("c_acctbal").gt(lit(0.0)))?
        .aggregate(vec![], vec![avg(col("c_acctbal")).alias("avg_acctbal")])?;

    let ordering_customers = orders.select(vec![col("o_custkey")])?.distinct()?;

    Ok(candidates
        .join(
            ordering_customers,
            JoinType::Left,
            &["c_custkey"],
            &["o_custkey"],
            None,
        )?
        .filter(col("o_custkey").is_null())?
        .join_on(
            average_balance,
            JoinType::Inner,
            [col("c_acctbal").gt(col("avg_acctbal"))],
        )?
        .aggregate(
            vec![col("cntrycode")],
            vec![
                count(col("c_acctbal")).alias("numcust"),
                sum(col("c_acctbal")).alias("totacctbal"),
            ],
        )?
        .select(vec![
            col("cntrycode"),
            col("numcust"),
            round2(col("totacctbal")).alias("totacctbal"),
        ])?
        .sort(vec![col("cntrycode").sort(true, false)])?)
}
