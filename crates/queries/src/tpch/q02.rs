use datafusion::functions_aggregate::expr_fn::min;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::{scan, trimmed};
use crate::params::Q2Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q2Params) -> Result<DataFrame> {
    let part = scan(cache, Table::Part).await?;
    let partsupp = scan(cache, Table::Partsupp).await?;
    let supplier = scan(cache, Table::Supplier).await?;
    let nation = scan(cache, Table::Nation).await?;
    let region = scan(cache, Table::Region).await?;

    let candidates = part
        .join(partsupp, JoinType::Inner, &["p_partkey"], &["ps_partkey"], None)?
        .join(supplier, JoinType::Inner, &["ps_suppkey"], &["s_suppkey"], None)?
        .join(nation, JoinType::Inner, &["s_nationkey"], &["n_nationkey"], None)?
        .join(region, JoinType::Inner, &["n_regionkey"], &["r_regionkey"], None)?
        .filter(col("p_size").eq(lit(params.size)))?
        .filter(col("p_type").like(lit(format!("%{}", params.type_suffix))))?
        .filter(col("r_name").eq(lit(params.region.as_str())))?;

    let cheapest = candidates
        .clone()
        .aggregate(
            vec![col("p_partkey")],
            vec![min(col("ps_supplycost")).alias("min_supplycost")],
        )?
        .select(vec![
            col("p_partkey").alias("min_partkey"),
            col("min_supplycost"),
        ])?;

    Ok(candidates
        .join(
            cheapest,
            JoinType::Inner,
            &["p_partkey", "ps_supplycost"],
            &["min_partkey", "min_supplycost"],
            None,
        )?
        .select(vec![
            col("s_acctbal"),
            col("s_name"),
            col("n_name"),
            col("p_partkey"),
            col("p_mfgr"),
            col("s_address"),
            col("s_phone"),
            col("s_comment"),
        ])?
        .sort(vec![
            col("s_acctbal").sort(false, false),
            col("n_name").sort(true, false),
            col("s_name").sort(true, false),
            col("p_partkey").sort(true, false),
        ])?
        .limit(0, Some(100))?
        .select(vec![
            col("s_acctbal"),
            trimmed("s_name"),
            trimmed("n_name"),
            col("p_partkey"),
            trimmed("p_mfgr"),
            trimmed("s_address"),
            trimmed("s_phone"),
            trimmed("s_comment"),
        ])?)
}
