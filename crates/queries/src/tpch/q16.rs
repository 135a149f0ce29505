use datafusion::functions_aggregate::expr_fn::count_distinct;
use datafusion::prelude::{col, lit, DataFrame, JoinType};
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::Result;

use crate::exprs::scan;
use crate::params::Q16Params;

pub(crate) async fn build(cache: &DatasetCache, params: &Q16Params) -> Result<DataFrame> {
    let partsupp = scan(cache, Table::Partsupp).await?;
    let part = scan(cache, Table::Part).await?;
    let complaints = scan(cache, Table::Supplier)
        .await?
        .filter(col("s_comment").like(lit("%Customer%Complaints%")))?
        .select(vec![col("s_suppkey").alias("complaint_suppkey")])?;

    let sizes: Vec<_> = params.sizes.iter().map(|s| lit(*s)).collect();

    Ok(part
        .join(partsupp, JoinType::Inner, &["p_partkey"], &["ps_partkey"], None)?
        .filter(col("p_brand").not_eq(lit(params.brand.as_str())))?
        .filter(col("p_type").not_like(lit(format!("{}%", params.type_prefix))))?
        .filter(col("p_size").in_list(sizes, false))?
        .join(
            complaints,
            JoinType::Left,
            &["ps_suppkey"],
            &["complaint_suppkey"],
            None,
        )?
        .filter(col("complaint_suppkey").is_null())?
        .aggregate(
            vec![col("p_brand"), col("p_type"), col("p_size")],
            vec![count_distinct(col("ps_suppkey")).alias("supplier_cnt")],
        )?
        .sort(vec![
            col("supplier_cnt").sort(false, false),
            col("p_brand").sort(true, false),
            col("p_type").sort(true, false),
            col("p_size").sort(true, false),
        ])?)
}
