use datafusion::prelude::DataFrame;
use lakebench_datasets::{DatasetCache, Table};
use lakebench_error::{BenchError, ErrorCode, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::params::QueryParams;
use crate::tpch;

use Table::{
    Customer as C, Lineitem as L, Nation as N, Orders as O, Part as P, Partsupp as PS, Region as R,
    Supplier as S,
};

/// One of the 22 TPC-H queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Query {
    Q1 = 1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
    Q9,
    Q10,
    Q11,
    Q12,
    Q13,
    Q14,
    Q15,
    Q16,
    Q17,
    Q18,
    Q19,
    Q20,
    Q21,
    Q22,
}

impl Query {
    pub const ALL: [Query; 22] = [
        Query::Q1,
        Query::Q2,
        Query::Q3,
        Query::Q4,
        Query::Q5,
        Query::Q6,
        Query::Q7,
        Query::Q8,
        Query::Q9,
        Query::Q10,
        Query::Q11,
        Query::Q12,
        Query::Q13,
        Query::Q14,
        Query::Q15,
        Query::Q16,
        Query::Q17,
        Query::Q18,
        Query::Q19,
        Query::Q20,
        Query::Q21,
        Query::Q22,
    ];

    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Tables the pipeline reads. Preloading these is enough to build and
    /// run the query without further I/O in memory mode.
    pub fn dependencies(&self) -> &'static [Table] {
        match self {
            Query::Q1 => &[L],
            Query::Q2 => &[P, PS, S, N, R],
            Query::Q3 => &[L, O, C],
            Query::Q4 => &[L, O],
            Query::Q5 => &[L, O, C, N, R, S],
            Query::Q6 => &[L],
            Query::Q7 => &[L, S, O, C, N],
            Query::Q8 => &[P, L, S, O, C, N, R],
            Query::Q9 => &[L, O, P, N, PS, S],
            Query::Q10 => &[L, O, N, C],
            Query::Q11 => &[PS, S, N],
            Query::Q12 => &[L, O],
            Query::Q13 => &[C, O],
            Query::Q14 => &[L, P],
            Query::Q15 => &[L, S],
            Query::Q16 => &[P, PS, S],
            Query::Q17 => &[L, P],
            Query::Q18 => &[L, O, C],
            Query::Q19 => &[L, P],
            Query::Q20 => &[L, P, N, PS, S],
            Query::Q21 => &[L, O, S, N],
            Query::Q22 => &[C, O],
        }
    }

    /// Compose the query's pipeline over the cached tables. Nothing is
    /// materialized; call `collect()` on the result to execute it.
    pub async fn build(&self, cache: &DatasetCache, params: &QueryParams) -> Result<DataFrame> {
        match self {
            Query::Q1 => tpch::q01::build(cache, &params.q1).await,
            Query::Q2 => tpch::q02::build(cache, &params.q2).await,
            Query::Q3 => tpch::q03::build(cache, &params.q3).await,
            Query::Q4 => tpch::q04::build(cache, &params.q4).await,
            Query::Q5 => tpch::q05::build(cache, &params.q5).await,
            Query::Q6 => tpch::q06::build(cache, &params.q6).await,
            Query::Q7 => tpch::q07::build(cache, &params.q7).await,
            Query::Q8 => tpch::q08::build(cache, &params.q8).await,
            Query::Q9 => tpch::q09::build(cache, &params.q9).await,
            Query::Q10 => tpch::q10::build(cache, &params.q10).await,
            Query::Q11 => tpch::q11::build(cache, &params.q11).await,
            Query::Q12 => tpch::q12::build(cache, &params.q12).await,
            Query::Q13 => tpch::q13::build(cache, &params.q13).await,
            Query::Q14 => tpch::q14::build(cache, &params.q14).await,
            Query::Q15 => tpch::q15::build(cache, &params.q15).await,
            Query::Q16 => tpch::q16::build(cache, &params.q16).await,
            Query::Q17 => tpch::q17::build(cache, &params.q17).await,
            Query::Q18 => tpch::q18::build(cache, &params.q18).await,
            Query::Q19 => tpch::q19::build(cache, &params.q19).await,
            Query::Q20 => tpch::q20::build(cache, &params.q20).await,
            Query::Q21 => tpch::q21::build(cache, &params.q21).await,
            Query::Q22 => tpch::q22::build(cache, &params.q22).await,
        }
    }
}

impl TryFrom<u8> for Query {
    type Error = BenchError;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            1..=22 => Ok(Query::ALL[usize::from(id) - 1]),
            _ => Err(BenchError::new(
                ErrorCode::UnknownQuery,
                format!("Unknown query id {id}"),
            )
            .with_hint("TPC-H query ids run from 1 to 22")),
        }
    }
}

impl From<Query> for u8 {
    fn from(query: Query) -> Self {
        query.id()
    }
}

impl FromStr for Query {
    type Err = BenchError;

    /// Accepts `7`, `q7` or `Q07`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('q')
            .or_else(|| trimmed.strip_prefix('Q'))
            .unwrap_or(trimmed);
        let id: u8 = digits.parse().map_err(|_| {
            BenchError::new(ErrorCode::UnknownQuery, format!("Invalid query id '{s}'"))
                .with_hint("TPC-H query ids run from 1 to 22")
        })?;
        Query::try_from(id)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.id())
    }
}
