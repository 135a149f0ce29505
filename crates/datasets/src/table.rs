use lakebench_error::{find_closest_match, BenchError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight TPC-H entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Lineitem,
    Orders,
    Customer,
    Part,
    Partsupp,
    Supplier,
    Nation,
    Region,
}

impl Table {
    pub const ALL: [Table; 8] = [
        Table::Lineitem,
        Table::Orders,
        Table::Customer,
        Table::Part,
        Table::Partsupp,
        Table::Supplier,
        Table::Nation,
        Table::Region,
    ];

    /// Directory name under the data root, also the session table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Lineitem => "lineitem",
            Table::Orders => "orders",
            Table::Customer => "customer",
            Table::Part => "part",
            Table::Partsupp => "partsupp",
            Table::Supplier => "supplier",
            Table::Nation => "nation",
            Table::Region => "region",
        }
    }

    pub fn column_prefix(&self) -> &'static str {
        match self {
            Table::Lineitem => "l_",
            Table::Orders => "o_",
            Table::Customer => "c_",
            Table::Part => "p_",
            Table::Partsupp => "ps_",
            Table::Supplier => "s_",
            Table::Nation => "n_",
            Table::Region => "r_",
        }
    }

    /// Columns cast to `Date32` at load time.
    pub fn date_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Lineitem => &["l_shipdate", "l_commitdate", "l_receiptdate"],
            Table::Orders => &["o_orderdate"],
            _ => &[],
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if let Some(table) = Table::ALL.iter().find(|t| t.name() == lowered) {
            return Ok(*table);
        }

        let names: Vec<String> = Table::ALL.iter().map(|t| t.name().to_string()).collect();
        let mut err = BenchError::new(
            ErrorCode::UnknownTable,
            format!("'{s}' is not a TPC-H table"),
        );
        if let Some(closest) = find_closest_match(&lowered, &names) {
            err = err.with_hint(format!("Did you mean '{closest}'?"));
        }
        Err(err)
    }
}
