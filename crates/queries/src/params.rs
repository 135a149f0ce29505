//! Substitution parameters for the 22 queries.
//!
//! Defaults are the TPC-H validation values. Every struct deserializes with
//! `#[serde(default)]`, so a config file only names what it overrides:
//!
//! ```yaml
//! params:
//!   q1:
//!     delta_date: 1998-12-01
//!   q11:
//!     nation: FRANCE
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub q1: Q1Params,
    pub q2: Q2Params,
    pub q3: Q3Params,
    pub q4: Q4Params,
    pub q5: Q5Params,
    pub q6: Q6Params,
    pub q7: Q7Params,
    pub q8: Q8Params,
    pub q9: Q9Params,
    pub q10: Q10Params,
    pub q11: Q11Params,
    pub q12: Q12Params,
    pub q13: Q13Params,
    pub q14: Q14Params,
    pub q15: Q15Params,
    pub q16: Q16Params,
    pub q17: Q17Params,
    pub q18: Q18Params,
    pub q19: Q19Params,
    pub q20: Q20Params,
    pub q21: Q21Params,
    pub q22: Q22Params,
}

/// Pricing summary report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q1Params {
    /// Inclusive upper bound on `l_shipdate`.
    pub delta_date: NaiveDate,
}

impl Default for Q1Params {
    fn default() -> Self {
        Self {
            delta_date: ymd(1998, 9, 2),
        }
    }
}

/// Minimum cost supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q2Params {
    pub size: i64,
    pub type_suffix: String,
    pub region: String,
}

impl Default for Q2Params {
    fn default() -> Self {
        Self {
            size: 15,
            type_suffix: "BRASS".into(),
            region: "EUROPE".into(),
        }
    }
}

/// Shipping priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q3Params {
    pub segment: String,
    /// Orders placed before and shipped after this date.
    pub date: NaiveDate,
}

impl Default for Q3Params {
    fn default() -> Self {
        Self {
            segment: "BUILDING".into(),
            date: ymd(1995, 3, 15),
        }
    }
}

/// Order priority checking. `[date_from, date_to)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q4Params {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl Default for Q4Params {
    fn default() -> Self {
        Self {
            date_from: ymd(1993, 7, 1),
            date_to: ymd(1993, 10, 1),
        }
    }
}

/// Local supplier volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q5Params {
    pub region: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl Default for Q5Params {
    fn default() -> Self {
        Self {
            region: "ASIA".into(),
            date_from: ymd(1994, 1, 1),
            date_to: ymd(1995, 1, 1),
        }
    }
}

/// Forecasting revenue change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q6Params {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub discount_min: f64,
    pub discount_max: f64,
    /// Exclusive upper bound on `l_quantity`.
    pub quantity: f64,
}

impl Default for Q6Params {
    fn default() -> Self {
        Self {
            date_from: ymd(1994, 1, 1),
            date_to: ymd(1995, 1, 1),
            discount_min: 0.05,
            discount_max: 0.07,
            quantity: 24.0,
        }
    }
}

/// Volume shipping between two nations, in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q7Params {
    pub nation1: String,
    pub nation2: String,
    /// Inclusive shipdate range.
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl Default for Q7Params {
    fn default() -> Self {
        Self {
            nation1: "FRANCE".into(),
            nation2: "GERMANY".into(),
            date_from: ymd(1995, 1, 1),
            date_to: ymd(1996, 12, 31),
        }
    }
}

/// National market share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q8Params {
    pub nation: String,
    pub region: String,
    pub part_type: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl Default for Q8Params {
    fn default() -> Self {
        Self {
            nation: "BRAZIL".into(),
            region: "AMERICA".into(),
            part_type: "ECONOMY ANODIZED STEEL".into(),
            date_from: ymd(1995, 1, 1),
            date_to: ymd(1996, 12, 31),
        }
    }
}

/// Product type profit measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q9Params {
    /// Substring of `p_name`.
    pub color: String,
}

impl Default for Q9Params {
    fn default() -> Self {
        Self {
            color: "green".into(),
        }
    }
}

/// Returned item reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q10Params {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub return_flag: String,
}

impl Default for Q10Params {
    fn default() -> Self {
        Self {
            date_from: ymd(1993, 10, 1),
            date_to: ymd(1994, 1, 1),
            return_flag: "R".into(),
        }
    }
}

/// Important stock identification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q11Params {
    pub nation: String,
    /// Share of the national stock value a part must exceed.
    pub fraction: f64,
}

impl Default for Q11Params {
    fn default() -> Self {
        Self {
            nation: "GERMANY".into(),
            fraction: 0.0001,
        }
    }
}

/// Shipping modes and order priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q12Params {
    pub ship_modes: Vec<String>,
    /// Priorities counted as high; everything else is low.
    pub high_priorities: Vec<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl Default for Q12Params {
    fn default() -> Self {
        Self {
            ship_modes: strings(&["MAIL", "SHIP"]),
            high_priorities: strings(&["1-URGENT", "2-HIGH"]),
            date_from: ymd(1994, 1, 1),
            date_to: ymd(1995, 1, 1),
        }
    }
}

/// Customer distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q13Params {
    /// Orders whose comment matches `%word1%word2%` are ignored.
    pub word1: String,
    pub word2: String,
}

impl Default for Q13Params {
    fn default() -> Self {
        Self {
            word1: "special".into(),
            word2: "requests".into(),
        }
    }
}

/// Promotion effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q14Params {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub type_prefix: String,
}

impl Default for Q14Params {
    fn default() -> Self {
        Self {
            date_from: ymd(1995, 9, 1),
            date_to: ymd(1995, 10, 1),
            type_prefix: "PROMO".into(),
        }
    }
}

/// Top supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q15Params {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl Default for Q15Params {
    fn default() -> Self {
        Self {
            date_from: ymd(1996, 1, 1),
            date_to: ymd(1996, 4, 1),
        }
    }
}

/// Parts/supplier relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q16Params {
    pub brand: String,
    pub type_prefix: String,
    pub sizes: Vec<i64>,
}

impl Default for Q16Params {
    fn default() -> Self {
        Self {
            brand: "Brand#45".into(),
            type_prefix: "MEDIUM POLISHED".into(),
            sizes: vec![49, 14, 23, 45, 19, 3, 36, 9],
        }
    }
}

/// Small-quantity-order revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q17Params {
    pub brand: String,
    pub container: String,
    /// Lines below this fraction of the part's average quantity count.
    pub quantity_factor: f64,
}

impl Default for Q17Params {
    fn default() -> Self {
        Self {
            brand: "Brand#23".into(),
            container: "MED BOX".into(),
            quantity_factor: 0.2,
        }
    }
}

/// Large volume customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q18Params {
    /// Exclusive lower bound on the order's total quantity.
    pub quantity: f64,
}

impl Default for Q18Params {
    fn default() -> Self {
        Self { quantity: 300.0 }
    }
}

/// One disjunct of Q19: a brand with its containers, quantity and size window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Q19Group {
    pub brand: String,
    pub containers: Vec<String>,
    pub quantity_min: f64,
    pub quantity_max: f64,
    pub size_max: i64,
}

/// Discounted revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q19Params {
    pub ship_modes: Vec<String>,
    pub ship_instruct: String,
    pub groups: Vec<Q19Group>,
}

impl Default for Q19Params {
    fn default() -> Self {
        let group = |brand: &str, containers: &[&str], quantity_min: f64, size_max: i64| Q19Group {
            brand: brand.into(),
            containers: strings(containers),
            quantity_min,
            quantity_max: quantity_min + 10.0,
            size_max,
        };
        Self {
            ship_modes: strings(&["AIR", "AIR REG"]),
            ship_instruct: "DELIVER IN PERSON".into(),
            groups: vec![
                group("Brand#12", &["SM CASE", "SM BOX", "SM PACK", "SM PKG"], 1.0, 5),
                group("Brand#23", &["MED BAG", "MED BOX", "MED PKG", "MED PACK"], 10.0, 10),
                group("Brand#34", &["LG CASE", "LG BOX", "LG PACK", "LG PKG"], 20.0, 15),
            ],
        }
    }
}

/// Potential part promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q20Params {
    pub name_prefix: String,
    pub nation: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// Stock must exceed this fraction of the quantity shipped.
    pub quantity_factor: f64,
}

impl Default for Q20Params {
    fn default() -> Self {
        Self {
            name_prefix: "forest".into(),
            nation: "CANADA".into(),
            date_from: ymd(1994, 1, 1),
            date_to: ymd(1995, 1, 1),
            quantity_factor: 0.5,
        }
    }
}

/// Suppliers who kept orders waiting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q21Params {
    pub nation: String,
    pub order_status: String,
}

impl Default for Q21Params {
    fn default() -> Self {
        Self {
            nation: "SAUDI ARABIA".into(),
            order_status: "F".into(),
        }
    }
}

/// Global sales opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Q22Params {
    /// Two-character phone prefixes.
    pub country_codes: Vec<String>,
}

impl Default for Q22Params {
    fn default() -> Self {
        Self {
            country_codes: strings(&["13", "31", "23", "29", "30", "18", "17"]),
        }
    }
}
