//! Fixtures for the query pipeline tests: a deterministic miniature TPC-H
//! dataset and helpers for reading result columns.
#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::compute::{cast, concat_batches};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use datafusion::prelude::{SessionConfig, SessionContext};
use lakebench_datasets::{DatasetCache, MemoryLoader, StorageOptions, Table};

pub fn ints(values: impl IntoIterator<Item = i64>) -> ArrayRef {
    Arc::new(Int64Array::from_iter_values(values))
}

pub fn floats(values: impl IntoIterator<Item = f64>) -> ArrayRef {
    Arc::new(Float64Array::from_iter_values(values))
}

pub fn strs<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values))
}

pub fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    RecordBatch::try_from_iter(columns).expect("fixture batch")
}

fn day(base: NaiveDate, offset: i64) -> String {
    (base + Duration::days(offset)).format("%Y-%m-%d").to_string()
}

fn date(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).expect("fixture date")
}

const REGIONS: [&str; 5] = ["AFRICA", "AMERICA", "ASIA", "EUROPE", "MIDDLE EAST"];

const NATIONS: [(&str, i64); 25] = [
    ("ALGERIA", 0),
    ("ARGENTINA", 1),
    ("BRAZIL", 1),
    ("CANADA", 1),
    ("EGYPT", 4),
    ("ETHIOPIA", 0),
    ("FRANCE", 3),
    ("GERMANY", 3),
    ("INDIA", 2),
    ("INDONESIA", 2),
    ("IRAN", 4),
    ("IRAQ", 4),
    ("JAPAN", 2),
    ("JORDAN", 4),
    ("KENYA", 0),
    ("MOROCCO", 0),
    ("MOZAMBIQUE", 0),
    ("PERU", 1),
    ("CHINA", 2),
    ("ROMANIA", 3),
    ("SAUDI ARABIA", 4),
    ("VIETNAM", 2),
    ("RUSSIA", 3),
    ("UNITED KINGDOM", 3),
    ("UNITED STATES", 1),
];

pub fn region() -> RecordBatch {
    batch(vec![
        ("r_regionkey", ints(0..5)),
        ("r_name", strs(REGIONS)),
        ("r_comment", strs(REGIONS.iter().map(|r| format!("{r} region")))),
    ])
}

pub fn nation() -> RecordBatch {
    batch(vec![
        ("n_nationkey", ints(0..25)),
        ("n_name", strs(NATIONS.iter().map(|(n, _)| *n))),
        ("n_regionkey", ints(NATIONS.iter().map(|(_, r)| *r))),
        ("n_comment", strs(NATIONS.iter().map(|(n, _)| format!("{n} nation")))),
    ])
}

const SUPPLIER_NATIONS: [i64; 10] = [6, 7, 20, 3, 8, 2, 6, 7, 20, 19];

pub fn supplier() -> RecordBatch {
    let keys = 1..=10_i64;
    batch(vec![
        ("s_suppkey", ints(keys.clone())),
        ("s_name", strs(keys.clone().map(|k| format!("Supplier#{k:09}")))),
        ("s_address", strs(keys.clone().map(|k| format!("  {k} Supply Lane ")))),
        ("s_nationkey", ints(SUPPLIER_NATIONS)),
        ("s_phone", strs(keys.clone().map(|k| format!("{}-100-{k:04}", 10 + k)))),
        ("s_acctbal", floats(keys.clone().map(|k| 1000.0 + 250.0 * k as f64))),
        (
            "s_comment",
            strs(keys.map(|k| {
                if k == 5 {
                    "slyly Customer regular Complaints".to_string()
                } else {
                    format!("regular deposits {k}")
                }
            })),
        ),
    ])
}

const CUSTOMER_NATIONS: [i64; 12] = [6, 7, 8, 2, 20, 3, 6, 7, 12, 2, 18, 3];
const PHONE_CODES: [&str; 6] = ["13", "31", "23", "29", "30", "10"];

pub fn customer() -> RecordBatch {
    let keys = 1..=12_i64;
    batch(vec![
        ("c_custkey", ints(keys.clone())),
        ("c_name", strs(keys.clone().map(|k| format!("Customer#{k:09}")))),
        ("c_address", strs(keys.clone().map(|k| format!(" {k} Market St  ")))),
        ("c_nationkey", ints(CUSTOMER_NATIONS)),
        (
            "c_phone",
            strs(keys.clone().map(|k| {
                format!("{}-555-{k:04}", PHONE_CODES[(k as usize) % PHONE_CODES.len()])
            })),
        ),
        ("c_acctbal", floats(keys.clone().map(|k| 500.0 * k as f64 - 1500.0))),
        (
            "c_mktsegment",
            strs(keys.clone().map(|k| if k % 2 == 0 { "BUILDING" } else { "AUTOMOBILE" })),
        ),
        ("c_comment", strs(keys.map(|k| format!(" customer {k} ")))),
    ])
}

const PART_TYPES: [&str; 5] = [
    "ECONOMY ANODIZED STEEL",
    "PROMO BRUSHED BRASS",
    "STANDARD POLISHED BRASS",
    "MEDIUM POLISHED TIN",
    "LARGE PLATED COPPER",
];
const PART_SIZES: [i64; 6] = [15, 1, 5, 49, 14, 3];
const CONTAINERS: [&str; 5] = ["SM BOX", "MED BOX", "LG CASE", "MED BAG", "SM PKG"];
const BRANDS: [i64; 4] = [12, 23, 34, 45];
const PART_COUNT: i64 = 20;

pub fn part() -> RecordBatch {
    let keys = 1..=PART_COUNT;
    let pick = |k: i64, n: usize| (k as usize) % n;
    batch(vec![
        ("p_partkey", ints(keys.clone())),
        (
            "p_name",
            strs(keys.clone().map(|k| match k % 4 {
                0 => format!("forest green part {k}"),
                1 => format!("green lavender part {k}"),
                2 => format!("forest blush part {k}"),
                _ => format!("ivory part {k}"),
            })),
        ),
        ("p_mfgr", strs(keys.clone().map(|k| format!("Manufacturer#{} ", k % 5 + 1)))),
        ("p_brand", strs(keys.clone().map(|k| format!("Brand#{}", BRANDS[pick(k, 4)])))),
        ("p_type", strs(keys.clone().map(|k| PART_TYPES[pick(k, 5)]))),
        ("p_size", ints(keys.clone().map(|k| PART_SIZES[pick(k, 6)]))),
        ("p_container", strs(keys.clone().map(|k| CONTAINERS[pick(k, 5)]))),
        ("p_retailprice", floats(keys.clone().map(|k| 900.0 + k as f64))),
        ("p_comment", strs(keys.map(|k| format!("part comment {k}")))),
    ])
}

/// Two suppliers per part.
fn part_suppliers(partkey: i64) -> [i64; 2] {
    [partkey % 10 + 1, (partkey + 3) % 10 + 1]
}

pub fn partsupp() -> RecordBatch {
    let rows: Vec<(i64, i64)> = (1..=PART_COUNT)
        .flat_map(|p| part_suppliers(p).map(|s| (p, s)))
        .collect();
    batch(vec![
        ("ps_partkey", ints(rows.iter().map(|(p, _)| *p))),
        ("ps_suppkey", ints(rows.iter().map(|(_, s)| *s))),
        ("ps_availqty", ints(rows.iter().map(|(p, s)| 40 + (p * 13 + s * 7) % 90))),
        ("ps_supplycost", floats(rows.iter().map(|(p, s)| 10.0 + ((p + s) % 17) as f64))),
        ("ps_comment", strs(rows.iter().map(|(p, s)| format!("ps {p}-{s}")))),
    ])
}

const ORDER_COUNT: i64 = 40;
const PRIORITIES: [&str; 5] = ["1-URGENT", "2-HIGH", "3-MEDIUM", "4-NOT SPECIFIED", "5-LOW"];

fn order_date(orderkey: i64) -> i64 {
    // 1993-01-15 onwards, roughly every two months.
    orderkey * 53
}

pub fn orders() -> RecordBatch {
    let base = date(1993, 1, 15);
    let keys = 1..=ORDER_COUNT;
    batch(vec![
        ("o_orderkey", ints(keys.clone())),
        // Customers 11 and 12 never order.
        ("o_custkey", ints(keys.clone().map(|k| k % 10 + 1))),
        ("o_orderstatus", strs(keys.clone().map(|k| ["F", "O", "P"][(k % 3) as usize]))),
        ("o_totalprice", floats(keys.clone().map(|k| 10_000.0 + 37.5 * k as f64))),
        ("o_orderdate", strs(keys.clone().map(|k| day(base, order_date(k))))),
        ("o_orderpriority", strs(keys.clone().map(|k| PRIORITIES[(k % 5) as usize]))),
        ("o_clerk", strs(keys.clone().map(|k| format!("Clerk#{:09}", k % 4)))),
        ("o_shippriority", ints(keys.clone().map(|_| 0))),
        (
            "o_comment",
            strs(keys.map(|k| {
                if k % 7 == 0 {
                    "carefully special packages requests".to_string()
                } else {
                    format!("order {k}")
                }
            })),
        ),
    ])
}

const SHIP_MODES: [&str; 6] = ["MAIL", "SHIP", "AIR", "AIR REG", "TRUCK", "RAIL"];
const INSTRUCTIONS: [&str; 3] = ["DELIVER IN PERSON", "NONE", "TAKE BACK RETURN"];

pub fn lineitem() -> RecordBatch {
    let base = date(1993, 1, 15);
    struct Line {
        orderkey: i64,
        partkey: i64,
        suppkey: i64,
        linenumber: i64,
        quantity: f64,
        price: f64,
        discount: f64,
        tax: f64,
        ship: i64,
        commit: i64,
        receipt: i64,
        index: usize,
    }

    let mut lines = Vec::new();
    for o in 1..=ORDER_COUNT {
        for i in 0..3_i64 {
            let partkey = (o * 3 + i) % PART_COUNT + 1;
            let suppkey = part_suppliers(partkey)[(i % 2) as usize];
            let quantity = ((o * 7 + i * 5) % 50 + 1) as f64;
            let ordered = order_date(o);
            let ship = ordered + 5 + i * 10;
            lines.push(Line {
                orderkey: o,
                partkey,
                suppkey,
                linenumber: i + 1,
                quantity,
                price: quantity * (100.0 + partkey as f64),
                discount: ((o + i) % 11) as f64 / 100.0,
                tax: ((o + 2 * i) % 9) as f64 / 100.0,
                ship,
                commit: ordered + 20,
                receipt: ship + (o + i) % 25,
                index: (o * 3 + i) as usize,
            });
        }
    }

    batch(vec![
        ("l_orderkey", ints(lines.iter().map(|l| l.orderkey))),
        ("l_partkey", ints(lines.iter().map(|l| l.partkey))),
        ("l_suppkey", ints(lines.iter().map(|l| l.suppkey))),
        ("l_linenumber", ints(lines.iter().map(|l| l.linenumber))),
        ("l_quantity", floats(lines.iter().map(|l| l.quantity))),
        ("l_extendedprice", floats(lines.iter().map(|l| l.price))),
        ("l_discount", floats(lines.iter().map(|l| l.discount))),
        ("l_tax", floats(lines.iter().map(|l| l.tax))),
        ("l_returnflag", strs(lines.iter().map(|l| ["R", "A", "N"][l.index % 3]))),
        ("l_linestatus", strs(lines.iter().map(|l| ["O", "F"][l.index % 2]))),
        ("l_shipdate", strs(lines.iter().map(|l| day(base, l.ship)))),
        ("l_commitdate", strs(lines.iter().map(|l| day(base, l.commit)))),
        ("l_receiptdate", strs(lines.iter().map(|l| day(base, l.receipt)))),
        ("l_shipinstruct", strs(lines.iter().map(|l| INSTRUCTIONS[l.index % 3]))),
        ("l_shipmode", strs(lines.iter().map(|l| SHIP_MODES[l.index % 6]))),
        ("l_comment", strs(lines.iter().map(|l| format!("line {}", l.index)))),
    ])
}

/// Rows appended to the generated tables so that every query's default
/// parameters select something.
///
/// - Order 41 (INDIA customer, 1994): an INDIA supplier line for Q5, a Q6
///   discount line that also matches Q19's first group, a `forest` part
///   shipped by a CANADA supplier for Q20, and a SAUDI ARABIA supplier
///   that alone delivers late for Q21.
/// - Order 42 (BUILDING, ordered before and shipped after 1995-03-15): 330
///   units in total for Q3 and Q18.
/// - Order 43 (ARGENTINA customer, 1995): a BRAZIL supplier line of
///   ECONOMY ANODIZED STEEL for Q8.
pub mod anchors {
    use super::*;

    pub const PART: i64 = 21;

    pub fn supplier() -> RecordBatch {
        let rows = [(11_i64, 3_i64), (12, 2), (13, 8), (14, 20)];
        batch(vec![
            ("s_suppkey", ints(rows.map(|(k, _)| k))),
            ("s_name", strs(rows.map(|(k, _)| format!("Supplier#{k:09}")))),
            ("s_address", strs(rows.map(|(k, _)| format!("  {k} Supply Lane ")))),
            ("s_nationkey", ints(rows.map(|(_, n)| n))),
            ("s_phone", strs(rows.map(|(k, _)| format!("{}-100-{k:04}", 10 + k)))),
            ("s_acctbal", floats(rows.map(|(k, _)| 100.0 * k as f64))),
            ("s_comment", strs(rows.map(|(k, _)| format!("anchor supplier {k}")))),
        ])
    }

    pub fn customer() -> RecordBatch {
        batch(vec![
            ("c_custkey", ints([13, 14])),
            ("c_name", strs(["Customer#000000013", "Customer#000000014"])),
            ("c_address", strs([" 13 Market St  ", " 14 Market St  "])),
            ("c_nationkey", ints([8, 1])),
            ("c_phone", strs(["11-555-0013", "11-555-0014"])),
            ("c_acctbal", floats([700.0, 800.0])),
            ("c_mktsegment", strs(["BUILDING", "MACHINERY"])),
            ("c_comment", strs([" customer 13 ", " customer 14 "])),
        ])
    }

    pub fn part() -> RecordBatch {
        batch(vec![
            ("p_partkey", ints([PART])),
            ("p_name", strs(["forest anchor part 21"])),
            ("p_mfgr", strs(["Manufacturer#2 "])),
            ("p_brand", strs(["Brand#12"])),
            ("p_type", strs(["ECONOMY ANODIZED STEEL"])),
            ("p_size", ints([3])),
            ("p_container", strs(["SM BOX"])),
            ("p_retailprice", floats([921.0])),
            ("p_comment", strs(["anchor part"])),
        ])
    }

    pub fn partsupp() -> RecordBatch {
        batch(vec![
            ("ps_partkey", ints([PART, PART, PART])),
            ("ps_suppkey", ints([11, 12, 13])),
            ("ps_availqty", ints([500, 100, 100])),
            ("ps_supplycost", floats([20.0, 25.0, 30.0])),
            ("ps_comment", strs(["ps 21-11", "ps 21-12", "ps 21-13"])),
        ])
    }

    pub fn orders() -> RecordBatch {
        batch(vec![
            ("o_orderkey", ints([41, 42, 43])),
            ("o_custkey", ints([13, 13, 14])),
            ("o_orderstatus", strs(["F", "O", "O"])),
            ("o_totalprice", floats([3100.0, 33_000.0, 5000.0])),
            ("o_orderdate", strs(["1994-06-01", "1995-03-01", "1995-07-01"])),
            ("o_orderpriority", strs(["1-URGENT", "3-MEDIUM", "5-LOW"])),
            ("o_clerk", strs(["Clerk#000000001"; 3])),
            ("o_shippriority", ints([0, 0, 0])),
            ("o_comment", strs(["anchor order 41", "anchor order 42", "anchor order 43"])),
        ])
    }

    struct Line {
        order: i64,
        supp: i64,
        number: i64,
        quantity: f64,
        price: f64,
        discount: f64,
        ship: &'static str,
        commit: &'static str,
        receipt: &'static str,
        instruct: &'static str,
        mode: &'static str,
    }

    const LINES: [Line; 7] = [
        Line {
            order: 41,
            supp: 13,
            number: 1,
            quantity: 10.0,
            price: 1000.0,
            discount: 0.06,
            ship: "1994-06-10",
            commit: "1994-06-20",
            receipt: "1994-06-15",
            instruct: "DELIVER IN PERSON",
            mode: "AIR",
        },
        Line {
            order: 41,
            supp: 11,
            number: 2,
            quantity: 20.0,
            price: 2000.0,
            discount: 0.0,
            ship: "1994-06-12",
            commit: "1994-06-20",
            receipt: "1994-06-18",
            instruct: "NONE",
            mode: "TRUCK",
        },
        Line {
            order: 41,
            supp: 14,
            number: 3,
            quantity: 1.0,
            price: 100.0,
            discount: 0.0,
            ship: "1994-06-12",
            commit: "1994-06-14",
            receipt: "1994-06-25",
            instruct: "NONE",
            mode: "TRUCK",
        },
        Line {
            order: 42,
            supp: 11,
            number: 1,
            quantity: 120.0,
            price: 12_000.0,
            discount: 0.0,
            ship: "1995-03-20",
            commit: "1995-03-25",
            receipt: "1995-03-22",
            instruct: "NONE",
            mode: "RAIL",
        },
        Line {
            order: 42,
            supp: 12,
            number: 2,
            quantity: 110.0,
            price: 11_000.0,
            discount: 0.0,
            ship: "1995-03-20",
            commit: "1995-03-25",
            receipt: "1995-03-22",
            instruct: "NONE",
            mode: "RAIL",
        },
        Line {
            order: 42,
            supp: 13,
            number: 3,
            quantity: 100.0,
            price: 10_000.0,
            discount: 0.0,
            ship: "1995-03-20",
            commit: "1995-03-25",
            receipt: "1995-03-22",
            instruct: "NONE",
            mode: "RAIL",
        },
        Line {
            order: 43,
            supp: 12,
            number: 1,
            quantity: 5.0,
            price: 5000.0,
            discount: 0.0,
            ship: "1995-07-10",
            commit: "1995-07-20",
            receipt: "1995-07-15",
            instruct: "NONE",
            mode: "MAIL",
        },
    ];

    pub fn lineitem() -> RecordBatch {
        batch(vec![
            ("l_orderkey", ints(LINES.iter().map(|l| l.order))),
            ("l_partkey", ints(LINES.iter().map(|_| PART))),
            ("l_suppkey", ints(LINES.iter().map(|l| l.supp))),
            ("l_linenumber", ints(LINES.iter().map(|l| l.number))),
            ("l_quantity", floats(LINES.iter().map(|l| l.quantity))),
            ("l_extendedprice", floats(LINES.iter().map(|l| l.price))),
            ("l_discount", floats(LINES.iter().map(|l| l.discount))),
            ("l_tax", floats(LINES.iter().map(|_| 0.02))),
            ("l_returnflag", strs(LINES.iter().map(|_| "N"))),
            ("l_linestatus", strs(LINES.iter().map(|_| "F"))),
            ("l_shipdate", strs(LINES.iter().map(|l| l.ship))),
            ("l_commitdate", strs(LINES.iter().map(|l| l.commit))),
            ("l_receiptdate", strs(LINES.iter().map(|l| l.receipt))),
            ("l_shipinstruct", strs(LINES.iter().map(|l| l.instruct))),
            ("l_shipmode", strs(LINES.iter().map(|l| l.mode))),
            ("l_comment", strs(LINES.iter().map(|l| format!("anchor {}-{}", l.order, l.number)))),
        ])
    }
}

/// Appends `extra` to `base`. Both come from [`batch`] with the same columns,
/// so their schemas match.
fn extend(base: RecordBatch, extra: RecordBatch) -> RecordBatch {
    let schema = base.schema();
    concat_batches(&schema, &[base, extra]).expect("anchor rows share the schema")
}

/// The eight generated tables plus the [`anchors`].
pub fn tiny_tpch() -> Vec<(Table, RecordBatch)> {
    vec![
        (Table::Lineitem, extend(lineitem(), anchors::lineitem())),
        (Table::Orders, extend(orders(), anchors::orders())),
        (Table::Customer, extend(customer(), anchors::customer())),
        (Table::Part, extend(part(), anchors::part())),
        (Table::Partsupp, extend(partsupp(), anchors::partsupp())),
        (Table::Supplier, extend(supplier(), anchors::supplier())),
        (Table::Nation, nation()),
        (Table::Region, region()),
    ]
}

pub fn loader(tables: impl IntoIterator<Item = (Table, RecordBatch)>) -> MemoryLoader {
    tables
        .into_iter()
        .fold(MemoryLoader::new(), |loader, (table, batch)| {
            loader.with_table(table, batch)
        })
}

/// A cache over `loader` with a single target partition, so float sums
/// accumulate in the same order on every run.
pub fn cache(loader: Arc<MemoryLoader>) -> DatasetCache {
    let ctx = SessionContext::new_with_config(SessionConfig::new().with_target_partitions(1));
    DatasetCache::new(ctx, loader, "memory://tpch", StorageOptions::new())
}

fn column(batches: &[RecordBatch], name: &str, to: &DataType) -> ArrayRef {
    let schema = batches.first().expect("at least one batch").schema();
    let merged = concat_batches(&schema, batches).expect("concat");
    let index = schema.index_of(name).expect("result column");
    cast(merged.column(index), to).expect("cast result column")
}

pub fn strings(batches: &[RecordBatch], name: &str) -> Vec<Option<String>> {
    let array = column(batches, name, &DataType::Utf8);
    let array = array.as_any().downcast_ref::<StringArray>().expect("utf8");
    (0..array.len())
        .map(|i| array.is_valid(i).then(|| array.value(i).to_string()))
        .collect()
}

pub fn f64s(batches: &[RecordBatch], name: &str) -> Vec<Option<f64>> {
    let array = column(batches, name, &DataType::Float64);
    let array = array.as_any().downcast_ref::<Float64Array>().expect("f64");
    (0..array.len())
        .map(|i| array.is_valid(i).then(|| array.value(i)))
        .collect()
}

pub fn i64s(batches: &[RecordBatch], name: &str) -> Vec<Option<i64>> {
    let array = column(batches, name, &DataType::Int64);
    let array = array.as_any().downcast_ref::<Int64Array>().expect("i64");
    (0..array.len())
        .map(|i| array.is_valid(i).then(|| array.value(i)))
        .collect()
}

pub fn row_count(batches: &[RecordBatch]) -> usize {
    batches.iter().map(|b| b.num_rows()).sum()
}
