use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Header labels of the columns the pipeline reads.
pub mod columns {
    pub const ORDER_DATE: &str = "Order Date";
    pub const SHIP_DATE: &str = "Ship Date";
    pub const TOTAL_REVENUE: &str = "Total Revenue";
    pub const TOTAL_PROFIT: &str = "Total Profit";
    pub const SALES_CHANNEL: &str = "Sales Channel";
    pub const REGION: &str = "Region";
    pub const ITEM_TYPE: &str = "Item Type";

    /// Every column that must appear in the header row, in file order of the
    /// reference dataset.
    pub const REQUIRED: [&str; 7] = [
        REGION,
        ITEM_TYPE,
        SALES_CHANNEL,
        ORDER_DATE,
        SHIP_DATE,
        TOTAL_REVENUE,
        TOTAL_PROFIT,
    ];
}

// ── Raw rows ──────────────────────────────────────────────────────────────────

/// One row exactly as read from the delimited file.
///
/// Dates are still text and every cell is optional; empty cells deserialize to
/// `None` so the normalizer can apply the configured missing-value policy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSalesRow {
    #[serde(rename = "Order Date")]
    pub order_date: Option<String>,
    #[serde(rename = "Ship Date")]
    pub ship_date: Option<String>,
    #[serde(rename = "Total Revenue")]
    pub total_revenue: Option<f64>,
    #[serde(rename = "Total Profit")]
    pub total_profit: Option<f64>,
    #[serde(rename = "Sales Channel")]
    pub sales_channel: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
    #[serde(rename = "Item Type")]
    pub item_type: Option<String>,
}

/// The rows of one input file, before date normalization.
#[derive(Debug, Clone, Default)]
pub struct RawSalesTable {
    pub rows: Vec<RawSalesRow>,
}

// ── Bucket keys ───────────────────────────────────────────────────────────────

/// A calendar month, ordered chronologically. Displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The period that contains `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ── Profit margin ─────────────────────────────────────────────────────────────

/// Profit divided by revenue for a single record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfitMargin {
    /// `profit / revenue` for a record with non-zero revenue.
    Ratio(f64),
    /// The record has zero revenue, so the ratio does not exist.
    Undefined,
}

impl ProfitMargin {
    pub fn of(profit: f64, revenue: f64) -> Self {
        if revenue == 0.0 {
            ProfitMargin::Undefined
        } else {
            ProfitMargin::Ratio(profit / revenue)
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ProfitMargin::Ratio(r) => Some(*r),
            ProfitMargin::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ProfitMargin::Undefined)
    }
}

impl fmt::Display for ProfitMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitMargin::Ratio(r) => write!(f, "{:.2}%", r * 100.0),
            ProfitMargin::Undefined => f.write_str("n/a"),
        }
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// A normalized sales row with typed dates and amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub order_date: NaiveDate,
    pub ship_date: NaiveDate,
    /// Revenue in the dataset's currency; non-negative.
    pub total_revenue: f64,
    /// Profit in the dataset's currency; negative for a loss.
    pub total_profit: f64,
    pub sales_channel: String,
    pub region: String,
    pub item_type: String,
    /// Derived column, `None` until the aggregator attaches it.
    pub profit_margin: Option<ProfitMargin>,
}

impl SalesRecord {
    pub fn order_period(&self) -> MonthPeriod {
        MonthPeriod::of(self.order_date)
    }

    pub fn order_year(&self) -> i32 {
        self.order_date.year()
    }

    pub fn order_year_month(&self) -> (i32, u32) {
        (self.order_date.year(), self.order_date.month())
    }
}

/// The normalized working table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, SalesRecord> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of revenue over every record.
    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|r| r.total_revenue).sum()
    }

    /// Sum of profit over every record.
    pub fn total_profit(&self) -> f64 {
        self.records.iter().map(|r| r.total_profit).sum()
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Mapping from a bucket key to the sum of the values grouped under it.
///
/// Only keys that occurred in the input are present. A summary is built once
/// (via [`FromIterator`]) and exposes no mutable access afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<K: Ord> {
    values: BTreeMap<K, f64>,
}

impl<K: Ord> Summary<K> {
    pub fn get(&self, key: &K) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    /// Sum of every group value.
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    /// `(key, value)` pairs in ascending key order, for consumers that need a
    /// chronological or alphabetical sequence.
    pub fn sorted(&self) -> Vec<(&K, f64)> {
        self.iter().collect()
    }

    /// The `n` largest groups, largest first. Equal values keep key order.
    pub fn top(&self, n: usize) -> Vec<(&K, f64)> {
        let mut pairs = self.sorted();
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        pairs.truncate(n);
        pairs
    }
}

impl<K: Ord> FromIterator<(K, f64)> for Summary<K> {
    /// Group `(key, value)` pairs by exact key equality, summing the values.
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut values: BTreeMap<K, f64> = BTreeMap::new();
        for (key, value) in iter {
            *values.entry(key).or_insert(0.0) += value;
        }
        Self { values }
    }
}
