//! Conversion of raw text rows into typed [`SalesRecord`]s.
//!
//! Both date columns are parsed against a fixed, ordered list of formats and
//! empty cells are resolved by the configured [`MissingValuePolicy`].

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use sales_core::error::{AnalyticsError, Result};
use sales_core::models::{columns, RawSalesRow, RawSalesTable, SalesRecord, SalesTable};
use sales_core::settings::{MissingValuePolicy, DEFAULT_DATE_FORMATS};
use tracing::{debug, info, warn};

/// Label substituted for empty text cells under [`MissingValuePolicy::Impute`].
pub const IMPUTED_LABEL: &str = "Unknown";

/// Years a parsed date may fall in. `%Y` accepts one to four digits, so
/// `5/28/10` would otherwise become year 10.
const YEAR_RANGE: RangeInclusive<i32> = 1000..=9999;

/// Turns a [`RawSalesTable`] into a [`SalesTable`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    date_formats: Vec<String>,
    policy: MissingValuePolicy,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            MissingValuePolicy::Reject,
        )
    }
}

impl Normalizer {
    pub fn new(date_formats: Vec<String>, policy: MissingValuePolicy) -> Self {
        Self {
            date_formats,
            policy,
        }
    }

    /// Normalize every row. The first unparseable date or disallowed empty
    /// cell aborts the whole table.
    pub fn normalize(&self, raw: RawSalesTable) -> Result<SalesTable> {
        let total = raw.rows.len();
        let mut records = Vec::with_capacity(total);

        for (index, row) in raw.rows.into_iter().enumerate() {
            // Header is line 1.
            let line = index + 2;
            if let Some(record) = self.normalize_row(row, line)? {
                records.push(record);
            }
        }

        let dropped = total - records.len();
        if dropped > 0 {
            warn!("Dropped {} of {} rows with missing values", dropped, total);
        }
        info!("Normalized {} sales records", records.len());

        Ok(SalesTable::new(records))
    }

    /// Parse `value` with the first accepted format that matches and yields
    /// a four-digit year.
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        self.date_formats.iter().find_map(|fmt| {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .filter(|date| YEAR_RANGE.contains(&date.year()))
        })
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn normalize_row(&self, row: RawSalesRow, line: usize) -> Result<Option<SalesRecord>> {
        if self.policy == MissingValuePolicy::DropRow {
            if let Some(column) = first_missing_column(&row) {
                debug!("Dropping line {}: empty '{}'", line, column);
                return Ok(None);
            }
        }

        let order_date = self.date_cell(row.order_date, line, columns::ORDER_DATE)?;
        let ship_date = self.date_cell(row.ship_date, line, columns::SHIP_DATE)?;

        Ok(Some(SalesRecord {
            order_date,
            ship_date,
            total_revenue: self.amount_cell(row.total_revenue, line, columns::TOTAL_REVENUE)?,
            total_profit: self.amount_cell(row.total_profit, line, columns::TOTAL_PROFIT)?,
            sales_channel: self.label_cell(row.sales_channel, line, columns::SALES_CHANNEL)?,
            region: self.label_cell(row.region, line, columns::REGION)?,
            item_type: self.label_cell(row.item_type, line, columns::ITEM_TYPE)?,
            profit_margin: None,
        }))
    }

    /// Dates are never imputed.
    fn date_cell(
        &self,
        cell: Option<String>,
        line: usize,
        column: &'static str,
    ) -> Result<NaiveDate> {
        let text = cell.ok_or(AnalyticsError::MissingValue { row: line, column })?;
        self.parse_date(&text).ok_or(AnalyticsError::DateParse {
            row: line,
            column,
            value: text,
        })
    }

    /// NaN and infinities are rejected under every policy.
    fn amount_cell(&self, cell: Option<f64>, line: usize, column: &'static str) -> Result<f64> {
        match (cell, self.policy) {
            (Some(value), _) if !value.is_finite() => Err(AnalyticsError::InvalidAmount {
                row: line,
                column,
                value,
            }),
            (Some(value), _) => Ok(value),
            (None, MissingValuePolicy::Impute(fill)) => Ok(fill),
            (None, _) => Err(AnalyticsError::MissingValue { row: line, column }),
        }
    }

    fn label_cell(
        &self,
        cell: Option<String>,
        line: usize,
        column: &'static str,
    ) -> Result<String> {
        match (cell, self.policy) {
            (Some(value), _) => Ok(value),
            (None, MissingValuePolicy::Impute(_)) => Ok(IMPUTED_LABEL.to_string()),
            (None, _) => Err(AnalyticsError::MissingValue { row: line, column }),
        }
    }
}

fn first_missing_column(row: &RawSalesRow) -> Option<&'static str> {
    [
        (row.order_date.is_none(), columns::ORDER_DATE),
        (row.ship_date.is_none(), columns::SHIP_DATE),
        (row.total_revenue.is_none(), columns::TOTAL_REVENUE),
        (row.total_profit.is_none(), columns::TOTAL_PROFIT),
        (row.sales_channel.is_none(), columns::SALES_CHANNEL),
        (row.region.is_none(), columns::REGION),
        (row.item_type.is_none(), columns::ITEM_TYPE),
    ]
    .into_iter()
    .find(|(missing, _)| *missing)
    .map(|(_, column)| column)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
