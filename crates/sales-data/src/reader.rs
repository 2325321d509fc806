//! Delimited-file loading for the sales pipeline.
//!
//! Reads a sales export with a header row into [`RawSalesRow`]s. Dates stay
//! textual here; the [`normalizer`](crate::normalizer) turns them into
//! calendar dates.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sales_core::error::{AnalyticsError, Result};
use sales_core::models::{columns, RawSalesRow, RawSalesTable};
use tracing::debug;

/// Parsing options for the delimited input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    pub delimiter: u8,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the sales file at `path`.
///
/// Fails with [`AnalyticsError::FileRead`] when the file cannot be opened and
/// with [`AnalyticsError::MissingColumn`] when the header lacks a required
/// column.
pub fn load_sales_table(path: &Path, options: &ReaderOptions) -> Result<RawSalesTable> {
    let file = File::open(path).map_err(|source| AnalyticsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Reading sales data from {}", path.display());
    load_sales_table_from_reader(file, options)
}

/// Load sales rows from any reader positioned at the header row.
pub fn load_sales_table_from_reader<R: Read>(
    reader: R,
    options: &ReaderOptions,
) -> Result<RawSalesTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    check_headers(csv_reader.headers()?)?;

    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<RawSalesRow>() {
        rows.push(result?);
    }

    debug!("Read {} sales rows", rows.len());
    Ok(RawSalesTable { rows })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Ensure every required column is present. Extra columns are allowed.
fn check_headers(headers: &csv::StringRecord) -> Result<()> {
    for column in columns::REQUIRED {
        if !headers.iter().any(|h| h == column) {
            return Err(AnalyticsError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
