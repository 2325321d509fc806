//! Main analysis pipeline for the sales dataset.
//!
//! Sequences loading, normalization, trend computation and key metrics,
//! returning an [`AnalysisResult`] ready for reporting and rendering.

use std::path::PathBuf;
use std::time::Instant;

use sales_core::error::Result;
use sales_core::models::{RawSalesTable, SalesTable};
use sales_core::settings::{MissingValuePolicy, Settings};
use tracing::info;

use crate::aggregator::{KeyMetrics, SalesAggregator, SalesTrends};
use crate::normalizer::Normalizer;
use crate::reader::{load_sales_table, ReaderOptions};

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the pipeline needs to know about its input.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub input: PathBuf,
    pub reader: ReaderOptions,
    pub date_formats: Vec<String>,
    pub missing_values: MissingValuePolicy,
}

impl AnalysisOptions {
    /// Build options from parsed command-line settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            input: settings.input.clone(),
            reader: ReaderOptions {
                delimiter: settings.delimiter_byte()?,
            },
            date_formats: settings.date_formats()?,
            missing_values: settings.missing_value_policy()?,
        })
    }

    fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.date_formats.clone(), self.missing_values)
    }
}

/// Counters describing one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisMetadata {
    /// Data rows in the input file.
    pub rows_read: usize,
    /// Rows that survived normalization.
    pub records_analyzed: usize,
    /// Wall-clock seconds spent reading the file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent normalizing and aggregating.
    pub transform_time_seconds: f64,
}

/// The complete output of [`run_analysis`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Working table, with the profit margin column attached.
    pub table: SalesTable,
    pub trends: SalesTrends,
    pub metrics: KeyMetrics,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline on the file named in `options`.
///
/// Any failure aborts the run; no partial result is returned.
pub fn run_analysis(options: &AnalysisOptions) -> Result<AnalysisResult> {
    let load_start = Instant::now();
    let raw = load_sales_table(&options.input, &options.reader)?;
    let load_time_seconds = load_start.elapsed().as_secs_f64();

    let mut result = analyze_raw_table(raw, &options.normalizer())?;
    result.metadata.load_time_seconds = load_time_seconds;

    info!(
        "Analyzed {} of {} rows from {} (load {:.3}s, transform {:.3}s)",
        result.metadata.records_analyzed,
        result.metadata.rows_read,
        options.input.display(),
        result.metadata.load_time_seconds,
        result.metadata.transform_time_seconds,
    );

    Ok(result)
}

/// Normalize and aggregate an already-loaded table.
pub fn analyze_raw_table(raw: RawSalesTable, normalizer: &Normalizer) -> Result<AnalysisResult> {
    let transform_start = Instant::now();
    let rows_read = raw.rows.len();

    let mut table = normalizer.normalize(raw)?;
    let trends = SalesAggregator::calculate_sales_trends(&table);
    let metrics = SalesAggregator::analyze_key_metrics(&mut table);

    let metadata = AnalysisMetadata {
        rows_read,
        records_analyzed: table.len(),
        load_time_seconds: 0.0,
        transform_time_seconds: transform_start.elapsed().as_secs_f64(),
    };

    Ok(AnalysisResult {
        table,
        trends,
        metrics,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
