use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales analytics pipeline.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited file is malformed or a cell has the wrong type.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A date cell matched none of the accepted formats.
    #[error("Invalid date in column '{column}' at line {row}: {value:?}")]
    DateParse {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// A revenue or profit cell holds NaN or an infinity.
    #[error("Invalid amount in column '{column}' at line {row}: {value}")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        value: f64,
    },

    /// A cell is empty and the missing-value policy does not allow it.
    #[error("Missing value in column '{column}' at line {row}")]
    MissingValue { row: usize, column: &'static str },

    /// A chart could not be drawn by the terminal or SVG backend.
    #[error("Render error: {0}")]
    Render(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the sales crates.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
