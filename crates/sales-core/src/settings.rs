use crate::error::{AnalyticsError, Result};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Default input file, looked up relative to the working directory.
pub const DEFAULT_INPUT: &str = "Amazon Sales data.csv";

/// Date formats tried in order when `--date-format` is not given.
pub const DEFAULT_DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sales trends and breakdowns from a delimited sales export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-analytics",
    about = "Sales trends and breakdowns from a delimited sales export",
    version
)]
pub struct Settings {
    /// Input file with a header row
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Field delimiter (a single ASCII character)
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Accepted date format (chrono strftime syntax); repeat to accept several
    #[arg(long = "date-format", value_name = "FORMAT", default_values = DEFAULT_DATE_FORMATS)]
    pub date_formats: Vec<String>,

    /// How empty cells are handled
    #[arg(long, default_value = "reject", value_parser = ["reject", "drop-row", "impute"])]
    pub missing_values: String,

    /// Amount substituted for empty revenue/profit cells under `impute`
    #[arg(long, default_value = "0.0")]
    pub impute_value: f64,

    /// Trend shown as a line chart
    #[arg(long, default_value = "monthly", value_parser = ["monthly", "yearly", "yearly-monthly"])]
    pub chart: String,

    /// Write the chart to this SVG file instead of showing it in the terminal
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Typed options ──────────────────────────────────────────────────────────────

/// What the normalizer does with an empty cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissingValuePolicy {
    /// Abort the run on the first empty cell.
    Reject,
    /// Skip any row that has an empty cell.
    DropRow,
    /// Substitute the given amount for empty revenue/profit cells and
    /// `"Unknown"` for empty labels. Empty dates are still rejected.
    Impute(f64),
}

impl MissingValuePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingValuePolicy::Reject => "reject",
            MissingValuePolicy::DropRow => "drop-row",
            MissingValuePolicy::Impute(_) => "impute",
        }
    }
}

/// Which time-bucketed trend is charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Monthly,
    Yearly,
    YearlyMonthly,
}

impl FromStr for ChartKind {
    type Err = AnalyticsError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "monthly" => Ok(ChartKind::Monthly),
            "yearly" => Ok(ChartKind::Yearly),
            "yearly-monthly" => Ok(ChartKind::YearlyMonthly),
            other => Err(AnalyticsError::Config(format!("unknown chart: {other}"))),
        }
    }
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Monthly => "monthly",
            ChartKind::Yearly => "yearly",
            ChartKind::YearlyMonthly => "yearly-monthly",
        }
    }

    /// Chart title shown above the plot.
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Monthly => "Monthly Sales Trend",
            ChartKind::Yearly => "Yearly Sales Trend",
            ChartKind::YearlyMonthly => "Yearly-Monthly Sales Trend",
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) but from an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(AnalyticsError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }

    pub fn missing_value_policy(&self) -> Result<MissingValuePolicy> {
        match self.missing_values.as_str() {
            "reject" => Ok(MissingValuePolicy::Reject),
            "drop-row" => Ok(MissingValuePolicy::DropRow),
            "impute" => Ok(MissingValuePolicy::Impute(self.impute_value)),
            other => Err(AnalyticsError::Config(format!(
                "unknown missing-value policy: {other}"
            ))),
        }
    }

    pub fn chart_kind(&self) -> Result<ChartKind> {
        self.chart.parse()
    }

    /// Accepted date formats, rejecting an empty list.
    pub fn date_formats(&self) -> Result<Vec<String>> {
        if self.date_formats.is_empty() {
            return Err(AnalyticsError::Config(
                "at least one date format is required".to_string(),
            ));
        }
        Ok(self.date_formats.clone())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
