//! Shared building blocks for the sales analytics workspace.
//!
//! Holds the typed sales model, bucket keys and summaries, the error type,
//! command-line settings and number formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{AnalyticsError, Result};
