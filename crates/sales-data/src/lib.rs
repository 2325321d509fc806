//! Data layer for sales analytics.
//!
//! Responsible for reading the delimited sales export, normalizing dates and
//! empty cells, aggregating trends and breakdowns, and running the top-level
//! analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod normalizer;
pub mod reader;
pub mod report;

pub use sales_core as core;
