//! Presentation layer for sales analytics.
//!
//! Builds backend-independent line charts from the time-bucketed trends and
//! draws them either in the terminal with [`ratatui`] or to an SVG file with
//! plotters. The terminal app also shows the categorical breakdown tables.

pub mod app;
pub mod chart;
pub mod chart_view;
pub mod svg;
pub mod table_view;
pub mod themes;

pub use sales_core as core;
