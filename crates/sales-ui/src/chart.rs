//! Backend-independent line chart built from a time-bucketed summary.
//!
//! A [`LineChart`] is a plain value: the terminal view and the SVG writer both
//! draw from it, so nothing about the chart lives in global plotting state.

use sales_core::models::Summary;
use sales_core::settings::ChartKind;
use sales_data::aggregator::SalesTrends;

const X_LABEL: &str = "Date";
const Y_LABEL: &str = "Total Revenue";

/// One labelled value on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A titled single-series line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Points in ascending key order.
    pub points: Vec<ChartPoint>,
}

impl LineChart {
    /// Build a chart from `summary`, ordering points by ascending key.
    pub fn from_summary<K: Ord>(
        title: &str,
        x_label: &str,
        y_label: &str,
        summary: &Summary<K>,
        label: impl Fn(&K) -> String,
    ) -> Self {
        let points = summary
            .sorted()
            .into_iter()
            .map(|(key, value)| ChartPoint {
                label: label(key),
                value,
            })
            .collect();
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            points,
        }
    }

    /// The revenue trend selected by `kind`.
    pub fn for_trend(kind: ChartKind, trends: &SalesTrends) -> Self {
        match kind {
            ChartKind::Monthly => Self::from_summary(
                kind.title(),
                X_LABEL,
                Y_LABEL,
                &trends.monthly,
                |period| period.to_string(),
            ),
            ChartKind::Yearly => Self::from_summary(
                kind.title(),
                X_LABEL,
                Y_LABEL,
                &trends.yearly,
                |year| year.to_string(),
            ),
            ChartKind::YearlyMonthly => Self::from_summary(
                kind.title(),
                X_LABEL,
                Y_LABEL,
                &trends.yearly_monthly,
                |(year, month)| format!("({}, {})", year, month),
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(x, y)` pairs with the point index as x.
    pub fn indexed_values(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.value))
            .collect()
    }

    /// Y range covering every point with a tenth of the span as margin.
    ///
    /// Returns `None` for an empty chart. A flat series gets a margin of a
    /// tenth of its magnitude (or `1.0` at zero) so the range is never empty.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.points.iter().map(|p| p.value);
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let span = max - min;
        let margin = if span > 0.0 {
            span / 10.0
        } else if max != 0.0 {
            max.abs() / 10.0
        } else {
            1.0
        };
        Some((min - margin, max + margin))
    }
}
