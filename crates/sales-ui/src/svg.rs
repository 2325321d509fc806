//! SVG export of a [`LineChart`] through plotters.

use std::path::Path;

use plotters::prelude::*;

use sales_core::error::{AnalyticsError, Result};
use sales_core::formatting::format_compact;

use crate::chart::{ChartPoint, LineChart};

const SIZE: (u32, u32) = (1600, 800);
/// Upper bound on x tick labels so long monthly series stay readable.
const MAX_X_LABELS: usize = 14;

/// Write `chart` to `path` as an SVG image.
///
/// An empty chart is a [`AnalyticsError::Render`] error; no file is created.
pub fn save_svg(chart: &LineChart, path: &Path) -> Result<()> {
    let (y_min, y_max) = chart
        .value_bounds()
        .ok_or_else(|| AnalyticsError::Render(format!("{}: no data points to plot", chart.title)))?;

    draw(chart, path, y_min, y_max).map_err(|e| AnalyticsError::Render(e.to_string()))?;
    tracing::info!(
        "Wrote {} points of '{}' to {}",
        chart.points.len(),
        chart.title,
        path.display()
    );
    Ok(())
}

fn draw(
    chart: &LineChart,
    path: &Path,
    y_min: f64,
    y_max: f64,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let n = chart.points.len();
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut plot = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(100)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min..y_max)?;

    plot.configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
        .label_style(("sans-serif", 20))
        .x_labels(n.min(MAX_X_LABELS))
        .x_label_formatter(&|x: &f64| label_at(&chart.points, *x))
        .y_label_formatter(&|y: &f64| format_compact(*y))
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()?;

    plot.draw_series(LineSeries::new(
        chart.indexed_values(),
        RGBColor(31, 119, 180).stroke_width(3),
    ))?;

    root.present()?;
    Ok(())
}

/// Label of the point at x position `x`; blank between points.
fn label_at(points: &[ChartPoint], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    points
        .get(index as usize)
        .map(|p| p.label.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn chart(points: &[(&str, f64)]) -> LineChart {
        LineChart {
            title: "Monthly Sales Trend".to_string(),
            x_label: "Date".to_string(),
            y_label: "Total Revenue".to_string(),
            points: points
                .iter()
                .map(|(label, value)| ChartPoint {
                    label: label.to_string(),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_label_at() {
        let c = chart(&[("2010-01", 1.0), ("2010-02", 2.0)]);
        assert_eq!(label_at(&c.points, 0.0), "2010-01");
        assert_eq!(label_at(&c.points, 1.0), "2010-02");
        assert_eq!(label_at(&c.points, 0.5), "");
        assert_eq!(label_at(&c.points, -1.0), "");
        assert_eq!(label_at(&c.points, 2.0), "");
    }

    #[test]
    fn test_save_svg_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trend.svg");
        let c = chart(&[("2010-01", 100.0), ("2010-02", 250.0), ("2010-03", 175.0)]);

        save_svg(&c, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("Monthly Sales Trend"));
        assert!(content.contains("Total Revenue"));
    }

    #[test]
    fn test_save_svg_single_point() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("single.svg");
        save_svg(&chart(&[("2024", 150.0)]), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_svg_empty_chart_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.svg");

        let err = save_svg(&chart(&[]), &path).unwrap_err();

        assert!(matches!(err, AnalyticsError::Render(_)));
        assert!(!path.exists());
    }
}
