//! Terminal rendering of a [`LineChart`] with the ratatui `Chart` widget.

use ratatui::{
    layout::Rect,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use sales_core::formatting::format_compact;

use crate::chart::LineChart;
use crate::themes::Theme;

/// Draw `chart` into `area`. An empty chart shows a placeholder instead.
pub fn render_line_chart(frame: &mut Frame, area: Rect, chart: &LineChart, theme: &Theme) {
    let Some((y_min, y_max)) = chart.value_bounds() else {
        render_no_data(frame, area, &chart.title, theme);
        return;
    };

    let data = chart.indexed_values();
    let x_max = chart.points.len().saturating_sub(1).max(1) as f64;

    let dataset = Dataset::default()
        .name(chart.y_label.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_line)
        .data(&data);

    let y_labels = vec![
        format_compact(y_min),
        format_compact((y_min + y_max) / 2.0),
        format_compact(y_max),
    ];

    let widget = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {} ", chart.title), theme.title)),
        )
        .x_axis(
            Axis::default()
                .title(chart.x_label.clone())
                .style(theme.chart_axis)
                .bounds([0.0, x_max])
                .labels(x_axis_labels(chart)),
        )
        .y_axis(
            Axis::default()
                .title(chart.y_label.clone())
                .style(theme.chart_axis)
                .bounds([y_min, y_max])
                .labels(y_labels),
        )
        .style(theme.text);

    frame.render_widget(widget, area);
}

/// Render a placeholder when there are no points to plot.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No sales data to display", theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

/// First, middle and last point labels; fewer when the chart is short.
fn x_axis_labels(chart: &LineChart) -> Vec<String> {
    let n = chart.points.len();
    let mut indices = vec![0, n / 2, n - 1];
    indices.dedup();
    indices
        .into_iter()
        .map(|i| chart.points[i].label.clone())
        .collect()
}
