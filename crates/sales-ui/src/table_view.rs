//! Categorical breakdown tables (channel, region, item type).
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per label,
//! largest first, plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use sales_core::formatting;
use sales_core::models::Summary;
use sales_data::aggregator::KeyMetrics;

use crate::chart_view::render_no_data;
use crate::themes::Theme;

/// Data for a single row in a breakdown table.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    /// Category label, e.g. `"Online"` or `"Sub-Saharan Africa"`.
    pub label: String,
    /// Summed amount for the label.
    pub value: f64,
}

/// One categorical breakdown ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub title: String,
    /// Header of the amount column, e.g. `"Total Revenue"`.
    pub value_header: String,
    /// Rows ordered by value, largest first.
    pub rows: Vec<BreakdownRow>,
    pub total: f64,
}

impl Breakdown {
    pub fn from_summary(title: &str, value_header: &str, summary: &Summary<String>) -> Self {
        let rows = summary
            .top(summary.len())
            .into_iter()
            .map(|(label, value)| BreakdownRow {
                label: label.clone(),
                value,
            })
            .collect();
        Self {
            title: title.to_string(),
            value_header: value_header.to_string(),
            rows,
            total: summary.total(),
        }
    }
}

/// The three breakdowns in display order.
pub fn breakdowns(metrics: &KeyMetrics) -> Vec<Breakdown> {
    vec![
        Breakdown::from_summary(
            "Revenue by Sales Channel",
            "Total Revenue",
            &metrics.channel_revenue,
        ),
        Breakdown::from_summary("Revenue by Region", "Total Revenue", &metrics.region_revenue),
        Breakdown::from_summary("Profit by Item Type", "Total Profit", &metrics.item_profit),
    ]
}

/// Render `breakdown` into `area`.
pub fn render_breakdown_table(frame: &mut Frame, area: Rect, breakdown: &Breakdown, theme: &Theme) {
    if breakdown.rows.is_empty() {
        render_no_data(frame, area, &breakdown.title, theme);
        return;
    }

    let header_cells = ["Label", breakdown.value_header.as_str(), "Share"]
        .into_iter()
        .map(|h| Cell::from(h.to_string()).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let mut all_rows: Vec<Row> = breakdown
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.label.clone()),
                Cell::from(formatting::format_currency(row.value))
                    .style(theme.amount_style(row.value)),
                Cell::from(format!(
                    "{:.1}%",
                    formatting::percentage(row.value, breakdown.total, 1)
                )),
            ])
            .style(style)
        })
        .collect();

    all_rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(formatting::format_currency(breakdown.total)),
            Cell::from(format!("{} labels", breakdown.rows.len())),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(36),
        Constraint::Length(20),
        Constraint::Length(10),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", breakdown.title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
