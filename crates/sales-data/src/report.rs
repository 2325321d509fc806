//! Plain-text summary of an analysis run.

use std::fmt::{Display, Write};

use sales_core::formatting::{format_currency, percentage};
use sales_core::models::Summary;

use crate::analysis::AnalysisResult;

/// How many rows each categorical section lists before truncating.
const TOP_ROWS: usize = 10;

/// Render the trends and breakdowns of `result` as a text report.
pub fn build_report(result: &AnalysisResult) -> String {
    let mut output = String::new();
    let table = &result.table;

    let _ = writeln!(output, "# Sales Analytics Report");
    let _ = writeln!(
        output,
        "{} records, total revenue {}, total profit {}",
        table.len(),
        format_currency(table.total_revenue()),
        format_currency(table.total_profit())
    );
    if result.metrics.undefined_margins > 0 {
        let _ = writeln!(
            output,
            "{} records with zero revenue have no profit margin",
            result.metrics.undefined_margins
        );
    }

    write_chronological(&mut output, "Yearly Sales Trend", &result.trends.yearly);
    write_chronological(&mut output, "Monthly Sales Trend", &result.trends.monthly);
    write_ranked(&mut output, "Revenue by Sales Channel", &result.metrics.channel_revenue);
    write_ranked(&mut output, "Revenue by Region", &result.metrics.region_revenue);
    write_ranked(&mut output, "Profit by Item Type", &result.metrics.item_profit);

    output
}

fn write_chronological<K: Ord + Display>(output: &mut String, title: &str, summary: &Summary<K>) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", title);
    if summary.is_empty() {
        let _ = writeln!(output, "No sales recorded.");
        return;
    }
    for (key, value) in summary.sorted() {
        let _ = writeln!(output, "- {}: {}", key, format_currency(value));
    }
}

fn write_ranked<K: Ord + Display>(output: &mut String, title: &str, summary: &Summary<K>) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", title);
    if summary.is_empty() {
        let _ = writeln!(output, "No sales recorded.");
        return;
    }
    let total = summary.total();
    for (key, value) in summary.top(TOP_ROWS) {
        let _ = writeln!(
            output,
            "- {}: {} ({:.1}%)",
            key,
            format_currency(value),
            percentage(value, total, 1)
        );
    }
    if summary.len() > TOP_ROWS {
        let _ = writeln!(output, "- ... {} more", summary.len() - TOP_ROWS);
    }
}
