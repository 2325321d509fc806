//! Sales aggregation over time buckets and categorical labels.

use sales_core::models::{MonthPeriod, ProfitMargin, SalesRecord, SalesTable, Summary};
use tracing::{debug, warn};

// ── Results ───────────────────────────────────────────────────────────────────

/// Revenue trends keyed by three representations of order time.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTrends {
    /// Revenue per calendar month period.
    pub monthly: Summary<MonthPeriod>,
    /// Revenue per order year.
    pub yearly: Summary<i32>,
    /// Revenue per `(year, month)` pair.
    pub yearly_monthly: Summary<(i32, u32)>,
}

/// Categorical breakdowns of the working table.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMetrics {
    /// Revenue per sales channel.
    pub channel_revenue: Summary<String>,
    /// Revenue per region.
    pub region_revenue: Summary<String>,
    /// Profit per item type.
    pub item_profit: Summary<String>,
    /// Records whose profit margin is undefined (zero revenue).
    pub undefined_margins: usize,
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups sales records and sums their amounts.
///
/// Every summary is a pure function of the table: grouping uses exact key
/// equality and only keys present in the data appear in the result.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Revenue grouped by the calendar month of the order date.
    pub fn monthly_sales(table: &SalesTable) -> Summary<MonthPeriod> {
        Self::sum_by(table, SalesRecord::order_period, |r| r.total_revenue)
    }

    /// Revenue grouped by the year of the order date.
    pub fn yearly_sales(table: &SalesTable) -> Summary<i32> {
        Self::sum_by(table, SalesRecord::order_year, |r| r.total_revenue)
    }

    /// Revenue grouped by the `(year, month)` pair of the order date.
    pub fn yearly_monthly_sales(table: &SalesTable) -> Summary<(i32, u32)> {
        Self::sum_by(table, SalesRecord::order_year_month, |r| r.total_revenue)
    }

    /// All three time-based trends.
    pub fn calculate_sales_trends(table: &SalesTable) -> SalesTrends {
        let trends = SalesTrends {
            monthly: Self::monthly_sales(table),
            yearly: Self::yearly_sales(table),
            yearly_monthly: Self::yearly_monthly_sales(table),
        };
        debug!(
            "Sales trends: {} months, {} years",
            trends.monthly.len(),
            trends.yearly.len()
        );
        trends
    }

    /// Revenue grouped by sales channel.
    pub fn channel_revenue(table: &SalesTable) -> Summary<String> {
        Self::sum_by(table, |r| r.sales_channel.clone(), |r| r.total_revenue)
    }

    /// Revenue grouped by region.
    pub fn region_revenue(table: &SalesTable) -> Summary<String> {
        Self::sum_by(table, |r| r.region.clone(), |r| r.total_revenue)
    }

    /// Profit grouped by item type.
    pub fn item_profit(table: &SalesTable) -> Summary<String> {
        Self::sum_by(table, |r| r.item_type.clone(), |r| r.total_profit)
    }

    /// Attach the profit margin column to every record.
    ///
    /// Zero-revenue records get [`ProfitMargin::Undefined`] instead of failing.
    /// Returns how many records that was.
    pub fn derive_profit_margins(table: &mut SalesTable) -> usize {
        let mut undefined = 0;
        for record in table.iter_mut() {
            let margin = ProfitMargin::of(record.total_profit, record.total_revenue);
            if margin.is_undefined() {
                undefined += 1;
            }
            record.profit_margin = Some(margin);
        }
        if undefined > 0 {
            warn!(
                "{} records have zero revenue; their profit margin is undefined",
                undefined
            );
        }
        undefined
    }

    /// Derive profit margins, then compute the categorical breakdowns.
    pub fn analyze_key_metrics(table: &mut SalesTable) -> KeyMetrics {
        let undefined_margins = Self::derive_profit_margins(table);
        KeyMetrics {
            channel_revenue: Self::channel_revenue(table),
            region_revenue: Self::region_revenue(table),
            item_profit: Self::item_profit(table),
            undefined_margins,
        }
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn sum_by<K: Ord>(
        table: &SalesTable,
        key_fn: impl Fn(&SalesRecord) -> K,
        value_fn: impl Fn(&SalesRecord) -> f64,
    ) -> Summary<K> {
        table.iter().map(|r| (key_fn(r), value_fn(r))).collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_record(order: &str, revenue: f64, profit: f64, channel: &str) -> SalesRecord {
        let order_date = NaiveDate::parse_from_str(order, "%Y-%m-%d").unwrap();
        SalesRecord {
            order_date,
            ship_date: order_date + chrono::Duration::days(5),
            total_revenue: revenue,
            total_profit: profit,
            sales_channel: channel.to_string(),
            region: "Europe".to_string(),
            item_type: "Cereal".to_string(),
            profit_margin: None,
        }
    }

    fn with_labels(mut record: SalesRecord, region: &str, item: &str) -> SalesRecord {
        record.region = region.to_string();
        record.item_type = item.to_string();
        record
    }

    fn two_record_table() -> SalesTable {
        SalesTable::new(vec![
            make_record("2024-01-15", 100.0, 20.0, "Online"),
            make_record("2024-02-10", 50.0, 10.0, "Retail"),
        ])
    }

    fn multi_year_table() -> SalesTable {
        SalesTable::new(vec![
            with_labels(
                make_record("2010-05-28", 2_533_654.0, 951_410.5, "Offline"),
                "Australia and Oceania",
                "Baby Food",
            ),
            with_labels(
                make_record("2012-08-22", 576_782.75, 248_406.25, "Online"),
                "Central America",
                "Cereal",
            ),
            with_labels(
                make_record("2012-08-02", 1_158_502.5, 224_598.75, "Offline"),
                "Europe",
                "Office Supplies",
            ),
            with_labels(
                make_record("2014-02-04", 75_591.625, 19_525.875, "Online"),
                "Asia",
                "Fruits",
            ),
            with_labels(
                make_record("2013-04-23", 3_296_425.0, 639_077.5, "Offline"),
                "Sub-Saharan Africa",
                "Office Supplies",
            ),
            with_labels(
                make_record("2012-12-18", 759_202.75, 285_087.5, "Online"),
                "Europe",
                "Baby Food",
            ),
            with_labels(make_record("2010-05-01", 2_000.0, -500.0, "Online"), "Asia", "Fruits"),
        ])
    }

    // ── Time trends ───────────────────────────────────────────────────────────

    #[test]
    fn test_two_record_example() {
        let table = two_record_table();

        let yearly = SalesAggregator::yearly_sales(&table);
        assert_eq!(yearly.len(), 1);
        assert_eq!(yearly.get(&2024), Some(150.0));

        let monthly = SalesAggregator::monthly_sales(&table);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly.get(&MonthPeriod::new(2024, 1)), Some(100.0));
        assert_eq!(monthly.get(&MonthPeriod::new(2024, 2)), Some(50.0));

        let channels = SalesAggregator::channel_revenue(&table);
        assert_eq!(channels.get(&"Online".to_string()), Some(100.0));
        assert_eq!(channels.get(&"Retail".to_string()), Some(50.0));
    }

    #[test]
    fn test_monthly_groups_same_month_across_days() {
        let table = SalesTable::new(vec![
            make_record("2012-08-22", 10.0, 1.0, "Online"),
            make_record("2012-08-02", 5.0, 1.0, "Online"),
            make_record("2012-12-18", 7.0, 1.0, "Online"),
        ]);
        let monthly = SalesAggregator::monthly_sales(&table);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly.get(&MonthPeriod::new(2012, 8)), Some(15.0));
    }

    #[test]
    fn test_monthly_sorted_chronologically() {
        let monthly = SalesAggregator::monthly_sales(&multi_year_table());
        let keys: Vec<String> = monthly.sorted().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(
            keys,
            vec!["2010-05", "2012-08", "2012-12", "2013-04", "2014-02"]
        );
    }

    #[test]
    fn test_yearly_total_preserves_table_revenue() {
        let table = multi_year_table();
        let yearly = SalesAggregator::yearly_sales(&table);
        let total = table.total_revenue();
        assert!((yearly.total() - total).abs() <= total * 1e-12);
    }

    #[test]
    fn test_monthly_sums_match_yearly_per_year() {
        let table = multi_year_table();
        let trends = SalesAggregator::calculate_sales_trends(&table);

        for (year, yearly_value) in trends.yearly.iter() {
            let monthly_sum: f64 = trends
                .monthly
                .iter()
                .filter(|(period, _)| period.year == *year)
                .map(|(_, v)| v)
                .sum();
            assert!(
                (monthly_sum - yearly_value).abs() <= yearly_value.abs() * 1e-12,
                "year {year}: {monthly_sum} != {yearly_value}"
            );
        }
    }

    #[test]
    fn test_yearly_monthly_matches_monthly_key_for_key() {
        let trends = SalesAggregator::calculate_sales_trends(&multi_year_table());
        assert_eq!(trends.monthly.len(), trends.yearly_monthly.len());
        for (period, value) in trends.monthly.iter() {
            assert_eq!(
                trends.yearly_monthly.get(&(period.year, period.month)),
                Some(value)
            );
        }
    }

    #[test]
    fn test_empty_table_produces_empty_summaries() {
        let trends = SalesAggregator::calculate_sales_trends(&SalesTable::default());
        assert!(trends.monthly.is_empty());
        assert!(trends.yearly.is_empty());
        assert!(trends.yearly_monthly.is_empty());
    }

    // ── Determinism ───────────────────────────────────────────────────────────

    #[test]
    fn test_grouping_is_order_independent() {
        let table = multi_year_table();
        let mut reversed: Vec<SalesRecord> = table.records().to_vec();
        reversed.reverse();
        let mut rotated: Vec<SalesRecord> = table.records().to_vec();
        rotated.rotate_left(3);

        let base = SalesAggregator::calculate_sales_trends(&table);
        for permuted in [SalesTable::new(reversed), SalesTable::new(rotated)] {
            assert_eq!(SalesAggregator::calculate_sales_trends(&permuted), base);
            assert_eq!(
                SalesAggregator::region_revenue(&permuted),
                SalesAggregator::region_revenue(&table)
            );
        }
    }

    #[test]
    fn test_repeated_runs_are_bit_identical() {
        let mut first_table = multi_year_table();
        let mut second_table = first_table.clone();

        let first = SalesAggregator::analyze_key_metrics(&mut first_table);
        let second = SalesAggregator::analyze_key_metrics(&mut second_table);
        assert_eq!(first, second);

        let a = SalesAggregator::monthly_sales(&first_table);
        let b = SalesAggregator::monthly_sales(&first_table);
        for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
            assert_eq!(ka, kb);
            assert_eq!(va.to_bits(), vb.to_bits());
        }
    }

    // ── Categorical breakdowns ────────────────────────────────────────────────

    #[test]
    fn test_key_metrics_breakdowns() {
        let mut table = multi_year_table();
        let metrics = SalesAggregator::analyze_key_metrics(&mut table);

        assert_eq!(metrics.channel_revenue.len(), 2);
        assert_eq!(
            metrics.region_revenue.get(&"Europe".to_string()),
            Some(1_158_502.5 + 759_202.75)
        );
        assert_eq!(
            metrics.item_profit.get(&"Fruits".to_string()),
            Some(19_525.875 - 500.0)
        );
        assert_eq!(
            metrics.item_profit.get(&"Office Supplies".to_string()),
            Some(224_598.75 + 639_077.5)
        );
        assert_eq!(metrics.undefined_margins, 0);
    }

    #[test]
    fn test_labels_are_not_case_folded() {
        let table = SalesTable::new(vec![
            make_record("2024-01-15", 100.0, 20.0, "Online"),
            make_record("2024-01-16", 30.0, 5.0, "online"),
        ]);
        let channels = SalesAggregator::channel_revenue(&table);
        assert_eq!(channels.len(), 2);
        assert_eq!(channels.get(&"online".to_string()), Some(30.0));
    }

    // ── Profit margin ─────────────────────────────────────────────────────────

    #[test]
    fn test_profit_margins_attached_to_every_record() {
        let mut table = two_record_table();
        let undefined = SalesAggregator::derive_profit_margins(&mut table);
        assert_eq!(undefined, 0);
        assert_eq!(
            table.records()[0].profit_margin,
            Some(ProfitMargin::Ratio(0.2))
        );
        assert_eq!(
            table.records()[1].profit_margin,
            Some(ProfitMargin::Ratio(0.2))
        );
    }

    #[test]
    fn test_zero_revenue_record_does_not_break_pipeline() {
        let mut table = SalesTable::new(vec![
            make_record("2024-01-15", 100.0, 20.0, "Online"),
            make_record("2024-01-20", 0.0, 5.0, "Retail"),
            make_record("2024-02-10", 50.0, 10.0, "Retail"),
        ]);

        let metrics = SalesAggregator::analyze_key_metrics(&mut table);
        let trends = SalesAggregator::calculate_sales_trends(&table);

        assert_eq!(metrics.undefined_margins, 1);
        assert_eq!(
            table.records()[1].profit_margin,
            Some(ProfitMargin::Undefined)
        );
        assert_eq!(metrics.channel_revenue.get(&"Retail".to_string()), Some(50.0));
        assert_eq!(metrics.item_profit.get(&"Cereal".to_string()), Some(35.0));
        assert_eq!(trends.yearly.get(&2024), Some(150.0));
        assert_eq!(trends.monthly.get(&MonthPeriod::new(2024, 1)), Some(100.0));
    }
}
