//! Monthly and yearly aggregation of forecast rows

use crate::projection::ForecastRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summed measures for one month or year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Month or year this row covers
    pub period: u32,
    pub users: u64,
    pub fee_collected: f64,
    pub nii: f64,
    pub profit: f64,
}

impl SummaryRow {
    fn add(&mut self, record: &ForecastRecord) {
        self.users += record.users;
        self.fee_collected += record.fee_collected;
        self.nii += record.nii;
        self.profit += record.profit;
    }
}

/// Group rows by `key` and sum Users, Fee Collected, NII and Profit, ascending by key
pub fn summarize_by<F>(records: &[ForecastRecord], key: F) -> Vec<SummaryRow>
where
    F: Fn(&ForecastRecord) -> u32,
{
    let mut grouped: BTreeMap<u32, SummaryRow> = BTreeMap::new();

    for record in records {
        let period = key(record);
        grouped
            .entry(period)
            .or_insert_with(|| SummaryRow { period, ..Default::default() })
            .add(record);
    }

    grouped.into_values().collect()
}

/// One row per forecast month
pub fn monthly_summary(records: &[ForecastRecord]) -> Vec<SummaryRow> {
    summarize_by(records, |r| r.month)
}

/// One row per forecast year
pub fn yearly_summary(records: &[ForecastRecord]) -> Vec<SummaryRow> {
    summarize_by(records, |r| r.year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ForecastConfig, ForecastInputs, SlabAllocation, default_slot_table};
    use crate::projection::{year_of_month, ForecastEngine};
    use approx::assert_relative_eq;

    fn record(month: u32, users: u64, profit: f64) -> ForecastRecord {
        ForecastRecord {
            month,
            year: year_of_month(month),
            duration: 3,
            slab: 1000,
            slot: 1,
            users,
            deposit_per_user: 3000,
            fee_pct: 1.0,
            fee_collected: users as f64 * 30.0,
            nii: users as f64 * 40.0,
            defaults: 0,
            pre_maturity_loss: 0.0,
            post_maturity_loss: 0.0,
            profit,
        }
    }

    #[test]
    fn test_monthly_groups_and_orders() {
        let records = vec![record(2, 10, 5.0), record(1, 20, 1.0), record(2, 30, 2.5)];
        let monthly = monthly_summary(&records);

        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].period, 1);
        assert_eq!(monthly[0].users, 20);
        assert_eq!(monthly[1].period, 2);
        assert_eq!(monthly[1].users, 40);
        assert_relative_eq!(monthly[1].fee_collected, 1200.0);
        assert_relative_eq!(monthly[1].nii, 1600.0);
        assert_relative_eq!(monthly[1].profit, 7.5);
    }

    #[test]
    fn test_yearly_groups_by_year() {
        let records = vec![record(1, 1, 1.0), record(12, 1, 2.0), record(13, 1, 4.0), record(25, 1, 8.0)];
        let yearly = yearly_summary(&records);

        let periods: Vec<u32> = yearly.iter().map(|r| r.period).collect();
        assert_eq!(periods, vec![1, 2, 3]);
        assert_relative_eq!(yearly[0].profit, 3.0);
        assert_relative_eq!(yearly[1].profit, 4.0);
        assert_relative_eq!(yearly[2].profit, 8.0);
    }

    #[test]
    fn test_empty_records() {
        assert!(monthly_summary(&[]).is_empty());
        assert!(yearly_summary(&[]).is_empty());
    }

    #[test]
    fn test_summaries_match_forecast_totals() {
        let config = ForecastConfig {
            total_market: 100_000_000.0,
            monthly_growth: 1.0,
            ..Default::default()
        };
        let mut inputs = ForecastInputs::default();
        inputs.add_duration(
            6,
            SlabAllocation::from([(5000, 30.0), (10000, 70.0)]),
            default_slot_table(6),
        );
        let result = ForecastEngine::new(config).run(&inputs).unwrap();
        let monthly = monthly_summary(&result.records);
        let yearly = yearly_summary(&result.records);

        assert_eq!(monthly.len() as u32, result.months_run);
        for row in &monthly {
            let profit: f64 = result
                .records
                .iter()
                .filter(|r| r.month == row.period)
                .map(|r| r.profit)
                .sum();
            assert_relative_eq!(row.profit, profit, max_relative = 1e-12);
        }

        let totals = result.summary();
        let yearly_users: u64 = yearly.iter().map(|r| r.users).sum();
        let yearly_profit: f64 = yearly.iter().map(|r| r.profit).sum();
        assert_eq!(yearly_users, totals.total_users);
        assert_relative_eq!(yearly_profit, totals.total_profit, max_relative = 1e-9);
    }
}
