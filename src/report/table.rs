//! Named tabular views of forecast output

use crate::projection::ForecastRecord;
use crate::summary::{monthly_summary, yearly_summary, SummaryRow};
use std::fmt::Write as _;

pub const FORECAST_SHEET: &str = "Forecast";
pub const MONTHLY_SHEET: &str = "Monthly Summary";
pub const YEARLY_SHEET: &str = "Yearly Summary";

const FORECAST_COLUMNS: [&str; 12] = [
    "Month",
    "Year",
    "Duration",
    "Slab",
    "Slot",
    "Users",
    "Deposit/User",
    "Fee %",
    "Fee Collected",
    "NII",
    "Defaults",
    "Profit",
];

const SUMMARY_MEASURES: [&str; 4] = ["Users", "Fee Collected", "NII", "Profit"];

/// A single table value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Int(u64),
    Float(f64),
}

impl Cell {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Cell::Int(v) => v as f64,
            Cell::Float(v) => v,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A named table with a header row
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fixed-width text rendering of the header and the first `max_rows` rows
    pub fn render_preview(&self, max_rows: usize) -> String {
        let shown: Vec<Vec<String>> = self
            .rows
            .iter()
            .take(max_rows)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Int(v) => v.to_string(),
                        Cell::Float(v) => format!("{v:.2}"),
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                shown
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(col.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for (col, &width) in self.columns.iter().zip(&widths) {
            let _ = write!(out, "{col:>width$} ");
        }
        out.push('\n');
        let _ = writeln!(out, "{}", "-".repeat(widths.iter().map(|w| w + 1).sum()));
        for row in &shown {
            for (value, &width) in row.iter().zip(&widths) {
                let _ = write!(out, "{value:>width$} ");
            }
            out.push('\n');
        }
        if self.rows.len() > max_rows {
            let _ = writeln!(out, "... ({} more rows)", self.rows.len() - max_rows);
        }
        out
    }
}

/// Forecast rows as a table
pub fn forecast_table(records: &[ForecastRecord]) -> Table {
    let mut table = Table::new(FORECAST_SHEET, &FORECAST_COLUMNS);
    for r in records {
        table.push_row(vec![
            Cell::Int(r.month as u64),
            Cell::Int(r.year as u64),
            Cell::Int(r.duration as u64),
            Cell::Int(r.slab as u64),
            Cell::Int(r.slot as u64),
            Cell::Int(r.users),
            Cell::Int(r.deposit_per_user),
            Cell::Float(r.fee_pct),
            Cell::Float(r.fee_collected),
            Cell::Float(r.nii),
            Cell::Int(r.defaults),
            Cell::Float(r.profit),
        ]);
    }
    table
}

/// Summary rows as a table keyed by `period_label` ("Month" or "Year")
pub fn summary_table(name: &str, period_label: &str, rows: &[SummaryRow]) -> Table {
    let mut columns = vec![period_label];
    columns.extend(SUMMARY_MEASURES);

    let mut table = Table::new(name, &columns);
    for r in rows {
        table.push_row(vec![
            Cell::Int(r.period as u64),
            Cell::Int(r.users),
            Cell::Float(r.fee_collected),
            Cell::Float(r.nii),
            Cell::Float(r.profit),
        ]);
    }
    table
}

/// Forecast, Monthly Summary and Yearly Summary tables, in export order
pub fn standard_report(records: &[ForecastRecord]) -> Vec<Table> {
    vec![
        forecast_table(records),
        summary_table(MONTHLY_SHEET, "Month", &monthly_summary(records)),
        summary_table(YEARLY_SHEET, "Year", &yearly_summary(records)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_slot_table, ForecastConfig, ForecastInputs, SlabAllocation};
    use crate::projection::ForecastEngine;

    fn sample_records() -> Vec<ForecastRecord> {
        let mut inputs = ForecastInputs::default();
        inputs.add_duration(3, SlabAllocation::from([(1000, 100.0)]), default_slot_table(3));
        ForecastEngine::new(ForecastConfig::default())
            .run(&inputs)
            .unwrap()
            .records
    }

    #[test]
    fn test_standard_report_shapes() {
        let records = sample_records();
        let tables = standard_report(&records);

        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![FORECAST_SHEET, MONTHLY_SHEET, YEARLY_SHEET]);

        assert_eq!(tables[0].columns.len(), 12);
        assert_eq!(tables[0].columns[6], "Deposit/User");
        assert_eq!(tables[0].rows.len(), records.len());
        assert_eq!(tables[1].columns, vec!["Month", "Users", "Fee Collected", "NII", "Profit"]);
        assert_eq!(tables[1].rows.len(), 9);
        assert_eq!(tables[2].columns[0], "Year");
        assert_eq!(tables[2].rows.len(), 1);
    }

    #[test]
    fn test_forecast_row_cells() {
        let records = sample_records();
        let table = forecast_table(&records);
        let first = &table.rows[0];

        assert_eq!(first[0], Cell::Int(1));
        assert_eq!(first[5], Cell::Int(200_000));
        assert_eq!(first[6], Cell::Int(3000));
        assert_eq!(first[10], Cell::Int(2000));
        assert!((first[11].as_f64() - 8_300_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_report() {
        let tables = standard_report(&[]);
        assert!(tables.iter().all(Table::is_empty));
    }

    #[test]
    fn test_render_preview_truncates() {
        let table = forecast_table(&sample_records());
        let text = table.render_preview(2);

        assert!(text.lines().next().unwrap().contains("Fee Collected"));
        // header, rule, two rows, trailer
        assert_eq!(text.lines().count(), 5);
        assert!(text.ends_with("(25 more rows)\n"));
    }
}
