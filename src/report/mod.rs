//! Report tables and spreadsheet export

mod table;
mod export;

pub use table::{
    forecast_table, standard_report, summary_table, Cell, Table, FORECAST_SHEET, MONTHLY_SHEET,
    YEARLY_SHEET,
};
pub use export::{
    build_workbook, export_csv_dir, export_workbook, sheet_name, workbook_bytes,
    DEFAULT_WORKBOOK_NAME, MAX_SHEET_NAME_LEN,
};
