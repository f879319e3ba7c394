//! Workbook and CSV export of report tables

use super::table::Table;
use crate::error::RoscaResult;
use rust_xlsxwriter::{Format, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

/// Longest sheet name a workbook accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Default workbook file name
pub const DEFAULT_WORKBOOK_NAME: &str = "rosca_forecast.xlsx";

/// Truncate a table name to a valid sheet name length
pub fn sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_LEN).collect()
}

/// Build an in-memory workbook with one sheet per table
pub fn build_workbook(tables: &[Table]) -> RoscaResult<Workbook> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for table in tables {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(&table.name))?;

        for (col, name) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, name, &header)?;
        }

        for (i, row) in table.rows.iter().enumerate() {
            let row_idx = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                worksheet.write_number(row_idx, col as u16, cell.as_f64())?;
            }
        }

        worksheet.set_freeze_panes(1, 0)?;
    }

    Ok(workbook)
}

/// Serialize the workbook to xlsx bytes
pub fn workbook_bytes(tables: &[Table]) -> RoscaResult<Vec<u8>> {
    let mut workbook = build_workbook(tables)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write all tables to a single xlsx file
pub fn export_workbook<P: AsRef<Path>>(path: P, tables: &[Table]) -> RoscaResult<()> {
    let path = path.as_ref();
    let mut workbook = build_workbook(tables)?;
    workbook.save(path)?;

    log::info!("Wrote {} sheets to {}", tables.len(), path.display());
    Ok(())
}

/// Write each table to `<dir>/<sheet name>.csv`, returning the files written
pub fn export_csv_dir<P: AsRef<Path>>(dir: P, tables: &[Table]) -> RoscaResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(tables.len());
    for table in tables {
        let path = dir.join(format!("{}.csv", sheet_name(&table.name)));
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        writer.flush()?;

        log::info!("Wrote {} rows to {}", table.rows.len(), path.display());
        written.push(path);
    }

    Ok(written)
}
