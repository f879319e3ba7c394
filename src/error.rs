//! Error types shared across loading, forecasting and export

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoscaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("No slab allocation for {duration}M committees")]
    MissingSlabAllocation { duration: u32 },

    #[error("No slot fee table for {duration}M committees")]
    MissingSlotTable { duration: u32 },

    #[error("Slot {slot} missing from the {duration}M slot fee table")]
    MissingSlot { duration: u32, slot: u32 },
}

pub type RoscaResult<T> = Result<T, RoscaError>;
