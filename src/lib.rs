//! ROSCA Forecast - cohort-level financial projections for committee products
//!
//! This library provides:
//! - Market sizing, pricing and committee structure configuration
//! - Advisory validation of slab allocations and slot tables
//! - A monthly forecast engine over duration/slab/slot cohorts
//! - Monthly and yearly aggregation of forecast rows
//! - Workbook and CSV export of the forecast tables
//! - Parallel scenario runs for sensitivity analysis

pub mod error;
pub mod config;
pub mod projection;
pub mod summary;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{RoscaError, RoscaResult};
pub use config::{ForecastConfig, ForecastInputs, FeeMethod, Scenario, SlotFee, validate_slab_total};
pub use projection::{run_forecast, ForecastEngine, ForecastRecord, ForecastResult};
pub use summary::{monthly_summary, yearly_summary, SummaryRow};
pub use report::{export_workbook, standard_report, Table};
pub use scenario::ScenarioRunner;
