//! Forecast engine for committee cohort projections

mod state;
mod engine;
mod records;

pub use state::ForecastState;
pub use engine::{run_forecast, ForecastEngine, FORECAST_HORIZON_MONTHS};
pub use records::{year_of_month, ForecastRecord, ForecastResult, ForecastTotals};
