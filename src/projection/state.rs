//! Forecast state carried between months

use crate::config::ForecastConfig;

/// State of the active user base at a point in time during a forecast
#[derive(Debug, Clone)]
pub struct ForecastState {
    /// Current forecast month (1-indexed, 0 before the first month)
    pub month: u32,

    /// Forecast year (1-indexed)
    pub year: u32,

    /// Active users at the start of the current month
    pub active_users: u64,

    /// Cumulative active users tracked against the TAM ceiling.
    /// Adds the post-growth active base each month, not the users split
    /// across slabs and slots.
    pub tam_used: u64,
}

impl ForecastState {
    /// Initialize state at forecast start
    pub fn from_config(config: &ForecastConfig) -> Self {
        let base_users = config.base_users();
        Self {
            month: 0,
            year: 1,
            active_users: base_users,
            tam_used: base_users,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
        self.year = super::year_of_month(self.month);
    }

    /// Compound the active base by the monthly growth rate and track TAM usage
    pub fn grow(&mut self, monthly_growth_pct: f64) {
        self.active_users = (self.active_users as f64 * (1.0 + monthly_growth_pct / 100.0)) as u64;
        self.tam_used += self.active_users;
    }

    /// Whether cumulative usage has reached the addressable market
    pub fn tam_exhausted(&self, tam_ceiling: f64) -> bool {
        self.tam_used as f64 >= tam_ceiling
    }
}
