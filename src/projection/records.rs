//! Forecast output structures

use serde::{Deserialize, Serialize};

/// One forecast row: a (month, duration, slab, slot) cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    // Timing
    pub month: u32,
    pub year: u32,

    // Cohort
    pub duration: u32,
    pub slab: u32,
    pub slot: u32,
    pub users: u64,

    // Per-user committee value (slab x duration)
    pub deposit_per_user: u64,

    // Fees
    pub fee_pct: f64,
    pub fee_collected: f64,

    // Interest and credit
    pub nii: f64,
    pub defaults: u64,
    pub pre_maturity_loss: f64,
    pub post_maturity_loss: f64,

    pub profit: f64,
}

/// Forecast year (1-indexed) containing a forecast month (1-indexed)
pub fn year_of_month(month: u32) -> u32 {
    (month - 1) / 12 + 1
}

/// Complete forecast result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Emitted rows in month, duration, slab, slot order
    pub records: Vec<ForecastRecord>,

    /// Months simulated before the run stopped
    pub months_run: u32,

    /// Whether the TAM ceiling stopped the run before the horizon
    pub tam_exhausted: bool,

    /// Active users after the last simulated month's growth step
    pub final_active_users: u64,

    /// Cumulative TAM usage tracked by the run
    pub tam_used: u64,

    /// Addressable market ceiling the usage was tested against
    pub tam_ceiling: f64,
}

impl ForecastResult {
    /// Add a forecast row
    pub fn add_record(&mut self, record: ForecastRecord) {
        self.records.push(record);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ForecastTotals {
        ForecastTotals {
            total_records: self.records.len(),
            months_run: self.months_run,
            tam_exhausted: self.tam_exhausted,
            total_users: self.records.iter().map(|r| r.users).sum(),
            total_fee_collected: self.records.iter().map(|r| r.fee_collected).sum(),
            total_nii: self.records.iter().map(|r| r.nii).sum(),
            total_defaults: self.records.iter().map(|r| r.defaults).sum(),
            total_profit: self.records.iter().map(|r| r.profit).sum(),
            final_active_users: self.final_active_users,
        }
    }
}

/// Run-level totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTotals {
    pub total_records: usize,
    pub months_run: u32,
    pub tam_exhausted: bool,
    pub total_users: u64,
    pub total_fee_collected: f64,
    pub total_nii: f64,
    pub total_defaults: u64,
    pub total_profit: f64,
    pub final_active_users: u64,
}
