//! Forecast configuration and committee structure definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Committee durations (months) that can be offered
pub const DURATION_CATALOG: [u32; 6] = [3, 4, 5, 6, 8, 10];

/// Per-user slab sizes (currency units) that can be offered
pub const SLAB_CATALOG: [u32; 8] = [1000, 2000, 5000, 10000, 15000, 20000, 25000, 50000];

/// Durations selected when nothing else is specified
pub const DEFAULT_DURATIONS: [u32; 3] = [3, 4, 6];

/// Fee charged on a slot when no fee is specified (%)
pub const DEFAULT_SLOT_FEE_PCT: f64 = 1.0;

/// How platform fees are collected from committee members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeeMethod {
    #[default]
    Upfront,
    Monthly,
}

/// Market sizing and pricing assumptions for one forecast run
///
/// All rates are expressed in percent (e.g. 11.0 for 11%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Total market size (people)
    pub total_market: f64,

    /// Addressable share of the market (%)
    pub tam_pct: f64,

    /// Share of the TAM active in month 1 (%)
    pub start_pct: f64,

    /// Monthly growth of the active user base (%)
    pub monthly_growth: f64,

    /// Yearly TAM growth (%). Carried through, not applied by the engine.
    pub yearly_growth: f64,

    /// Interbank benchmark rate, KIBOR (% p.a.)
    pub kibor: f64,

    /// Platform spread over KIBOR (% p.a.)
    pub spread: f64,

    /// Share of users defaulting each month (%)
    pub default_rate: f64,

    /// Penalty retained on pre-maturity defaults (%)
    pub penalty_pct: f64,

    /// Fee collection method. Carried through, not applied by the engine.
    pub fee_method: FeeMethod,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            total_market: 20_000_000.0,
            tam_pct: 10.0,
            start_pct: 10.0,
            monthly_growth: 2.0,
            yearly_growth: 5.0,
            kibor: 11.0,
            spread: 5.0,
            default_rate: 1.0,
            penalty_pct: 10.0,
            fee_method: FeeMethod::Upfront,
        }
    }
}

impl ForecastConfig {
    /// Addressable market ceiling: total market x TAM share
    pub fn tam_ceiling(&self) -> f64 {
        self.total_market * self.tam_pct / 100.0
    }

    /// Users active in month 1, floored to whole users
    pub fn base_users(&self) -> u64 {
        (self.tam_ceiling() * (self.start_pct / 100.0)) as u64
    }

    /// Monthly rate earned on deposits: (KIBOR + spread) / 12
    pub fn monthly_lending_rate(&self) -> f64 {
        (self.kibor + self.spread) / 100.0 / 12.0
    }
}

/// Fee and availability of one payout slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotFee {
    /// Fee charged on the committee value (%)
    #[serde(default = "default_slot_fee_pct")]
    pub fee_pct: f64,

    /// Blocked slots are not offered
    #[serde(default)]
    pub blocked: bool,
}

fn default_slot_fee_pct() -> f64 {
    DEFAULT_SLOT_FEE_PCT
}

impl Default for SlotFee {
    fn default() -> Self {
        Self {
            fee_pct: DEFAULT_SLOT_FEE_PCT,
            blocked: false,
        }
    }
}

impl SlotFee {
    pub fn new(fee_pct: f64) -> Self {
        Self { fee_pct, blocked: false }
    }

    pub fn blocked(fee_pct: f64) -> Self {
        Self { fee_pct, blocked: true }
    }
}

/// Slab size -> share of active users (%)
pub type SlabAllocation = BTreeMap<u32, f64>;

/// Duration -> slab allocation
pub type SlabMap = BTreeMap<u32, SlabAllocation>;

/// Slot number (1-indexed) -> fee/blocking
pub type SlotTable = BTreeMap<u32, SlotFee>;

/// Duration -> slot table
pub type SlotFeeMap = BTreeMap<u32, SlotTable>;

/// Committee structure consumed by the forecast engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastInputs {
    /// Selected committee durations, in display order
    pub durations: Vec<u32>,

    /// Slab allocation per duration
    pub slab_allocations: SlabMap,

    /// Slot fee table per duration
    pub slot_fees: SlotFeeMap,
}

impl ForecastInputs {
    /// Default selection: 3/4/6 month committees, every slab at 0%, every slot at 1%
    pub fn default_selection() -> Self {
        let mut inputs = Self::default();
        for &duration in &DEFAULT_DURATIONS {
            inputs.add_duration(duration, empty_slab_allocation(), default_slot_table(duration));
        }
        inputs
    }

    /// Add a duration with its slab allocation and slot table
    pub fn add_duration(&mut self, duration: u32, slabs: SlabAllocation, slots: SlotTable) {
        if !self.durations.contains(&duration) {
            self.durations.push(duration);
        }
        self.slab_allocations.insert(duration, slabs);
        self.slot_fees.insert(duration, slots);
    }

    /// Restrict the selection to `durations`, filling defaults for durations not yet configured
    pub fn select_durations(&mut self, durations: &[u32]) {
        self.durations.clear();
        for &duration in durations {
            if self.durations.contains(&duration) {
                continue;
            }
            self.durations.push(duration);
            self.slab_allocations
                .entry(duration)
                .or_insert_with(empty_slab_allocation);
            self.slot_fees
                .entry(duration)
                .or_insert_with(|| default_slot_table(duration));
        }
    }
}

/// Every catalog slab at 0%
pub fn empty_slab_allocation() -> SlabAllocation {
    SLAB_CATALOG.iter().map(|&slab| (slab, 0.0)).collect()
}

/// Slots 1..=duration at the default fee, none blocked
pub fn default_slot_table(duration: u32) -> SlotTable {
    (1..=duration).map(|slot| (slot, SlotFee::default())).collect()
}

/// Full scenario: assumptions plus committee structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub config: ForecastConfig,
    pub inputs: ForecastInputs,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            config: ForecastConfig::default(),
            inputs: ForecastInputs::default_selection(),
        }
    }
}
