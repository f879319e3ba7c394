//! Forecast configuration, committee structures, loaders and validation

mod data;
pub mod loader;
pub mod validate;

pub use data::{
    default_slot_table, empty_slab_allocation, FeeMethod, ForecastConfig, ForecastInputs,
    Scenario, SlabAllocation, SlabMap, SlotFee, SlotFeeMap, SlotTable, DEFAULT_DURATIONS,
    DEFAULT_SLOT_FEE_PCT, DURATION_CATALOG, SLAB_CATALOG,
};
pub use loader::{load_default_scenario, load_scenario, load_slab_allocations, load_slot_fees};
pub use validate::{validate_inputs, validate_slab_total, ValidationReport, ValidationWarning};
