//! Advisory validation of forecast inputs
//!
//! Nothing here blocks a forecast run: the engine processes whatever
//! allocations it is given, and callers decide whether to warn or stop.

use super::{ForecastInputs, SlabAllocation, DURATION_CATALOG, SLAB_CATALOG};
use std::fmt;

/// Tolerance on the 100% slab total
pub const SLAB_TOTAL_TOLERANCE: f64 = 0.01;

/// True when the slab percentages add up to 100 (within 0.01)
pub fn validate_slab_total(allocation: &SlabAllocation) -> bool {
    let total: f64 = allocation.values().sum();
    (total - 100.0).abs() < SLAB_TOTAL_TOLERANCE
}

/// A single advisory finding
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    NoDurations,
    DurationNotOffered { duration: u32 },
    SlabTotal { duration: u32, total: f64 },
    SlabNotOffered { duration: u32, slab: u32 },
    PercentOutOfRange { duration: u32, slab: u32, pct: f64 },
    FeeOutOfRange { duration: u32, slot: u32, fee_pct: f64 },
    SlotsMismatch { duration: u32, slots: usize },
    AllSlotsBlocked { duration: u32 },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDurations => {
                write!(f, "Please select at least one committee duration to begin forecast")
            }
            Self::DurationNotOffered { duration } => {
                write!(f, "{duration}M is not an offered committee duration")
            }
            Self::SlabTotal { duration, total } => {
                write!(f, "{duration}M slab allocation totals {total:.2}%: total must equal 100%")
            }
            Self::SlabNotOffered { duration, slab } => {
                write!(f, "{duration}M: slab {slab} is not an offered slab size")
            }
            Self::PercentOutOfRange { duration, slab, pct } => {
                write!(f, "{duration}M: slab {slab} allocation {pct}% is outside 0-100%")
            }
            Self::FeeOutOfRange { duration, slot, fee_pct } => {
                write!(f, "{duration}M: slot {slot} fee {fee_pct}% is outside 0-100%")
            }
            Self::SlotsMismatch { duration, slots } => {
                write!(f, "{duration}M: expected slots 1..={duration}, found {slots} entries")
            }
            Self::AllSlotsBlocked { duration } => {
                write!(f, "{duration}M: every slot is blocked, no users will be forecast")
            }
        }
    }
}

/// Collected warnings for one set of inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Emit each warning through the log facade
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            log::warn!("{warning}");
        }
    }
}

/// Check a full input set and report everything that looks off
pub fn validate_inputs(inputs: &ForecastInputs) -> ValidationReport {
    let mut warnings = Vec::new();

    if inputs.durations.is_empty() {
        warnings.push(ValidationWarning::NoDurations);
    }

    for &duration in &inputs.durations {
        if !DURATION_CATALOG.contains(&duration) {
            warnings.push(ValidationWarning::DurationNotOffered { duration });
        }

        if let Some(allocation) = inputs.slab_allocations.get(&duration) {
            for (&slab, &pct) in allocation {
                if !SLAB_CATALOG.contains(&slab) {
                    warnings.push(ValidationWarning::SlabNotOffered { duration, slab });
                }
                if !(0.0..=100.0).contains(&pct) {
                    warnings.push(ValidationWarning::PercentOutOfRange { duration, slab, pct });
                }
            }
            if !validate_slab_total(allocation) {
                warnings.push(ValidationWarning::SlabTotal {
                    duration,
                    total: allocation.values().sum(),
                });
            }
        }

        if let Some(slots) = inputs.slot_fees.get(&duration) {
            let expected = (1..=duration).all(|slot| slots.contains_key(&slot));
            if !expected || slots.len() != duration as usize {
                warnings.push(ValidationWarning::SlotsMismatch {
                    duration,
                    slots: slots.len(),
                });
            }
            for (&slot, fee) in slots {
                if !(0.0..=100.0).contains(&fee.fee_pct) {
                    warnings.push(ValidationWarning::FeeOutOfRange {
                        duration,
                        slot,
                        fee_pct: fee.fee_pct,
                    });
                }
            }
            if !slots.is_empty() && slots.values().all(|fee| fee.blocked) {
                warnings.push(ValidationWarning::AllSlotsBlocked { duration });
            }
        }
    }

    ValidationReport { warnings }
}
