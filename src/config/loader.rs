//! Scenario and committee table loaders
//!
//! Scenarios are JSON files; slab allocations and slot fees can also be
//! maintained as CSV tables and swapped into a scenario.

use super::{Scenario, SlabMap, SlotFee, SlotFeeMap};
use crate::error::{RoscaError, RoscaResult};
use csv::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default scenario location
pub const DEFAULT_SCENARIO_PATH: &str = "data/scenario.json";

/// Load a scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> RoscaResult<Scenario> {
    let file = File::open(path)?;
    load_scenario_from_reader(file)
}

/// Load a scenario from any reader
pub fn load_scenario_from_reader<R: Read>(reader: R) -> RoscaResult<Scenario> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load the scenario shipped in data/
pub fn load_default_scenario() -> RoscaResult<Scenario> {
    load_scenario(DEFAULT_SCENARIO_PATH)
}

/// Raw row of a slab allocation table
#[derive(Debug, serde::Deserialize)]
struct SlabCsvRow {
    #[serde(rename = "Duration")]
    duration: u32,
    #[serde(rename = "Slab")]
    slab: u32,
    #[serde(rename = "Percentage")]
    percentage: f64,
}

/// Raw row of a slot fee table
#[derive(Debug, serde::Deserialize)]
struct SlotCsvRow {
    #[serde(rename = "Duration")]
    duration: u32,
    #[serde(rename = "Slot")]
    slot: u32,
    #[serde(rename = "FeePct")]
    fee_pct: f64,
    #[serde(rename = "Blocked")]
    blocked: String,
}

impl SlotCsvRow {
    fn to_slot_fee(&self) -> RoscaResult<SlotFee> {
        let blocked = match self.blocked.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => true,
            "false" | "no" | "n" | "0" | "" => false,
            _ => {
                return Err(RoscaError::InvalidField {
                    field: "Blocked",
                    value: self.blocked.clone(),
                })
            }
        };

        if self.slot == 0 || self.slot > self.duration {
            return Err(RoscaError::InvalidField {
                field: "Slot",
                value: format!("{} (duration {})", self.slot, self.duration),
            });
        }

        Ok(SlotFee {
            fee_pct: self.fee_pct,
            blocked,
        })
    }
}

/// Load slab allocations (`Duration,Slab,Percentage`) from a CSV file
pub fn load_slab_allocations<P: AsRef<Path>>(path: P) -> RoscaResult<SlabMap> {
    load_slab_allocations_from_reader(File::open(path)?)
}

/// Load slab allocations from any reader
pub fn load_slab_allocations_from_reader<R: Read>(reader: R) -> RoscaResult<SlabMap> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut slabs = SlabMap::new();

    for result in csv_reader.deserialize() {
        let row: SlabCsvRow = result?;
        slabs
            .entry(row.duration)
            .or_default()
            .insert(row.slab, row.percentage);
    }

    Ok(slabs)
}

/// Load slot fees (`Duration,Slot,FeePct,Blocked`) from a CSV file
pub fn load_slot_fees<P: AsRef<Path>>(path: P) -> RoscaResult<SlotFeeMap> {
    load_slot_fees_from_reader(File::open(path)?)
}

/// Load slot fees from any reader
pub fn load_slot_fees_from_reader<R: Read>(reader: R) -> RoscaResult<SlotFeeMap> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut slots = SlotFeeMap::new();

    for result in csv_reader.deserialize() {
        let row: SlotCsvRow = result?;
        let fee = row.to_slot_fee()?;
        slots.entry(row.duration).or_default().insert(row.slot, fee);
    }

    Ok(slots)
}
