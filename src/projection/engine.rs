//! Core forecast engine for monthly committee cohort projections

use super::records::{ForecastRecord, ForecastResult};
use super::state::ForecastState;
use crate::config::{ForecastConfig, ForecastInputs, SlabMap, SlotFee, SlotFeeMap};
use crate::error::{RoscaError, RoscaResult};

/// Months simulated unless the TAM ceiling is reached first
pub const FORECAST_HORIZON_MONTHS: u32 = 60;

/// Main forecast engine
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: ForecastConfig,
    horizon_months: u32,
}

impl ForecastEngine {
    /// Create a new forecast engine over the standard 60 month horizon
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config,
            horizon_months: FORECAST_HORIZON_MONTHS,
        }
    }

    /// Override the number of months to simulate
    pub fn with_horizon(mut self, horizon_months: u32) -> Self {
        self.horizon_months = horizon_months;
        self
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Run the forecast over a committee structure
    pub fn run(&self, inputs: &ForecastInputs) -> RoscaResult<ForecastResult> {
        self.project(&inputs.durations, &inputs.slab_allocations, &inputs.slot_fees)
    }

    /// Run the forecast over explicit durations, slab allocations and slot fees
    pub fn project(
        &self,
        durations: &[u32],
        slab_map: &SlabMap,
        slot_fees: &SlotFeeMap,
    ) -> RoscaResult<ForecastResult> {
        check_structure(durations, slab_map, slot_fees)?;

        let tam_ceiling = self.config.tam_ceiling();
        let mut state = ForecastState::from_config(&self.config);
        let mut result = ForecastResult {
            tam_ceiling,
            ..Default::default()
        };

        log::debug!(
            "Starting forecast: {} base users, TAM ceiling {:.0}, {} durations",
            state.active_users,
            tam_ceiling,
            durations.len()
        );

        for _month in 1..=self.horizon_months {
            state.advance_month();

            let emitted = result.records.len();
            for &duration in durations {
                self.project_duration(&state, duration, slab_map, slot_fees, &mut result)?;
            }

            log::debug!(
                "Month {}: {} active users, {} records",
                state.month,
                state.active_users,
                result.records.len() - emitted
            );

            state.grow(self.config.monthly_growth);
            result.months_run = state.month;

            if state.tam_exhausted(tam_ceiling) {
                result.tam_exhausted = true;
                break;
            }
        }

        result.final_active_users = state.active_users;
        result.tam_used = state.tam_used;

        if result.tam_exhausted {
            log::info!(
                "TAM ceiling reached after {} months ({} users tracked)",
                result.months_run,
                result.tam_used
            );
        }
        log::info!(
            "Forecast complete: {} records over {} months",
            result.records.len(),
            result.months_run
        );

        Ok(result)
    }

    /// Emit every slab/slot record for one duration in the current month
    fn project_duration(
        &self,
        state: &ForecastState,
        duration: u32,
        slab_map: &SlabMap,
        slot_fees: &SlotFeeMap,
        result: &mut ForecastResult,
    ) -> RoscaResult<()> {
        let allocation = slab_map
            .get(&duration)
            .ok_or(RoscaError::MissingSlabAllocation { duration })?;
        let slots = slot_fees
            .get(&duration)
            .ok_or(RoscaError::MissingSlotTable { duration })?;

        for (&slab, &pct) in allocation {
            if pct <= 0.0 {
                continue;
            }
            let users = (state.active_users as f64 * (pct / 100.0)) as u64;

            for slot in 1..=duration {
                let slot_fee = slots
                    .get(&slot)
                    .ok_or(RoscaError::MissingSlot { duration, slot })?;
                if slot_fee.blocked {
                    continue;
                }
                result.add_record(self.calculate_slot(state, duration, slab, slot, users, slot_fee));
            }
        }

        Ok(())
    }

    /// Fees, interest, default losses and profit for one slot cohort
    fn calculate_slot(
        &self,
        state: &ForecastState,
        duration: u32,
        slab: u32,
        slot: u32,
        users: u64,
        slot_fee: &SlotFee,
    ) -> ForecastRecord {
        let deposit = slab as u64 * duration as u64;
        let deposit_f = deposit as f64;
        let users_f = users as f64;

        let fee = deposit_f * (slot_fee.fee_pct / 100.0);
        let fee_collected = fee * users_f;

        // One month of simple interest on the full committee value
        let nii = deposit_f * users_f * self.config.monthly_lending_rate();

        // Defaults split evenly; pre-maturity losses are reduced by the penalty
        let defaults = (users_f * self.config.default_rate / 100.0) as u64;
        let pre = defaults / 2;
        let post = defaults - pre;
        let pre_maturity_loss = pre as f64 * deposit_f * (1.0 - self.config.penalty_pct / 100.0);
        let post_maturity_loss = post as f64 * deposit_f;

        let profit = fee_collected + nii - pre_maturity_loss - post_maturity_loss;

        ForecastRecord {
            month: state.month,
            year: state.year,
            duration,
            slab,
            slot,
            users,
            deposit_per_user: deposit,
            fee_pct: slot_fee.fee_pct,
            fee_collected,
            nii,
            defaults,
            pre_maturity_loss,
            post_maturity_loss,
            profit,
        }
    }
}

/// Every selected duration needs a slab allocation and a slot table
fn check_structure(durations: &[u32], slab_map: &SlabMap, slot_fees: &SlotFeeMap) -> RoscaResult<()> {
    for &duration in durations {
        if !slab_map.contains_key(&duration) {
            return Err(RoscaError::MissingSlabAllocation { duration });
        }
        let slots = slot_fees
            .get(&duration)
            .ok_or(RoscaError::MissingSlotTable { duration })?;
        if let Some(slot) = (1..=duration).find(|slot| !slots.contains_key(slot)) {
            return Err(RoscaError::MissingSlot { duration, slot });
        }
    }
    Ok(())
}

/// Run a forecast over the standard horizon and return its rows
pub fn run_forecast(
    config: &ForecastConfig,
    durations: &[u32],
    slab_map: &SlabMap,
    slot_fees: &SlotFeeMap,
) -> RoscaResult<Vec<ForecastRecord>> {
    let engine = ForecastEngine::new(config.clone());
    Ok(engine.project(durations, slab_map, slot_fees)?.records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_slot_table, SlabAllocation, SlotTable};
    use approx::assert_relative_eq;
    use std::collections::BTreeSet;

    fn single_slab_inputs(duration: u32, slab: u32) -> ForecastInputs {
        let mut inputs = ForecastInputs::default();
        inputs.add_duration(
            duration,
            SlabAllocation::from([(slab, 100.0)]),
            default_slot_table(duration),
        );
        inputs
    }

    fn mixed_inputs() -> ForecastInputs {
        let mut inputs = ForecastInputs::default();
        inputs.add_duration(
            3,
            SlabAllocation::from([(1000, 40.0), (2000, 0.0), (5000, 60.0)]),
            default_slot_table(3),
        );
        let mut slots = default_slot_table(4);
        slots.insert(2, SlotFee::blocked(1.0));
        inputs.add_duration(4, SlabAllocation::from([(10000, 100.0)]), slots);
        inputs
    }

    #[test]
    fn test_first_month_figures() {
        let engine = ForecastEngine::new(ForecastConfig::default());
        let result = engine.run(&single_slab_inputs(3, 1000)).unwrap();

        let row = &result.records[0];
        assert_eq!((row.month, row.year, row.duration, row.slab, row.slot), (1, 1, 3, 1000, 1));
        assert_eq!(row.users, 200_000);
        assert_eq!(row.deposit_per_user, 3000);
        assert_eq!(row.fee_pct, 1.0);
        assert_relative_eq!(row.fee_collected, 6_000_000.0, max_relative = 1e-12);
        // 3000 * 200000 * (16 / 100 / 12)
        assert_relative_eq!(row.nii, 8_000_000.0, max_relative = 1e-12);
        assert_eq!(row.defaults, 2_000);
        assert_relative_eq!(row.pre_maturity_loss, 2_700_000.0, max_relative = 1e-12);
        assert_relative_eq!(row.post_maturity_loss, 3_000_000.0, max_relative = 1e-12);
        assert_relative_eq!(row.profit, 8_300_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_tam_ceiling_stops_run() {
        let engine = ForecastEngine::new(ForecastConfig::default());
        let result = engine.run(&single_slab_inputs(3, 1000)).unwrap();

        // 200000 base, 2% growth: cumulative usage passes 2,000,000 after month 9
        assert!(result.tam_exhausted);
        assert_eq!(result.months_run, 9);
        assert!(result.tam_used as f64 >= result.tam_ceiling);
        assert_eq!(result.records.len(), 9 * 3);
        assert_eq!(result.records.last().unwrap().month, 9);

        // Month 2 uses the grown base
        let month_two = result.records.iter().find(|r| r.month == 2).unwrap();
        assert_eq!(month_two.users, 204_000);
    }

    #[test]
    fn test_full_horizon_without_ceiling() {
        let config = ForecastConfig {
            total_market: 1_000_000_000.0,
            start_pct: 0.1,
            monthly_growth: 0.0,
            ..Default::default()
        };
        let result = ForecastEngine::new(config).run(&single_slab_inputs(4, 2000)).unwrap();

        assert!(!result.tam_exhausted);
        assert_eq!(result.months_run, FORECAST_HORIZON_MONTHS);
        let months: BTreeSet<u32> = result.records.iter().map(|r| r.month).collect();
        assert_eq!(months.len(), 60);
        assert_eq!(result.records.len(), 60 * 4);
    }

    #[test]
    fn test_custom_horizon() {
        let config = ForecastConfig {
            monthly_growth: 0.0,
            total_market: 1_000_000_000.0,
            start_pct: 0.1,
            ..Default::default()
        };
        let result = ForecastEngine::new(config)
            .with_horizon(6)
            .run(&single_slab_inputs(3, 1000))
            .unwrap();
        assert_eq!(result.months_run, 6);
        assert_eq!(result.records.len(), 18);
    }

    #[test]
    fn test_record_order_and_year() {
        let result = ForecastEngine::new(ForecastConfig::default())
            .run(&mixed_inputs())
            .unwrap();

        let month_one: Vec<(u32, u32, u32)> = result
            .records
            .iter()
            .filter(|r| r.month == 1)
            .map(|r| (r.duration, r.slab, r.slot))
            .collect();
        assert_eq!(
            month_one,
            vec![
                (3, 1000, 1),
                (3, 1000, 2),
                (3, 1000, 3),
                (3, 5000, 1),
                (3, 5000, 2),
                (3, 5000, 3),
                (4, 10000, 1),
                (4, 10000, 3),
                (4, 10000, 4),
            ]
        );

        for record in &result.records {
            assert_eq!(record.year, (record.month - 1) / 12 + 1);
        }
        assert!(result.records.windows(2).all(|w| w[0].month <= w[1].month));
    }

    #[test]
    fn test_zero_slab_and_blocked_slot_emit_nothing() {
        let inputs = mixed_inputs();
        let result = ForecastEngine::new(ForecastConfig::default()).run(&inputs).unwrap();

        assert!(!result.records.iter().any(|r| r.slab == 2000));
        assert!(!result.records.iter().any(|r| r.duration == 4 && r.slot == 2));
        for record in &result.records {
            assert!(!inputs.slot_fees[&record.duration][&record.slot].blocked);
            assert!(inputs.slab_allocations[&record.duration][&record.slab] > 0.0);
        }
    }

    #[test]
    fn test_all_slots_blocked_for_one_duration() {
        let mut inputs = single_slab_inputs(3, 1000);
        let blocked: SlotTable = (1..=5).map(|slot| (slot, SlotFee::blocked(1.0))).collect();
        inputs.add_duration(5, SlabAllocation::from([(1000, 100.0)]), blocked);

        let result = ForecastEngine::new(ForecastConfig::default()).run(&inputs).unwrap();

        assert!(!result.records.is_empty());
        assert!(result.records.iter().all(|r| r.duration == 3));
    }

    #[test]
    fn test_empty_durations() {
        let records = run_forecast(
            &ForecastConfig::default(),
            &[],
            &SlabMap::new(),
            &SlotFeeMap::new(),
        )
        .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_allocations_need_not_total_100() {
        let mut inputs = ForecastInputs::default();
        inputs.add_duration(
            3,
            SlabAllocation::from([(1000, 80.0), (2000, 70.0)]),
            default_slot_table(3),
        );
        let result = ForecastEngine::new(ForecastConfig::default()).run(&inputs).unwrap();

        let month_one_users: u64 = result
            .records
            .iter()
            .filter(|r| r.month == 1 && r.slot == 1)
            .map(|r| r.users)
            .sum();
        assert_eq!(month_one_users, 160_000 + 140_000);
    }

    #[test]
    fn test_defaults_split_odd_count() {
        let config = ForecastConfig {
            total_market: 3_000.0,
            tam_pct: 100.0,
            start_pct: 100.0,
            default_rate: 10.0,
            penalty_pct: 50.0,
            ..Default::default()
        };
        let result = run_forecast(
            &config,
            &[3],
            &SlabMap::from([(3, SlabAllocation::from([(1000, 5.0)]))]),
            &SlotFeeMap::from([(3, default_slot_table(3))]),
        )
        .unwrap();

        // 150 users, 15 defaults: 7 pre-maturity, 8 post-maturity
        let row = &result[0];
        assert_eq!(row.users, 150);
        assert_eq!(row.defaults, 15);
        assert_relative_eq!(row.pre_maturity_loss, 7.0 * 3000.0 * 0.5);
        assert_relative_eq!(row.post_maturity_loss, 8.0 * 3000.0);
        // Base usage equals the ceiling: only month 1 runs
        assert!(result.iter().all(|r| r.month == 1));
    }

    #[test]
    fn test_missing_structure_is_an_error() {
        let config = ForecastConfig::default();
        let slabs = SlabMap::from([(3, SlabAllocation::from([(1000, 100.0)]))]);

        let err = run_forecast(&config, &[3], &SlabMap::new(), &SlotFeeMap::new()).unwrap_err();
        assert!(matches!(err, RoscaError::MissingSlabAllocation { duration: 3 }));

        let err = run_forecast(&config, &[3], &slabs, &SlotFeeMap::new()).unwrap_err();
        assert!(matches!(err, RoscaError::MissingSlotTable { duration: 3 }));

        let mut slots = default_slot_table(3);
        slots.remove(&2);
        let err = run_forecast(&config, &[3], &slabs, &SlotFeeMap::from([(3, slots)])).unwrap_err();
        assert!(matches!(err, RoscaError::MissingSlot { duration: 3, slot: 2 }));
    }

    #[test]
    fn test_unused_inputs_do_not_change_results() {
        let inputs = mixed_inputs();
        let base = ForecastEngine::new(ForecastConfig::default()).run(&inputs).unwrap();

        let varied = ForecastConfig {
            yearly_growth: 50.0,
            fee_method: crate::config::FeeMethod::Monthly,
            ..Default::default()
        };
        let other = ForecastEngine::new(varied).run(&inputs).unwrap();

        assert_eq!(base.records, other.records);
    }
}
