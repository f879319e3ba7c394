//! Scenario runner for batch forecasts
//!
//! Holds one committee structure, then runs any number of assumption sets
//! against it without reloading the scenario files.

use crate::config::{ForecastConfig, ForecastInputs, Scenario};
use crate::error::RoscaResult;
use crate::projection::{ForecastEngine, ForecastResult};
use rayon::prelude::*;

/// Pre-loaded scenario runner for sensitivity analysis
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_scenario(load_default_scenario()?);
///
/// let configs: Vec<_> = [9.0, 11.0, 13.0]
///     .iter()
///     .map(|&kibor| ForecastConfig { kibor, ..Default::default() })
///     .collect();
/// let results = runner.run_batch(&configs)?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    inputs: ForecastInputs,
    horizon_months: Option<u32>,
}

impl ScenarioRunner {
    /// Create runner over the default 3/4/6 month selection
    pub fn new() -> Self {
        Self::with_inputs(ForecastInputs::default_selection())
    }

    /// Create runner over a pre-built committee structure
    pub fn with_inputs(inputs: ForecastInputs) -> Self {
        Self {
            inputs,
            horizon_months: None,
        }
    }

    /// Create runner from a loaded scenario, keeping its committee structure
    pub fn from_scenario(scenario: Scenario) -> Self {
        Self::with_inputs(scenario.inputs)
    }

    /// Override the forecast horizon for every run
    pub fn with_horizon(mut self, horizon_months: u32) -> Self {
        self.horizon_months = Some(horizon_months);
        self
    }

    fn engine(&self, config: ForecastConfig) -> ForecastEngine {
        let engine = ForecastEngine::new(config);
        match self.horizon_months {
            Some(months) => engine.with_horizon(months),
            None => engine,
        }
    }

    /// Run a single forecast with the given assumptions
    pub fn run(&self, config: ForecastConfig) -> RoscaResult<ForecastResult> {
        self.engine(config).run(&self.inputs)
    }

    /// Run forecasts for many assumption sets in parallel, results in input order
    pub fn run_batch(&self, configs: &[ForecastConfig]) -> RoscaResult<Vec<ForecastResult>> {
        configs
            .par_iter()
            .map(|config| self.run(config.clone()))
            .collect()
    }

    /// Get reference to the committee structure
    pub fn inputs(&self) -> &ForecastInputs {
        &self.inputs
    }

    /// Get mutable reference to the committee structure for customization
    pub fn inputs_mut(&mut self) -> &mut ForecastInputs {
        &mut self.inputs
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
