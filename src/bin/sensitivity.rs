//! Sensitivity sweep over monthly growth and KIBOR
//!
//! Runs one forecast per (growth, KIBOR) pair against a scenario's committee
//! structure and prints run totals. Supports JSON output via --json.

use anyhow::{Context, Result};
use clap::Parser;
use rosca_forecast::{
    config::{load_scenario, loader::DEFAULT_SCENARIO_PATH, validate_inputs, ForecastConfig},
    projection::ForecastTotals,
    ScenarioRunner,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "sensitivity", about = "Forecast sensitivity to growth and KIBOR")]
struct Args {
    /// Scenario JSON file
    #[arg(long, default_value = DEFAULT_SCENARIO_PATH)]
    scenario: PathBuf,

    /// Monthly growth rates (%) to sweep
    #[arg(long, value_delimiter = ',', default_values_t = [1.0, 2.0, 3.0])]
    growth: Vec<f64>,

    /// KIBOR rates (%) to sweep
    #[arg(long, value_delimiter = ',', default_values_t = [9.0, 11.0, 13.0])]
    kibor: Vec<f64>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SweepRow {
    monthly_growth: f64,
    kibor: f64,
    #[serde(flatten)]
    totals: ForecastTotals,
}

#[derive(Serialize)]
struct SweepResponse {
    scenario: String,
    runs: Vec<SweepRow>,
    execution_time_ms: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let scenario = load_scenario(&args.scenario)
        .with_context(|| format!("loading scenario from {}", args.scenario.display()))?;
    validate_inputs(&scenario.inputs).log_warnings();

    let configs: Vec<ForecastConfig> = args
        .growth
        .iter()
        .flat_map(|&monthly_growth| {
            let base = scenario.config.clone();
            args.kibor.iter().map(move |&kibor| ForecastConfig {
                monthly_growth,
                kibor,
                ..base.clone()
            })
        })
        .collect();

    let runner = ScenarioRunner::from_scenario(scenario);
    let results = runner.run_batch(&configs).context("running sweep")?;

    let runs: Vec<SweepRow> = configs
        .iter()
        .zip(&results)
        .map(|(config, result)| SweepRow {
            monthly_growth: config.monthly_growth,
            kibor: config.kibor,
            totals: result.summary(),
        })
        .collect();

    if args.json {
        let response = SweepResponse {
            scenario: args.scenario.display().to_string(),
            runs,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    println!("{:>8} {:>8} {:>7} {:>14} {:>18} {:>18} {:>18}",
        "Growth%", "KIBOR%", "Months", "Users", "Fee Collected", "NII", "Profit");
    println!("{}", "-".repeat(97));
    for row in &runs {
        println!("{:>8.2} {:>8.2} {:>7} {:>14} {:>18.2} {:>18.2} {:>18.2}",
            row.monthly_growth,
            row.kibor,
            row.totals.months_run,
            row.totals.total_users,
            row.totals.total_fee_collected,
            row.totals.total_nii,
            row.totals.total_profit,
        );
    }
    println!("\n{} runs in {:?}", runs.len(), start.elapsed());

    Ok(())
}
