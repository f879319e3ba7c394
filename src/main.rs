//! ROSCA Forecast CLI
//!
//! Runs a committee forecast from a scenario file and exports the forecast,
//! monthly summary and yearly summary tables to a workbook.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rosca_forecast::{
    config::{
        load_scenario, load_slab_allocations, load_slot_fees, loader::DEFAULT_SCENARIO_PATH,
        validate_inputs, FeeMethod, Scenario,
    },
    projection::{ForecastEngine, FORECAST_HORIZON_MONTHS},
    report::{export_csv_dir, export_workbook, standard_report, DEFAULT_WORKBOOK_NAME},
};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFeeMethod {
    Upfront,
    Monthly,
}

impl From<CliFeeMethod> for FeeMethod {
    fn from(value: CliFeeMethod) -> Self {
        match value {
            CliFeeMethod::Upfront => FeeMethod::Upfront,
            CliFeeMethod::Monthly => FeeMethod::Monthly,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rosca-forecast", version, about = "ROSCA committee forecast")]
struct Args {
    /// Scenario JSON file
    #[arg(long, default_value = DEFAULT_SCENARIO_PATH)]
    scenario: PathBuf,

    /// Slab allocation CSV (Duration,Slab,Percentage), replaces the scenario's allocations
    #[arg(long)]
    slabs: Option<PathBuf>,

    /// Slot fee CSV (Duration,Slot,FeePct,Blocked), replaces the scenario's slot tables
    #[arg(long)]
    slots: Option<PathBuf>,

    /// Committee durations to forecast, e.g. 3,4,6
    #[arg(long, value_delimiter = ',')]
    durations: Option<Vec<u32>>,

    /// Total market size
    #[arg(long)]
    total_market: Option<f64>,

    /// TAM as % of market
    #[arg(long)]
    tam_pct: Option<f64>,

    /// Starting TAM %
    #[arg(long)]
    start_pct: Option<f64>,

    /// Monthly growth %
    #[arg(long)]
    monthly_growth: Option<f64>,

    /// Yearly TAM growth %
    #[arg(long)]
    yearly_growth: Option<f64>,

    /// KIBOR %
    #[arg(long)]
    kibor: Option<f64>,

    /// Platform spread %
    #[arg(long)]
    spread: Option<f64>,

    /// Default rate %
    #[arg(long)]
    default_rate: Option<f64>,

    /// Default penalty %
    #[arg(long)]
    penalty_pct: Option<f64>,

    /// Fee collection method
    #[arg(long, value_enum)]
    fee_method: Option<CliFeeMethod>,

    /// Months to forecast
    #[arg(long, default_value_t = FORECAST_HORIZON_MONTHS)]
    horizon: u32,

    /// Workbook to write
    #[arg(short, long, default_value = DEFAULT_WORKBOOK_NAME)]
    output: PathBuf,

    /// Also write one CSV per table into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Forecast rows to print
    #[arg(long, default_value_t = 24)]
    preview_rows: usize,

    /// Print run totals as JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply_overrides(&self, scenario: &mut Scenario) -> Result<()> {
        let config = &mut scenario.config;
        let overrides = [
            (self.total_market, &mut config.total_market),
            (self.tam_pct, &mut config.tam_pct),
            (self.start_pct, &mut config.start_pct),
            (self.monthly_growth, &mut config.monthly_growth),
            (self.yearly_growth, &mut config.yearly_growth),
            (self.kibor, &mut config.kibor),
            (self.spread, &mut config.spread),
            (self.default_rate, &mut config.default_rate),
            (self.penalty_pct, &mut config.penalty_pct),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(method) = self.fee_method {
            config.fee_method = method.into();
        }

        if let Some(path) = &self.slabs {
            scenario.inputs.slab_allocations = load_slab_allocations(path)
                .with_context(|| format!("loading slab allocations from {}", path.display()))?;
        }
        if let Some(path) = &self.slots {
            scenario.inputs.slot_fees = load_slot_fees(path)
                .with_context(|| format!("loading slot fees from {}", path.display()))?;
        }
        if let Some(durations) = &self.durations {
            scenario.inputs.select_durations(durations);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut scenario = load_scenario(&args.scenario)
        .with_context(|| format!("loading scenario from {}", args.scenario.display()))?;
    args.apply_overrides(&mut scenario)?;

    let validation = validate_inputs(&scenario.inputs);
    for warning in &validation.warnings {
        eprintln!("Warning: {warning}");
    }
    if scenario.inputs.durations.is_empty() {
        return Ok(());
    }

    let engine = ForecastEngine::new(scenario.config.clone()).with_horizon(args.horizon);
    let result = engine.run(&scenario.inputs).context("running forecast")?;
    let tables = standard_report(&result.records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary())?);
    } else {
        println!("ROSCA Forecast v{}", env!("CARGO_PKG_VERSION"));
        println!("======================\n");
        println!("Durations: {:?}", scenario.inputs.durations);
        println!("  Base users:  {}", scenario.config.base_users());
        println!("  TAM ceiling: {:.0}", result.tam_ceiling);
        println!(
            "  Months run:  {}{}",
            result.months_run,
            if result.tam_exhausted { " (TAM ceiling reached)" } else { "" }
        );
        println!();

        for (i, table) in tables.iter().enumerate() {
            let rows = if i == 0 { args.preview_rows } else { usize::MAX };
            println!("{}:", table.name);
            print!("{}", table.render_preview(rows));
            println!();
        }

        let totals = result.summary();
        println!("Totals:");
        println!("  Records:       {}", totals.total_records);
        println!("  Users:         {}", totals.total_users);
        println!("  Fee Collected: {:.2}", totals.total_fee_collected);
        println!("  NII:           {:.2}", totals.total_nii);
        println!("  Defaults:      {}", totals.total_defaults);
        println!("  Profit:        {:.2}", totals.total_profit);
    }

    export_workbook(&args.output, &tables)
        .with_context(|| format!("writing workbook {}", args.output.display()))?;
    if !args.json {
        println!("\nWorkbook written to: {}", args.output.display());
    }

    if let Some(dir) = &args.csv_dir {
        let written = export_csv_dir(dir, &tables)
            .with_context(|| format!("writing CSV tables to {}", dir.display()))?;
        if !args.json {
            for path in written {
                println!("CSV written to: {}", path.display());
            }
        }
    }

    Ok(())
}
