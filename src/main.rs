use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ev_breakeven::analysis::cost::monetize;
use ev_breakeven::constants::DEFAULT_CARBON_PRICE_PER_TONNE;
use ev_breakeven::io::grid_factors::{GridFactorTable, GridMode};
use ev_breakeven::io::manufacturing::ManufacturingTable;
use ev_breakeven::io::reporting;
use ev_breakeven::io::scenario::ScenarioInputs;
use ev_breakeven::simulation::sweep::sweep;
use ev_breakeven::{run_simulation, Breakeven, SimulationConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GridModeArg {
    /// Combined-margin factor
    Average,
    /// Operating-margin factor, falls back to average when missing
    Marginal,
}

impl From<GridModeArg> for GridMode {
    fn from(arg: GridModeArg) -> Self {
        match arg {
            GridModeArg::Average => GridMode::Average,
            GridModeArg::Marginal => GridMode::Marginal,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ev-breakeven", version)]
#[command(about = "Lifecycle carbon breakeven between an EV and an ICE vehicle")]
struct Args {
    /// JSON scenario file; missing fields take defaults
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Grid factor table (country, carbon_intensity_average, carbon_intensity_marginal)
    #[arg(long)]
    grid_factors: Option<PathBuf>,

    /// Manufacturing baseline table
    #[arg(long)]
    manufacturing: Option<PathBuf>,

    /// Country to look up in the grid factor table
    #[arg(long)]
    country: Option<String>,

    #[arg(long, value_enum, default_value_t = GridModeArg::Average)]
    grid_mode: GridModeArg,

    /// Relative change applied to the grid intensity (%)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    grid_uncertainty_pct: f64,

    /// Grid intensity override (gCO2/kWh), replaces the table lookup
    #[arg(long)]
    grid_g_per_kwh: Option<f64>,

    /// ICE fuel economy (MPG)
    #[arg(long)]
    ice_mpg: Option<f64>,

    /// ICE real-world MPG penalty (%)
    #[arg(long)]
    ice_penalty_pct: Option<f64>,

    /// EV consumption (kWh/100km)
    #[arg(long)]
    ev_kwh_per_100km: Option<f64>,

    /// EV efficiency degradation over the lifecycle (%)
    #[arg(long)]
    ev_degradation_pct: Option<f64>,

    /// Annual driving distance (km)
    #[arg(long)]
    annual_km: Option<f64>,

    /// Annual grid decarbonization rate (%)
    #[arg(long)]
    decarbonization_pct: Option<f64>,

    #[arg(long)]
    ev_manufacturing_kg: Option<f64>,

    #[arg(long)]
    ice_manufacturing_kg: Option<f64>,

    /// Carbon price ($/tCO2)
    #[arg(long, default_value_t = DEFAULT_CARBON_PRICE_PER_TONNE)]
    carbon_price: f64,

    /// Print totals at this distance (km)
    #[arg(long)]
    inspect_km: Option<f64>,

    #[arg(long, default_value = "breakeven_scenario.csv")]
    output: PathBuf,

    /// Comma-separated EV manufacturing debts (kg) to sweep
    #[arg(long, value_delimiter = ',')]
    sweep_ev_debt: Vec<f64>,
}

impl Args {
    fn load_config(&self) -> Result<SimulationConfig> {
        let base = match &self.scenario {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading scenario {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing scenario {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };

        let grid = self
            .grid_factors
            .as_ref()
            .map(GridFactorTable::from_csv_path)
            .transpose()?;
        let manufacturing = self
            .manufacturing
            .as_ref()
            .map(ManufacturingTable::from_csv_path)
            .transpose()?;

        let inputs = ScenarioInputs {
            country: self.country.clone(),
            grid_mode: self.grid_mode.into(),
            grid_uncertainty_pct: self.grid_uncertainty_pct,
            grid_override_g_per_kwh: self.grid_g_per_kwh,
        };
        let mut config = inputs.assemble(base, grid.as_ref(), manufacturing.as_ref())?;

        let percent = |v: f64| v / 100.0;
        if let Some(v) = self.ice_mpg {
            config.ice_rated_mpg = v;
        }
        if let Some(v) = self.ice_penalty_pct {
            config.ice_real_world_penalty = percent(v);
        }
        if let Some(v) = self.ev_kwh_per_100km {
            config.ev_kwh_per_100km = v;
        }
        if let Some(v) = self.ev_degradation_pct {
            config.ev_degradation = percent(v);
        }
        if let Some(v) = self.annual_km {
            config.annual_km = v;
        }
        if let Some(v) = self.decarbonization_pct {
            config.annual_decarbonization_rate = percent(v);
        }
        if let Some(v) = self.ev_manufacturing_kg {
            config.ev_manufacturing_kg = v;
        }
        if let Some(v) = self.ice_manufacturing_kg {
            config.ice_manufacturing_kg = v;
        }
        Ok(config)
    }
}

fn describe(breakeven: &Breakeven, annual_km: f64) -> String {
    match breakeven {
        Breakeven::At { distance_km, .. } => format!(
            "{distance_km:.0} km ({:.1} years)",
            distance_km / annual_km
        ),
        Breakeven::Never => "NEVER within range".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("=== EV vs ICE Lifecycle Carbon Breakeven ===");

    // 1. ASSEMBLE AND VALIDATE THE SCENARIO
    let config = args.load_config()?;
    let validated = config.clone().validate().context("invalid scenario")?;

    // 2. RUN
    let outcome = run_simulation(&validated)?;

    // 3. SUMMARY
    println!(
        "Manufacturing carbon debt (EV - ICE): {:.0} kg CO2",
        outcome.manufacturing_gap_kg()
    );
    println!(
        "Grid intensity (selected): {:.0} gCO2/kWh",
        validated.grid_base_g_per_kwh
    );
    println!("ICE slope: {:.1} gCO2/km", outcome.ice_slope_g_per_km);
    println!(
        "Breakeven: {}",
        describe(&outcome.breakeven, validated.annual_km)
    );
    let savings = outcome.lifecycle_savings_kg();
    println!(
        "Lifecycle savings (ICE - EV): {:.0} kg CO2, worth ${:.2} at ${}/tCO2",
        savings,
        outcome.lifecycle_savings_value(args.carbon_price)?,
        args.carbon_price
    );

    // 4. DISTANCE INSPECTOR
    if let Some(km) = args.inspect_km {
        let snap = outcome.inspect(km);
        let label = if snap.ev_ahead() {
            "EV advantage"
        } else {
            "EV disadvantage"
        };
        println!("\nAt {:.0} km:", snap.distance_km);
        println!("  ICE total: {:.0} kg CO2", snap.ice_total_kg);
        println!("  EV total:  {:.0} kg CO2", snap.ev_total_kg);
        println!("  Difference (ICE - EV): {:.0} kg CO2 ({label})", snap.delta_kg);
        println!(
            "  Monetized difference: ${:.2}",
            monetize(snap.delta_kg, args.carbon_price)?
        );
    }

    // 5. SENSITIVITY SWEEP
    if !args.sweep_ev_debt.is_empty() {
        println!("\n=== EV manufacturing debt sweep ===");
        let results = sweep(&config, &args.sweep_ev_debt, |c, v| {
            c.ev_manufacturing_kg = v
        });
        for (value, result) in args.sweep_ev_debt.iter().zip(results) {
            match result {
                Ok(point) => println!(
                    "{:>8.0} kg -> {}",
                    point.value,
                    describe(&point.breakeven, validated.annual_km)
                ),
                Err(e) => println!("{value:>8.0} kg -> error: {e}"),
            }
        }
    }

    // 6. EXPORT RESULTS
    reporting::write_scenario_csv(&args.output, &outcome.history())
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!(
        "\nData written to {} ({} km resolution)",
        args.output.display(),
        validated.step_km
    );

    Ok(())
}
