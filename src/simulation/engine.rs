// src/simulation/engine.rs

use crate::analysis::breakeven::{self, Breakeven};
use crate::analysis::cost::monetize;
use crate::error::{ConfigError, SimulationError};
use crate::model::ev::EvModel;
use crate::model::ice::IceModel;
use crate::model::series::EmissionSeries;
use crate::model::traits::EmissionModel;
use crate::simulation::config::ValidatedConfig;
use crate::simulation::grid::DistanceGrid;
use log::{debug, info};
use serde::Serialize;

// Column names follow the exported scenario CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub distance_km: f64,
    pub ice_total_kg_co2: f64,
    pub ev_total_kg_co2: f64,
    pub ice_minus_ev_kg_co2: f64,
    pub grid_used_g_per_kwh: f64,
    pub ev_slope_g_per_km: f64,
}

/// EV state sampled at each grid point, kept for diagnostic display.
#[derive(Debug, Clone, PartialEq)]
pub struct EvProfile {
    pub efficiency_kwh_per_100km: Vec<f64>,
    pub grid_g_per_kwh: Vec<f64>,
    pub slope_g_per_km: Vec<f64>,
}

/// Totals at a single grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSnapshot {
    pub distance_km: f64,
    pub ice_total_kg: f64,
    pub ev_total_kg: f64,
    pub delta_kg: f64,
}

impl DistanceSnapshot {
    pub fn ev_ahead(&self) -> bool {
        self.delta_kg > 0.0
    }
}

/// Everything one run produces. Fresh per run, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    config: ValidatedConfig,
    pub grid: DistanceGrid,
    pub ice: EmissionSeries,
    pub ev: EmissionSeries,
    pub ev_profile: EvProfile,
    pub ice_slope_g_per_km: f64,
    pub breakeven: Breakeven,
}

/// Runs grid generation, both emission models and breakeven resolution.
///
/// Pure: the same config always yields the same outcome.
pub fn run_simulation(config: &ValidatedConfig) -> Result<SimulationOutcome, SimulationError> {
    let grid = DistanceGrid::generate(config.lifecycle_km, config.step_km)?;

    let ice_model = IceModel::from_config(config)?;
    let ev_model = EvModel::from_config(config);

    let ice = ice_model.emissions(&grid)?;
    let ev = ev_model.emissions(&grid)?;

    let ev_profile = EvProfile {
        efficiency_kwh_per_100km: grid
            .points()
            .iter()
            .map(|&d| ev_model.efficiency_kwh_per_100km(d))
            .collect(),
        grid_g_per_kwh: grid
            .points()
            .iter()
            .map(|&d| ev_model.grid_intensity_g_per_kwh(d))
            .collect(),
        slope_g_per_km: grid
            .points()
            .iter()
            .map(|&d| ev_model.slope_g_per_km(d))
            .collect(),
    };

    let breakeven = breakeven::resolve(&grid, &ev, &ice);
    debug!(
        "simulated {} points, ICE slope {:.1} g/km, EV slope {:.1}..{:.1} g/km",
        grid.len(),
        ice_model.slope_g_per_km(),
        ev_profile.slope_g_per_km.first().copied().unwrap_or(0.0),
        ev_profile.slope_g_per_km.last().copied().unwrap_or(0.0),
    );
    match breakeven.distance_km() {
        Some(km) => info!("breakeven at {km:.0} km"),
        None => info!("no breakeven within {:.0} km", grid.lifecycle_km()),
    }

    Ok(SimulationOutcome {
        config: config.clone(),
        grid,
        ice,
        ev,
        ev_profile,
        ice_slope_g_per_km: ice_model.slope_g_per_km(),
        breakeven,
    })
}

impl SimulationOutcome {
    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// ICE minus EV cumulative emissions at grid index `index`.
    pub fn delta_at(&self, index: usize) -> Option<f64> {
        let ice = self.ice.cumulative().get(index)?;
        let ev = self.ev.cumulative().get(index)?;
        Some(ice - ev)
    }

    /// Totals at the grid point at or below `distance_km`.
    pub fn inspect(&self, distance_km: f64) -> DistanceSnapshot {
        let index = self.grid.index_at_or_below(distance_km);
        let ice_total_kg = self.ice.cumulative()[index];
        let ev_total_kg = self.ev.cumulative()[index];
        DistanceSnapshot {
            distance_km: self.grid.points()[index],
            ice_total_kg,
            ev_total_kg,
            delta_kg: ice_total_kg - ev_total_kg,
        }
    }

    /// Emissions avoided by the EV over the whole lifecycle (kg CO2).
    pub fn lifecycle_savings_kg(&self) -> f64 {
        self.ice.lifecycle_total() - self.ev.lifecycle_total()
    }

    pub fn lifecycle_savings_value(&self, price_per_tonne: f64) -> Result<f64, ConfigError> {
        monetize(self.lifecycle_savings_kg(), price_per_tonne)
    }

    pub fn breakeven_years(&self) -> Option<f64> {
        self.breakeven
            .distance_km()
            .map(|km| km / self.config.annual_km)
    }

    /// Manufacturing debt the EV starts with relative to the ICE (kg CO2).
    pub fn manufacturing_gap_kg(&self) -> f64 {
        self.ev.manufacturing_debt() - self.ice.manufacturing_debt()
    }

    /// One row per grid point, ready for CSV export.
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.grid
            .points()
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let ice_total = self.ice.cumulative()[i];
                let ev_total = self.ev.cumulative()[i];
                HistoryRecord {
                    distance_km: d,
                    ice_total_kg_co2: ice_total,
                    ev_total_kg_co2: ev_total,
                    ice_minus_ev_kg_co2: ice_total - ev_total,
                    grid_used_g_per_kwh: self.ev_profile.grid_g_per_kwh[i],
                    ev_slope_g_per_km: self.ev_profile.slope_g_per_km[i],
                }
            })
            .collect()
    }
}
