// src/io/scenario.rs

use crate::error::DataError;
use crate::io::grid_factors::{GridFactorTable, GridMode};
use crate::io::manufacturing::{ManufacturingTable, VehicleKind};
use crate::simulation::config::SimulationConfig;
use log::debug;

/// Table lookups that turn a country choice into a `SimulationConfig`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioInputs {
    /// `None` selects the table's default country.
    pub country: Option<String>,
    pub grid_mode: GridMode,
    /// Relative adjustment to the resolved grid intensity, in percent.
    pub grid_uncertainty_pct: f64,
    /// Fixed grid intensity (g/kWh) used instead of any table lookup. The
    /// uncertainty adjustment still applies on top of it.
    pub grid_override_g_per_kwh: Option<f64>,
}

impl ScenarioInputs {
    /// Fills grid intensity and manufacturing debts into `base`.
    ///
    /// Intensity precedence: override, then grid table, then the base config.
    /// The uncertainty adjustment is applied to whichever wins. Without a
    /// manufacturing table the base debts are kept.
    pub fn assemble(
        &self,
        mut base: SimulationConfig,
        grid: Option<&GridFactorTable>,
        manufacturing: Option<&ManufacturingTable>,
    ) -> Result<SimulationConfig, DataError> {
        let intensity = match (self.grid_override_g_per_kwh, grid) {
            (Some(value), _) => {
                debug!("grid intensity overridden: {value:.1} g/kWh");
                value
            }
            (None, Some(table)) => {
                let country = match self.country.as_deref() {
                    Some(name) => name,
                    None => table.default_country().ok_or(DataError::EmptyGridTable)?,
                };
                let value = table.intensity_for(country, self.grid_mode)?;
                debug!("{country} {:?} grid factor: {value:.1} g/kWh", self.grid_mode);
                value
            }
            (None, None) => base.grid_base_g_per_kwh,
        };

        base.grid_base_g_per_kwh = apply_uncertainty(intensity, self.grid_uncertainty_pct)?;
        if let Some(table) = manufacturing {
            base.ev_manufacturing_kg = table.debt_for(VehicleKind::Ev)?;
            base.ice_manufacturing_kg = table.debt_for(VehicleKind::Ice)?;
        }
        Ok(base)
    }
}

/// Scales `intensity` by `1 + pct / 100`.
pub fn apply_uncertainty(intensity: f64, pct: f64) -> Result<f64, DataError> {
    if !pct.is_finite() || pct < -100.0 {
        return Err(DataError::InvalidUncertainty { pct });
    }
    Ok(intensity * (1.0 + pct / 100.0))
}
