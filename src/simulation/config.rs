// src/simulation/config.rs

use crate::constants::{
    CO2_TAILPIPE_G_PER_GAL, DEFAULT_ANNUAL_KM, DEFAULT_EV_KWH_PER_100KM, DEFAULT_GRID_G_PER_KWH,
    DEFAULT_ICE_MPG, EV_SEDAN_TOTAL_KG, ICE_SEDAN_TOTAL_KG, KM_STEP, LIFECYCLE_KM,
    WTP_OVERHEAD_FACTOR,
};
use crate::error::ConfigError;
use crate::simulation::grid::check_point_count;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Raw scenario inputs. Fractions (penalty, degradation, decarbonization) are
/// stored as 0..1 values, not percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub lifecycle_km: f64,
    pub step_km: f64,
    pub ice_rated_mpg: f64,
    pub ice_real_world_penalty: f64,
    pub ev_kwh_per_100km: f64,
    pub ev_degradation: f64,
    pub annual_km: f64,
    pub grid_base_g_per_kwh: f64,
    pub annual_decarbonization_rate: f64,
    pub ev_manufacturing_kg: f64,
    pub ice_manufacturing_kg: f64,
    pub fuel_carbon_g_per_gal: f64,
    pub well_to_pump: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lifecycle_km: LIFECYCLE_KM,
            step_km: KM_STEP,
            ice_rated_mpg: DEFAULT_ICE_MPG,
            ice_real_world_penalty: 0.0,
            ev_kwh_per_100km: DEFAULT_EV_KWH_PER_100KM,
            ev_degradation: 0.0,
            annual_km: DEFAULT_ANNUAL_KM,
            grid_base_g_per_kwh: DEFAULT_GRID_G_PER_KWH,
            annual_decarbonization_rate: 0.0,
            ev_manufacturing_kg: EV_SEDAN_TOTAL_KG,
            ice_manufacturing_kg: ICE_SEDAN_TOTAL_KG,
            fuel_carbon_g_per_gal: CO2_TAILPIPE_G_PER_GAL,
            well_to_pump: WTP_OVERHEAD_FACTOR,
        }
    }
}

impl SimulationConfig {
    /// Checks every range invariant and hands back a config the engine accepts.
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let fields = [
            ("lifecycle_km", self.lifecycle_km),
            ("step_km", self.step_km),
            ("ice_rated_mpg", self.ice_rated_mpg),
            ("ice_real_world_penalty", self.ice_real_world_penalty),
            ("ev_kwh_per_100km", self.ev_kwh_per_100km),
            ("ev_degradation", self.ev_degradation),
            ("annual_km", self.annual_km),
            ("grid_base_g_per_kwh", self.grid_base_g_per_kwh),
            ("annual_decarbonization_rate", self.annual_decarbonization_rate),
            ("ev_manufacturing_kg", self.ev_manufacturing_kg),
            ("ice_manufacturing_kg", self.ice_manufacturing_kg),
            ("fuel_carbon_g_per_gal", self.fuel_carbon_g_per_gal),
            ("well_to_pump", self.well_to_pump),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        positive("lifecycle_km", self.lifecycle_km)?;
        positive("step_km", self.step_km)?;
        if self.step_km > self.lifecycle_km {
            return Err(ConfigError::StepExceedsLifecycle {
                step: self.step_km,
                lifecycle: self.lifecycle_km,
            });
        }
        check_point_count(self.lifecycle_km, self.step_km)?;
        positive("annual_km", self.annual_km)?;

        non_negative("ice_rated_mpg", self.ice_rated_mpg)?;
        non_negative("ev_kwh_per_100km", self.ev_kwh_per_100km)?;
        non_negative("grid_base_g_per_kwh", self.grid_base_g_per_kwh)?;
        non_negative("ev_manufacturing_kg", self.ev_manufacturing_kg)?;
        non_negative("ice_manufacturing_kg", self.ice_manufacturing_kg)?;
        non_negative("fuel_carbon_g_per_gal", self.fuel_carbon_g_per_gal)?;

        half_open_fraction("ice_real_world_penalty", self.ice_real_world_penalty)?;
        half_open_fraction(
            "annual_decarbonization_rate",
            self.annual_decarbonization_rate,
        )?;
        if !(0.0..=1.0).contains(&self.ev_degradation) {
            return Err(ConfigError::OutOfClosedRange {
                field: "ev_degradation",
                min: 0.0,
                max: 1.0,
                value: self.ev_degradation,
            });
        }
        if self.well_to_pump < 1.0 {
            return Err(ConfigError::BelowMinimum {
                field: "well_to_pump",
                min: 1.0,
                value: self.well_to_pump,
            });
        }

        Ok(ValidatedConfig(self))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn half_open_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field,
            min: 0.0,
            max: 1.0,
            value,
        });
    }
    Ok(())
}

/// A `SimulationConfig` that passed [`SimulationConfig::validate`].
///
/// The inner config is read-only; build a new one to change a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig(SimulationConfig);

impl Deref for ValidatedConfig {
    type Target = SimulationConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<SimulationConfig> for ValidatedConfig {
    type Error = ConfigError;

    fn try_from(config: SimulationConfig) -> Result<Self, Self::Error> {
        config.validate()
    }
}
