// src/model/ice.rs

use crate::constants::{GRAMS_PER_KG, MILES_TO_KM};
use crate::error::PhysicsError;
use crate::model::traits::EmissionModel;
use crate::simulation::config::ValidatedConfig;

/// Internal-combustion vehicle with a time-invariant per-km emission rate.
#[derive(Debug, Clone, PartialEq)]
pub struct IceModel {
    rate_kg_per_km: f64,
    manufacturing_kg: f64,
}

impl IceModel {
    /// Builds the model from fuel-economy and fuel-chemistry inputs.
    ///
    /// # Arguments
    /// * `rated_mpg` - Label fuel economy (miles per US gallon).
    /// * `penalty` - Real-world shortfall as a fraction of `rated_mpg`.
    /// * `fuel_carbon_g_per_gal` - Tailpipe CO2 per gallon burned.
    /// * `well_to_pump` - Upstream multiplier (>= 1).
    /// * `manufacturing_kg` - Production debt.
    pub fn new(
        rated_mpg: f64,
        penalty: f64,
        fuel_carbon_g_per_gal: f64,
        well_to_pump: f64,
        manufacturing_kg: f64,
    ) -> Result<Self, PhysicsError> {
        let adjusted_mpg = rated_mpg * (1.0 - penalty);
        if !(adjusted_mpg > 0.0) {
            return Err(PhysicsError::NonPositiveFuelEconomy {
                rated_mpg,
                penalty,
                adjusted_mpg,
            });
        }

        let km_per_gal = adjusted_mpg * MILES_TO_KM;
        let g_per_km = fuel_carbon_g_per_gal / km_per_gal * well_to_pump;

        Ok(Self {
            rate_kg_per_km: g_per_km / GRAMS_PER_KG,
            manufacturing_kg,
        })
    }

    pub fn from_config(config: &ValidatedConfig) -> Result<Self, PhysicsError> {
        Self::new(
            config.ice_rated_mpg,
            config.ice_real_world_penalty,
            config.fuel_carbon_g_per_gal,
            config.well_to_pump,
            config.ice_manufacturing_kg,
        )
    }

    pub fn slope_g_per_km(&self) -> f64 {
        self.rate_kg_per_km * GRAMS_PER_KG
    }
}

impl EmissionModel for IceModel {
    fn label(&self) -> &'static str {
        "ICE"
    }

    fn rate_kg_per_km(&self, _distance_km: f64) -> f64 {
        self.rate_kg_per_km
    }

    fn manufacturing_debt_kg(&self) -> f64 {
        self.manufacturing_kg
    }
}
