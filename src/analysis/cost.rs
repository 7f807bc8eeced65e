// src/analysis/cost.rs

use crate::constants::KG_PER_TONNE;
use crate::error::ConfigError;

/// Converts an emissions difference into money at a given carbon price.
///
/// # Arguments
/// * `delta_kg` - Avoided emissions (ICE - EV) in kg CO2. May be negative.
/// * `price_per_tonne` - Carbon price in currency per tonne CO2.
pub fn monetize(delta_kg: f64, price_per_tonne: f64) -> Result<f64, ConfigError> {
    if !price_per_tonne.is_finite() {
        return Err(ConfigError::NonFinite {
            field: "carbon_price",
            value: price_per_tonne,
        });
    }
    if price_per_tonne < 0.0 {
        return Err(ConfigError::Negative {
            field: "carbon_price",
            value: price_per_tonne,
        });
    }
    Ok(delta_kg / KG_PER_TONNE * price_per_tonne)
}
