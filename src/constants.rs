// src/constants.rs

//! Fixed physical and economic constants shared by the emission models.

/// Kilometres per statute mile.
pub const MILES_TO_KM: f64 = 1.60934;

/// Tailpipe CO2 released by burning one US gallon of gasoline (g/gal, EPA/IPCC).
pub const CO2_TAILPIPE_G_PER_GAL: f64 = 8887.0;

/// Upstream extraction and refining overhead applied on top of tailpipe CO2.
pub const WTP_OVERHEAD_FACTOR: f64 = 1.266;

pub const GRAMS_PER_KG: f64 = 1000.0;
pub const KG_PER_TONNE: f64 = 1000.0;

/// Lifecycle distance simulated for one vehicle (km).
pub const LIFECYCLE_KM: f64 = 250_000.0;

/// Sampling resolution of the distance grid (km).
pub const KM_STEP: f64 = 1000.0;

/// Upper bound on distance grid samples per run.
pub const MAX_GRID_POINTS: usize = 1_000_000;

pub const DEFAULT_ANNUAL_KM: f64 = 15_000.0;
pub const DEFAULT_ICE_MPG: f64 = 30.0;
pub const DEFAULT_EV_KWH_PER_100KM: f64 = 18.0;
pub const DEFAULT_GRID_G_PER_KWH: f64 = 400.0;
pub const DEFAULT_CARBON_PRICE_PER_TONNE: f64 = 50.0;

/// Country selected when the caller does not name one.
pub const DEFAULT_COUNTRY: &str = "United States";

// GREET 2025 sedan baselines (kg CO2)
pub const ICE_SEDAN_TOTAL_KG: f64 = 6079.0;
pub const ICE_SEDAN_BATTERY_KG: f64 = 34.0;
pub const ICE_SEDAN_FLUIDS_KG: f64 = 745.0;
pub const EV_SEDAN_TOTAL_KG: f64 = 10471.0;
pub const EV_SEDAN_BATTERY_KG: f64 = 5238.0;
pub const EV_SEDAN_FLUIDS_KG: f64 = 174.0;
