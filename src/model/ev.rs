// src/model/ev.rs

use crate::constants::GRAMS_PER_KG;
use crate::model::traits::EmissionModel;
use crate::simulation::config::ValidatedConfig;

/// Battery-electric vehicle whose efficiency degrades linearly with distance
/// while the grid feeding it decarbonizes exponentially with time.
#[derive(Debug, Clone, PartialEq)]
pub struct EvModel {
    base_kwh_per_100km: f64,
    degradation: f64,
    lifecycle_km: f64,
    grid_base_g_per_kwh: f64,
    decarbonization_rate: f64,
    annual_km: f64,
    manufacturing_kg: f64,
}

impl EvModel {
    pub fn from_config(config: &ValidatedConfig) -> Self {
        Self {
            base_kwh_per_100km: config.ev_kwh_per_100km,
            degradation: config.ev_degradation,
            lifecycle_km: config.lifecycle_km,
            grid_base_g_per_kwh: config.grid_base_g_per_kwh,
            decarbonization_rate: config.annual_decarbonization_rate,
            annual_km: config.annual_km,
            manufacturing_kg: config.ev_manufacturing_kg,
        }
    }

    /// Consumption after linear degradation: `base * (1 + deg * d / L)`.
    pub fn efficiency_kwh_per_100km(&self, distance_km: f64) -> f64 {
        self.base_kwh_per_100km * (1.0 + self.degradation * distance_km / self.lifecycle_km)
    }

    /// Years of driving needed to reach `distance_km`.
    pub fn elapsed_years(&self, distance_km: f64) -> f64 {
        distance_km / self.annual_km
    }

    /// Grid intensity at the time the odometer reads `distance_km`.
    pub fn grid_intensity_g_per_kwh(&self, distance_km: f64) -> f64 {
        let years = self.elapsed_years(distance_km);
        self.grid_base_g_per_kwh * (1.0 - self.decarbonization_rate).powf(years)
    }

    pub fn slope_g_per_km(&self, distance_km: f64) -> f64 {
        self.efficiency_kwh_per_100km(distance_km) / 100.0
            * self.grid_intensity_g_per_kwh(distance_km)
    }
}

impl EmissionModel for EvModel {
    fn label(&self) -> &'static str {
        "EV"
    }

    fn rate_kg_per_km(&self, distance_km: f64) -> f64 {
        self.slope_g_per_km(distance_km) / GRAMS_PER_KG
    }

    fn manufacturing_debt_kg(&self) -> f64 {
        self.manufacturing_kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::SimulationConfig;
    use crate::simulation::grid::DistanceGrid;

    fn model(degradation: f64, decarb: f64) -> EvModel {
        let config = SimulationConfig {
            ev_kwh_per_100km: 18.0,
            ev_degradation: degradation,
            grid_base_g_per_kwh: 400.0,
            annual_decarbonization_rate: decarb,
            annual_km: 15_000.0,
            ev_manufacturing_kg: 10_500.0,
            ..SimulationConfig::default()
        }
        .validate()
        .unwrap();
        EvModel::from_config(&config)
    }

    #[test]
    fn degradation_reaches_full_fraction_at_lifecycle_end() {
        let ev = model(0.15, 0.0);
        assert_eq!(ev.efficiency_kwh_per_100km(0.0), 18.0);
        assert!((ev.efficiency_kwh_per_100km(250_000.0) - 20.7).abs() < 1e-9);
    }

    #[test]
    fn grid_decays_per_year_of_driving() {
        let ev = model(0.0, 0.03);
        assert_eq!(ev.grid_intensity_g_per_kwh(0.0), 400.0);
        assert!((ev.grid_intensity_g_per_kwh(15_000.0) - 388.0).abs() < 1e-9);
        assert!((ev.grid_intensity_g_per_kwh(30_000.0) - 400.0 * 0.97 * 0.97).abs() < 1e-9);
    }

    #[test]
    fn flat_profile_gives_constant_increment() {
        let ev = model(0.0, 0.0);
        let grid = DistanceGrid::generate(250_000.0, 1000.0).unwrap();
        let series = ev.emissions(&grid).unwrap();
        // 18 kWh/100km * 400 g/kWh * 1000 km = 72 kg
        let expected = 18.0 / 100.0 * 400.0 * 1000.0 / 1000.0;
        assert!(series
            .increments()
            .iter()
            .all(|&x| (x - expected).abs() < 1e-9));
    }

    #[test]
    fn degradation_alone_makes_increments_strictly_increase() {
        let ev = model(0.15, 0.0);
        let grid = DistanceGrid::generate(250_000.0, 1000.0).unwrap();
        let series = ev.emissions(&grid).unwrap();
        assert_eq!(series.cumulative()[0], 10_500.0);
        assert!(series.increments().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn decay_alone_makes_increments_decrease() {
        let ev = model(0.0, 0.05);
        let grid = DistanceGrid::generate(250_000.0, 1000.0).unwrap();
        let series = ev.emissions(&grid).unwrap();
        assert!(series.increments().windows(2).all(|w| w[1] < w[0]));
        assert!(series.cumulative().windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn renewable_grid_accrues_nothing_after_debt() {
        let config = SimulationConfig {
            grid_base_g_per_kwh: 0.0,
            ev_manufacturing_kg: 9000.0,
            ..SimulationConfig::default()
        }
        .validate()
        .unwrap();
        let grid = DistanceGrid::generate(config.lifecycle_km, config.step_km).unwrap();
        let series = EvModel::from_config(&config).emissions(&grid).unwrap();
        assert!(series.cumulative().iter().all(|&c| c == 9000.0));
    }
}
