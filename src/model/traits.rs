// src/model/traits.rs

use crate::error::PhysicsError;
use crate::model::series::EmissionSeries;
use crate::simulation::grid::DistanceGrid;
use crate::simulation::integration::integrate_left_riemann;
use std::fmt::Debug;

/// A vehicle whose use-phase emissions can be integrated over a distance grid.
///
/// `Send + Sync` so independent scenarios can be evaluated on separate threads.
pub trait EmissionModel: Debug + Send + Sync {
    /// Short name used in logs and errors.
    fn label(&self) -> &'static str;

    /// Emission rate (kg CO2 per km) in force at `distance_km`.
    fn rate_kg_per_km(&self, distance_km: f64) -> f64;

    /// One-time production emissions (kg CO2).
    fn manufacturing_debt_kg(&self) -> f64;

    /// Integrates the rate over `grid`. Rejects non-physical rates, and any
    /// increment or running total that overflows to infinity.
    fn emissions(&self, grid: &DistanceGrid) -> Result<EmissionSeries, PhysicsError> {
        for &d in grid.points() {
            let rate = self.rate_kg_per_km(d);
            if !rate.is_finite() || rate < 0.0 {
                return Err(PhysicsError::InvalidRate {
                    model: self.label(),
                    distance_km: d,
                    rate,
                });
            }
        }
        let series = integrate_left_riemann(grid, self.manufacturing_debt_kg(), |d| {
            self.rate_kg_per_km(d)
        });

        let overflow = series
            .increments()
            .iter()
            .zip(series.cumulative())
            .position(|(inc, total)| !inc.is_finite() || !total.is_finite());
        if let Some(index) = overflow {
            return Err(PhysicsError::NonFiniteEmissions {
                model: self.label(),
                distance_km: grid.points()[index],
            });
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ev::EvModel;
    use crate::model::ice::IceModel;
    use crate::simulation::config::SimulationConfig;

    #[derive(Debug)]
    struct Fixed {
        rate: f64,
        debt: f64,
    }

    impl EmissionModel for Fixed {
        fn label(&self) -> &'static str {
            "fixed"
        }

        fn rate_kg_per_km(&self, _distance_km: f64) -> f64 {
            self.rate
        }

        fn manufacturing_debt_kg(&self) -> f64 {
            self.debt
        }
    }

    fn grid() -> DistanceGrid {
        DistanceGrid::generate(250_000.0, 1000.0).unwrap()
    }

    #[test]
    fn negative_and_nan_rates_are_rejected() {
        for rate in [-0.1, f64::NAN, f64::INFINITY] {
            let err = Fixed { rate, debt: 0.0 }.emissions(&grid()).unwrap_err();
            assert!(matches!(
                err,
                PhysicsError::InvalidRate {
                    model: "fixed",
                    distance_km,
                    ..
                } if distance_km == 0.0
            ));
        }
    }

    #[test]
    fn denormal_fuel_economy_gives_an_invalid_rate() {
        let config = SimulationConfig {
            ice_rated_mpg: 1e-310,
            ..SimulationConfig::default()
        }
        .validate()
        .unwrap();
        let ice = IceModel::from_config(&config).unwrap();
        assert!(matches!(
            ice.emissions(&grid()),
            Err(PhysicsError::InvalidRate { model: "ICE", .. })
        ));
    }

    #[test]
    fn finite_rate_that_overflows_the_total_is_rejected() {
        let config = SimulationConfig {
            ev_kwh_per_100km: 1e306,
            ..SimulationConfig::default()
        }
        .validate()
        .unwrap();
        let ev = EvModel::from_config(&config);
        assert!(ev.rate_kg_per_km(0.0).is_finite());
        assert!(matches!(
            ev.emissions(&grid()),
            Err(PhysicsError::NonFiniteEmissions { model: "EV", .. })
        ));
    }

    #[test]
    fn running_total_overflow_is_rejected() {
        let model = Fixed {
            rate: 1e305,
            debt: f64::MAX,
        };
        assert!(matches!(
            model.emissions(&grid()),
            Err(PhysicsError::NonFiniteEmissions { distance_km, .. }) if distance_km == 1000.0
        ));
    }
}
