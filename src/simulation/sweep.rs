// src/simulation/sweep.rs

use crate::analysis::breakeven::Breakeven;
use crate::error::SimulationError;
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::run_simulation;
use rayon::prelude::*;

/// Result of one what-if run in a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub value: f64,
    pub breakeven: Breakeven,
    pub lifecycle_savings_kg: f64,
}

/// Re-runs the simulation once per `value`, each on its own copy of `base`.
///
/// Runs share nothing and are spread over the rayon thread pool; results come
/// back in the order of `values`.
pub fn sweep<F>(
    base: &SimulationConfig,
    values: &[f64],
    apply: F,
) -> Vec<Result<SweepPoint, SimulationError>>
where
    F: Fn(&mut SimulationConfig, f64) + Send + Sync,
{
    values
        .par_iter()
        .map(|&value| -> Result<SweepPoint, SimulationError> {
            let mut config = base.clone();
            apply(&mut config, value);
            let validated = config.validate()?;
            let outcome = run_simulation(&validated)?;
            Ok(SweepPoint {
                value,
                breakeven: outcome.breakeven,
                lifecycle_savings_kg: outcome.lifecycle_savings_kg(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn results_follow_input_order() {
        let values = [8000.0, 10_000.0, 12_000.0, 14_000.0];
        let results = sweep(&SimulationConfig::default(), &values, |c, v| {
            c.ev_manufacturing_kg = v
        });
        let seen: Vec<f64> = results.iter().map(|r| r.as_ref().unwrap().value).collect();
        assert_eq!(seen, values);
    }

    #[test]
    fn long_sweeps_run_on_the_pool_in_order() {
        let values: Vec<f64> = (0..2000).map(|i| 5000.0 + i as f64 * 5.0).collect();
        let base = SimulationConfig {
            lifecycle_km: 20_000.0,
            ..SimulationConfig::default()
        };
        let results = sweep(&base, &values, |c, v| c.ev_manufacturing_kg = v);
        assert_eq!(results.len(), values.len());
        for (result, &value) in results.iter().zip(&values) {
            assert_eq!(result.as_ref().unwrap().value, value);
        }
    }

    #[test]
    fn invalid_value_fails_only_its_own_run() {
        let results = sweep(&SimulationConfig::default(), &[15_000.0, 0.0], |c, v| {
            c.annual_km = v
        });
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(SimulationError::Config(ConfigError::NonPositive {
                field: "annual_km",
                ..
            }))
        ));
    }
}
