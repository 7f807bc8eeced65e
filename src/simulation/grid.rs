// src/simulation/grid.rs

use crate::constants::MAX_GRID_POINTS;
use crate::error::ConfigError;

/// Relative distance below which a sample is merged into the lifecycle endpoint.
const ENDPOINT_TOLERANCE: f64 = 1e-9;

/// Ordered sample points over the vehicle lifetime, shared read-only by both
/// emission models so that index `i` is the same distance in every series.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceGrid {
    points: Vec<f64>,
    step_km: f64,
    lifecycle_km: f64,
}

impl DistanceGrid {
    /// Generates `[0, s, 2s, ..., L]`.
    ///
    /// When `L` is not a multiple of `s` the last whole multiple below `L` is
    /// kept and `L` is appended once, so every interval but the last has the
    /// nominal width. A multiple that lands within rounding error of `L` is
    /// merged into `L` instead of leaving a sliver interval.
    ///
    /// # Arguments
    /// * `lifecycle_km` - Total distance `L` (must be > 0).
    /// * `step_km` - Sampling step `s` (must be > 0 and <= `L`).
    pub fn generate(lifecycle_km: f64, step_km: f64) -> Result<Self, ConfigError> {
        if !(lifecycle_km > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "lifecycle_km",
                value: lifecycle_km,
            });
        }
        if !(step_km > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "step_km",
                value: step_km,
            });
        }
        if step_km > lifecycle_km {
            return Err(ConfigError::StepExceedsLifecycle {
                step: step_km,
                lifecycle: lifecycle_km,
            });
        }

        let whole_steps = check_point_count(lifecycle_km, step_km)?;

        // Multiply instead of accumulating so the points don't drift.
        let merge_below = lifecycle_km * ENDPOINT_TOLERANCE;
        let mut points = Vec::with_capacity(whole_steps + 2);
        for k in 0..=whole_steps {
            let d = k as f64 * step_km;
            if lifecycle_km - d > merge_below {
                points.push(d);
            }
        }
        points.push(lifecycle_km);

        Ok(Self {
            points,
            step_km,
            lifecycle_km,
        })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn step_km(&self) -> f64 {
        self.step_km
    }

    pub fn lifecycle_km(&self) -> f64 {
        self.lifecycle_km
    }

    /// Width of the interval that starts at grid index `index`.
    ///
    /// The final point has no following interval; it reports the nominal step.
    pub fn interval_width(&self, index: usize) -> f64 {
        match (self.points.get(index), self.points.get(index + 1)) {
            (Some(start), Some(end)) => end - start,
            _ => self.step_km,
        }
    }

    /// Index of the last grid point at or below `distance_km`, clamped to the grid.
    pub fn index_at_or_below(&self, distance_km: f64) -> usize {
        let upper = self.points.partition_point(|&d| d <= distance_km);
        upper.saturating_sub(1)
    }
}

/// Number of whole steps in `lifecycle_km`, or an error when the grid would
/// exceed [`MAX_GRID_POINTS`].
pub(crate) fn check_point_count(lifecycle_km: f64, step_km: f64) -> Result<usize, ConfigError> {
    let ratio = (lifecycle_km / step_km).floor();
    let too_many = ConfigError::TooManyGridPoints {
        lifecycle: lifecycle_km,
        step: step_km,
        max: MAX_GRID_POINTS,
    };
    // Checked in f64 first: the cast to usize saturates.
    if !(ratio < MAX_GRID_POINTS as f64) {
        return Err(too_many);
    }
    let whole_steps = ratio as usize;
    match whole_steps.checked_add(2) {
        Some(total) if total <= MAX_GRID_POINTS => Ok(whole_steps),
        _ => Err(too_many),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_lifecycle_has_251_points() {
        let grid = DistanceGrid::generate(250_000.0, 1000.0).unwrap();
        assert_eq!(grid.len(), 251);
        assert_eq!(grid.points()[0], 0.0);
        assert_eq!(grid.points()[250], 250_000.0);
        assert_eq!(grid.interval_width(0), 1000.0);
        assert_eq!(grid.interval_width(250), 1000.0);
    }

    #[test]
    fn non_multiple_lifecycle_appends_endpoint_once() {
        let grid = DistanceGrid::generate(2500.0, 1000.0).unwrap();
        assert_eq!(grid.points(), &[0.0, 1000.0, 2000.0, 2500.0]);
        assert_eq!(grid.interval_width(1), 1000.0);
        assert_eq!(grid.interval_width(2), 500.0);
    }

    #[test]
    fn step_equal_to_lifecycle_gives_two_points() {
        let grid = DistanceGrid::generate(1000.0, 1000.0).unwrap();
        assert_eq!(grid.points(), &[0.0, 1000.0]);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(matches!(
            DistanceGrid::generate(0.0, 1000.0),
            Err(ConfigError::NonPositive {
                field: "lifecycle_km",
                ..
            })
        ));
        assert!(matches!(
            DistanceGrid::generate(1000.0, -5.0),
            Err(ConfigError::NonPositive { field: "step_km", .. })
        ));
        assert!(DistanceGrid::generate(1000.0, f64::NAN).is_err());
    }

    #[test]
    fn strictly_increasing() {
        let grid = DistanceGrid::generate(10_000.0, 333.0).unwrap();
        assert!(grid.points().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*grid.points().last().unwrap(), 10_000.0);
    }

    #[test]
    fn lookup_clamps_to_grid() {
        let grid = DistanceGrid::generate(5000.0, 1000.0).unwrap();
        assert_eq!(grid.index_at_or_below(0.0), 0);
        assert_eq!(grid.index_at_or_below(2999.0), 2);
        assert_eq!(grid.index_at_or_below(3000.0), 3);
        assert_eq!(grid.index_at_or_below(99_999.0), 5);
        assert_eq!(grid.index_at_or_below(-10.0), 0);
    }

    #[test]
    fn near_multiple_lifecycle_has_no_sliver_interval() {
        let grid = DistanceGrid::generate(0.9, 0.3).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(*grid.points().last().unwrap(), 0.9);
        let last_width = grid.interval_width(2);
        assert!((last_width - 0.3).abs() < 1e-12, "last width {last_width}");
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert!(matches!(
            DistanceGrid::generate(1e300, 1.0),
            Err(ConfigError::TooManyGridPoints { .. })
        ));
        assert!(matches!(
            DistanceGrid::generate(250_000.0, 1e-6),
            Err(ConfigError::TooManyGridPoints { .. })
        ));
        let edge = (MAX_GRID_POINTS - 2) as f64;
        assert_eq!(DistanceGrid::generate(edge, 1.0).unwrap().len(), MAX_GRID_POINTS - 1);
    }
}
