// src/simulation/integration.rs

use crate::model::series::EmissionSeries;
use crate::simulation::grid::DistanceGrid;

/// Left-Riemann integration shared by every vehicle model.
///
/// The rate is sampled at the start of each interval and multiplied by that
/// interval's width. The increments are then shifted right by one slot (leading
/// zero, last increment dropped) before the running sum, so the cumulative value
/// at a grid point only counts fully elapsed intervals.
///
/// # Arguments
/// * `grid` - Sample points, processed in increasing distance order.
/// * `debt_kg` - One-time manufacturing emissions, present from index 0.
/// * `rate_kg_per_km` - Instantaneous emission rate as a function of distance.
pub fn integrate_left_riemann<F>(grid: &DistanceGrid, debt_kg: f64, rate_kg_per_km: F) -> EmissionSeries
where
    F: Fn(f64) -> f64,
{
    let points = grid.points();

    let increments: Vec<f64> = points
        .iter()
        .enumerate()
        .map(|(k, &d)| rate_kg_per_km(d) * grid.interval_width(k))
        .collect();

    let mut cumulative = Vec::with_capacity(points.len());
    let mut running = debt_kg;
    for i in 0..points.len() {
        if i > 0 {
            running += increments[i - 1];
        }
        cumulative.push(running);
    }

    EmissionSeries::new(increments, cumulative)
}
