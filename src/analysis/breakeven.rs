// src/analysis/breakeven.rs

use crate::model::series::EmissionSeries;
use crate::simulation::grid::DistanceGrid;

/// Where the EV's cumulative emissions first stop exceeding the ICE's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breakeven {
    /// Crossover distance in km. `index` is the first grid point where EV <= ICE.
    At { distance_km: f64, index: usize },
    /// EV stays above ICE for the whole lifecycle.
    Never,
}

impl Breakeven {
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            Self::At { distance_km, .. } => Some(*distance_km),
            Self::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

/// Scans the aligned cumulative series for the first index where EV <= ICE.
///
/// Index 0 already carries both manufacturing debts; a hit there means the EV
/// is never behind. Later hits are linearly interpolated between the previous
/// grid point (EV > ICE) and the hit (EV <= ICE).
pub fn resolve(grid: &DistanceGrid, ev: &EmissionSeries, ice: &EmissionSeries) -> Breakeven {
    let points = grid.points();
    let ev = ev.cumulative();
    let ice = ice.cumulative();

    let hit = points
        .iter()
        .zip(ev.iter().zip(ice.iter()))
        .position(|(_, (e, i))| e <= i);

    match hit {
        None => Breakeven::Never,
        Some(0) => Breakeven::At {
            distance_km: 0.0,
            index: 0,
        },
        Some(index) => {
            let before = ev[index - 1] - ice[index - 1];
            let after = ev[index] - ice[index];
            // before > 0 >= after, so the denominator is strictly positive.
            let fraction = before / (before - after);
            let start = points[index - 1];
            let end = points[index];
            Breakeven::At {
                distance_km: start + fraction * (end - start),
                index,
            }
        }
    }
}

/// Linear interpolation of a cumulative series at an arbitrary distance.
///
/// `None` when `series` was not built on `grid` (lengths differ).
pub fn interpolate(grid: &DistanceGrid, series: &EmissionSeries, distance_km: f64) -> Option<f64> {
    let points = grid.points();
    let values = series.cumulative();
    if values.len() != points.len() {
        return None;
    }
    let lower = grid.index_at_or_below(distance_km);
    let start = *points.get(lower)?;
    let low_value = *values.get(lower)?;
    let (end, high_value) = match (points.get(lower + 1), values.get(lower + 1)) {
        (Some(&end), Some(&high)) if distance_km > start => (end, high),
        _ => return Some(low_value),
    };
    let t = (distance_km - start) / (end - start);
    Some(low_value + t * (high_value - low_value))
}
