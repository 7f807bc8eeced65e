// src/model/series.rs

/// Per-interval and cumulative emissions (kg CO2) aligned to a `DistanceGrid`.
///
/// `increments[i]` belongs to the interval starting at grid point `i`;
/// `cumulative[i]` is the manufacturing debt plus every increment before `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionSeries {
    increments: Vec<f64>,
    cumulative: Vec<f64>,
}

impl EmissionSeries {
    pub(crate) fn new(increments: Vec<f64>, cumulative: Vec<f64>) -> Self {
        debug_assert_eq!(increments.len(), cumulative.len());
        Self {
            increments,
            cumulative,
        }
    }

    pub fn increments(&self) -> &[f64] {
        &self.increments
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Cumulative total at the final grid point.
    pub fn lifecycle_total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Cumulative value at index 0, i.e. the manufacturing debt.
    pub fn manufacturing_debt(&self) -> f64 {
        self.cumulative.first().copied().unwrap_or(0.0)
    }
}
