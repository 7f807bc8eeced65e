pub mod grid_factors;
pub mod manufacturing;
pub mod reporting;
pub mod scenario;
