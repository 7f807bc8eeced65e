// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Structurally invalid configuration, rejected before any simulation executes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero (got {value:.3})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value:.3})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be in [{min:.3}, {max:.3}) (got {value:.3})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must be in [{min:.3}, {max:.3}] (got {value:.3})")]
    OutOfClosedRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must be at least {min:.3} (got {value:.3})")]
    BelowMinimum {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("step {step:.1} km exceeds lifecycle distance {lifecycle:.1} km")]
    StepExceedsLifecycle { step: f64, lifecycle: f64 },
    #[error("lifecycle {lifecycle:.1} km at step {step} km needs more than {max} grid points")]
    TooManyGridPoints {
        lifecycle: f64,
        step: f64,
        max: usize,
    },
}

/// A structurally valid configuration that yields a non-physical intermediate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("adjusted fuel economy must be positive (rated {rated_mpg:.2} MPG, penalty {penalty:.3} -> {adjusted_mpg:.2} MPG)")]
    NonPositiveFuelEconomy {
        rated_mpg: f64,
        penalty: f64,
        adjusted_mpg: f64,
    },
    #[error("{model} emission rate is not a finite non-negative value at {distance_km:.1} km (got {rate})")]
    InvalidRate {
        model: &'static str,
        distance_km: f64,
        rate: f64,
    },
    #[error("{model} cumulative emissions overflow at {distance_km:.1} km")]
    NonFiniteEmissions {
        model: &'static str,
        distance_km: f64,
    },
}

/// Any failure that aborts a single simulation run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("non-physical result: {0}")]
    Physics(#[from] PhysicsError),
}

/// Failures while loading or resolving the constant tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("grid factor table is empty")]
    EmptyGridTable,
    #[error("no usable carbon intensity for {country}: both average and marginal are missing")]
    MissingIntensity { country: String },
    #[error("manufacturing table has no row for {vehicle_type}")]
    MissingVehicle { vehicle_type: String },
    #[error("grid uncertainty {pct:.1}% would make the grid intensity negative")]
    InvalidUncertainty { pct: f64 },
}
