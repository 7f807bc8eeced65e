//! Lifecycle carbon breakeven between an electric and a combustion vehicle.
//!
//! A run turns a validated [`SimulationConfig`] into two cumulative emission
//! series on a shared distance grid and finds the distance where the EV's
//! total first drops to or below the ICE's.

pub mod analysis;
pub mod constants;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;

pub use analysis::breakeven::Breakeven;
pub use error::{ConfigError, DataError, PhysicsError, SimulationError};
pub use simulation::config::{SimulationConfig, ValidatedConfig};
pub use simulation::engine::{run_simulation, SimulationOutcome};
