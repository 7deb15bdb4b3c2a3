//! Merit-order production planning for a fleet of power plants.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
/// Cost model, merit order, allocation, redistribution, and plan assembly.
pub mod dispatch;
pub mod error;
/// Plant and fuel inputs.
pub mod fleet;
pub mod io;
pub mod payload;
