//! Plant fleet and fuel market inputs for one dispatch request.

pub mod types;

pub use types::{DispatchRequest, FuelPrices, Plant, PlantType};
