//! Plant, fuel, and request types consumed by the dispatcher.

use std::collections::HashSet;
use std::fmt;

use crate::error::DispatchError;

/// Generation technology of a plant.
///
/// Unrecognized technologies are kept with their declared name so the
/// dispatcher can report them instead of silently dropping them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlantType {
    /// Gas-fired unit burning gas and emitting CO2.
    GasFired,
    /// Turbojet burning kerosine.
    Turbojet,
    /// Wind turbine; output follows wind availability.
    WindTurbine,
    /// Any other declared type.
    Other(String),
}

impl PlantType {
    /// Parses the wire name used in request payloads (`"gasfired"`, ...).
    pub fn from_wire(name: &str) -> Self {
        match name {
            "gasfired" => Self::GasFired,
            "turbojet" => Self::Turbojet,
            "windturbine" => Self::WindTurbine,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire name of this type.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::GasFired => "gasfired",
            Self::Turbojet => "turbojet",
            Self::WindTurbine => "windturbine",
            Self::Other(name) => name,
        }
    }

    pub fn is_wind(&self) -> bool {
        matches!(self, Self::WindTurbine)
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Fuel prices and wind availability valid for a single request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelPrices {
    /// Gas price (€/MWh).
    pub gas_eur_per_mwh: f64,
    /// Kerosine price (€/MWh).
    pub kerosine_eur_per_mwh: f64,
    /// CO2 emission allowance price (€/ton).
    pub co2_eur_per_ton: f64,
    /// Wind availability in percent (0–100).
    pub wind_percent: f64,
}

impl FuelPrices {
    /// Fraction of nameplate wind capacity available (0.0–1.0).
    pub fn wind_fraction(&self) -> f64 {
        self.wind_percent / 100.0
    }
}

/// One generation unit with its operating bounds.
///
/// # Examples
///
/// ```
/// use powerplant_dispatch::fleet::{Plant, PlantType};
///
/// let plant = Plant::new("tj1", PlantType::Turbojet, 0.3, 0.0, 16.0);
/// assert_eq!(plant.pmax_mw, 16.0);
/// assert!(!plant.plant_type.is_wind());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    /// Unique name within a request.
    pub name: String,
    /// Generation technology.
    pub plant_type: PlantType,
    /// Fuel-to-power efficiency (0.0–1.0, may be zero).
    pub efficiency: f64,
    /// Minimum stable output once started (MW).
    pub pmin_mw: f64,
    /// Maximum output (MW).
    pub pmax_mw: f64,
}

impl Plant {
    pub fn new(
        name: impl Into<String>,
        plant_type: PlantType,
        efficiency: f64,
        pmin_mw: f64,
        pmax_mw: f64,
    ) -> Self {
        Self {
            name: name.into(),
            plant_type,
            efficiency,
            pmin_mw,
            pmax_mw,
        }
    }

    /// Output a wind turbine delivers under the given availability.
    ///
    /// Non-wind plants return their nameplate `pmax_mw`.
    pub fn available_mw(&self, fuels: &FuelPrices) -> f64 {
        if self.plant_type.is_wind() {
            self.pmax_mw * fuels.wind_fraction()
        } else {
            self.pmax_mw
        }
    }
}

/// Normalized `(load, fuels, plants)` triple handed to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    /// Total demand to cover (MW).
    pub load_mw: f64,
    /// Fuel market snapshot.
    pub fuels: FuelPrices,
    /// Candidate plants in input order.
    pub plants: Vec<Plant>,
}

impl DispatchRequest {
    pub fn new(load_mw: f64, fuels: FuelPrices, plants: Vec<Plant>) -> Self {
        Self {
            load_mw,
            fuels,
            plants,
        }
    }

    /// Rejects requests the dispatcher cannot reason about.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if !self.load_mw.is_finite() || self.load_mw <= 0.0 {
            return Err(DispatchError::invalid("load", "must be a positive value"));
        }

        let fuels = &self.fuels;
        for (field, value) in [
            ("fuels.gas", fuels.gas_eur_per_mwh),
            ("fuels.kerosine", fuels.kerosine_eur_per_mwh),
            ("fuels.co2", fuels.co2_eur_per_ton),
        ] {
            if !value.is_finite() {
                return Err(DispatchError::invalid(field, "must be a finite number"));
            }
        }
        if !(0.0..=100.0).contains(&fuels.wind_percent) {
            return Err(DispatchError::invalid("fuels.wind", "must be in [0, 100]"));
        }

        let mut seen = HashSet::with_capacity(self.plants.len());
        for plant in &self.plants {
            let field = |name: &str| format!("powerplants[{}].{name}", plant.name);
            if !seen.insert(plant.name.as_str()) {
                return Err(DispatchError::invalid(field("name"), "must be unique"));
            }
            if !plant.efficiency.is_finite() || plant.efficiency < 0.0 {
                return Err(DispatchError::invalid(field("efficiency"), "must be >= 0"));
            }
            if !plant.pmin_mw.is_finite() || plant.pmin_mw < 0.0 {
                return Err(DispatchError::invalid(field("pmin"), "must be >= 0"));
            }
            if !plant.pmax_mw.is_finite() || plant.pmin_mw > plant.pmax_mw {
                return Err(DispatchError::invalid(field("pmax"), "must be >= pmin"));
            }
        }

        Ok(())
    }
}
