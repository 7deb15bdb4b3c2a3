//! Marginal cost model per plant technology.

use std::fmt;

use crate::fleet::{FuelPrices, Plant, PlantType};

/// Cost assigned to plants that cannot produce economically.
///
/// Always sorts last in the merit order.
pub const UNDISPATCHABLE: f64 = f64::INFINITY;

/// Share by which each unit of efficiency lowers gas emission intensity.
const EFFICIENCY_EMISSION_REDUCTION: f64 = 0.05;

/// Reason a plant could not be priced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostAnomaly {
    /// Efficiency is zero, so fuel cost per MWh is unbounded.
    ZeroEfficiency,
    /// The declared technology has no cost model.
    UnknownPlantType(String),
}

impl fmt::Display for CostAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroEfficiency => write!(f, "efficiency is zero"),
            Self::UnknownPlantType(name) => write!(f, "unknown plant type \"{name}\""),
        }
    }
}

/// Marginal cost model parameterized by the gas CO2 emission factor.
///
/// # Examples
///
/// ```
/// use powerplant_dispatch::dispatch::cost::CostModel;
/// use powerplant_dispatch::fleet::{FuelPrices, Plant, PlantType};
///
/// let fuels = FuelPrices {
///     gas_eur_per_mwh: 10.0,
///     kerosine_eur_per_mwh: 50.0,
///     co2_eur_per_ton: 0.0,
///     wind_percent: 0.0,
/// };
/// let plant = Plant::new("gas", PlantType::GasFired, 0.5, 0.0, 600.0);
/// assert_eq!(CostModel::default().marginal_cost(&plant, &fuels), Ok(20.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    co2_emission_factor: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl CostModel {
    pub fn new(co2_emission_factor: f64) -> Self {
        Self {
            co2_emission_factor,
        }
    }

    /// Emission intensity of a gas-fired plant (ton CO2/MWh).
    ///
    /// Higher efficiency lowers the intensity below the base factor.
    pub fn gas_emission_factor(&self, efficiency: f64) -> f64 {
        self.co2_emission_factor * (1.0 - efficiency * EFFICIENCY_EMISSION_REDUCTION)
    }

    /// Cost of producing one MWh with `plant` under `fuels` (€/MWh).
    ///
    /// # Errors
    ///
    /// Returns a [`CostAnomaly`] when the plant cannot be priced. Callers
    /// rank such plants at [`UNDISPATCHABLE`] and report the anomaly.
    pub fn marginal_cost(&self, plant: &Plant, fuels: &FuelPrices) -> Result<f64, CostAnomaly> {
        if plant.efficiency == 0.0 {
            return Err(CostAnomaly::ZeroEfficiency);
        }

        match &plant.plant_type {
            PlantType::GasFired => Ok(fuels.gas_eur_per_mwh / plant.efficiency
                + fuels.co2_eur_per_ton * self.gas_emission_factor(plant.efficiency)),
            PlantType::Turbojet => Ok(fuels.kerosine_eur_per_mwh / plant.efficiency),
            PlantType::WindTurbine => Ok(0.0),
            PlantType::Other(name) => Err(CostAnomaly::UnknownPlantType(name.clone())),
        }
    }
}
