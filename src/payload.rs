//! JSON request and response contract of the production plan service.
//!
//! Fuel keys carry their unit in the wire format (`"gas(euro/MWh)"`); the
//! bare names (`"gas"`) are accepted as well.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::ProductionPlan;
use crate::fleet::{DispatchRequest, FuelPrices, Plant, PlantType};

/// Request body of `POST /productionplan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPlanPayload {
    /// Load to cover (MW).
    pub load: f64,
    pub fuels: FuelsPayload,
    pub powerplants: Vec<PowerPlantPayload>,
}

/// Fuel prices and wind availability as sent by clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelsPayload {
    #[serde(rename = "gas(euro/MWh)", alias = "gas")]
    pub gas: f64,
    #[serde(rename = "kerosine(euro/MWh)", alias = "kerosine")]
    pub kerosine: f64,
    #[serde(rename = "co2(euro/ton)", alias = "co2")]
    pub co2: f64,
    #[serde(rename = "wind(%)", alias = "wind")]
    pub wind: f64,
}

/// One plant as sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerPlantPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: String,
    pub efficiency: f64,
    pub pmin: f64,
    pub pmax: f64,
}

/// One line of the response: plant name and power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub name: String,
    /// Assigned power (MW, one decimal).
    pub p: f64,
}

/// Errors while reading a payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("cannot read \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProductionPlanPayload {
    /// Parses a payload from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Json`] on malformed JSON or missing fields.
    pub fn from_json_str(s: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads and parses a payload file.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Read`] if the file cannot be read, or
    /// [`PayloadError::Json`] if its content is not a valid payload.
    pub fn from_json_file(path: &Path) -> Result<Self, PayloadError> {
        let content = fs::read_to_string(path).map_err(|source| PayloadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

impl From<FuelsPayload> for FuelPrices {
    fn from(f: FuelsPayload) -> Self {
        Self {
            gas_eur_per_mwh: f.gas,
            kerosine_eur_per_mwh: f.kerosine,
            co2_eur_per_ton: f.co2,
            wind_percent: f.wind,
        }
    }
}

impl From<PowerPlantPayload> for Plant {
    fn from(p: PowerPlantPayload) -> Self {
        Self::new(
            p.name,
            PlantType::from_wire(&p.plant_type),
            p.efficiency,
            p.pmin,
            p.pmax,
        )
    }
}

impl From<ProductionPlanPayload> for DispatchRequest {
    fn from(payload: ProductionPlanPayload) -> Self {
        Self::new(
            payload.load,
            payload.fuels.into(),
            payload.powerplants.into_iter().map(Plant::from).collect(),
        )
    }
}

/// Maps a plan to the response body, preserving entry order.
pub fn plan_items(plan: &ProductionPlan) -> Vec<PlanItem> {
    plan.entries
        .iter()
        .map(|e| PlanItem {
            name: e.name.clone(),
            p: e.power_mw,
        })
        .collect()
}
