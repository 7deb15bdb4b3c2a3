//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use powerplant_dispatch::fleet::{FuelPrices, Plant, PlantType};
use powerplant_dispatch::payload::ProductionPlanPayload;

/// Reference market: gas 13.4 €/MWh, kerosine 50.8 €/MWh, CO2 20 €/ton.
pub fn reference_fuels(wind_percent: f64) -> FuelPrices {
    FuelPrices {
        gas_eur_per_mwh: 13.4,
        kerosine_eur_per_mwh: 50.8,
        co2_eur_per_ton: 20.0,
        wind_percent,
    }
}

/// Reference fleet: two large and one smaller gas unit, a turbojet, two wind parks.
pub fn reference_fleet() -> Vec<Plant> {
    vec![
        Plant::new("gasfiredbig1", PlantType::GasFired, 0.53, 100.0, 460.0),
        Plant::new("gasfiredbig2", PlantType::GasFired, 0.53, 100.0, 460.0),
        Plant::new("gasfiredsomewhatsmaller", PlantType::GasFired, 0.37, 40.0, 210.0),
        Plant::new("tj1", PlantType::Turbojet, 0.3, 0.0, 16.0),
        Plant::new("windpark1", PlantType::WindTurbine, 1.0, 0.0, 150.0),
        Plant::new("windpark2", PlantType::WindTurbine, 1.0, 0.0, 36.0),
    ]
}

/// Path of a bundled payload file under `payloads/`.
pub fn payload_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("payloads")
        .join(name)
}

/// Loads a bundled payload file.
pub fn load_payload(name: &str) -> ProductionPlanPayload {
    ProductionPlanPayload::from_json_file(&payload_path(name))
        .unwrap_or_else(|e| panic!("payload {name} should load: {e}"))
}

/// Raw JSON text of a bundled payload file.
pub fn payload_json(name: &str) -> String {
    std::fs::read_to_string(payload_path(name))
        .unwrap_or_else(|e| panic!("payload {name} should be readable: {e}"))
}
