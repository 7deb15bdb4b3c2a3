//! Observability hooks handed to the dispatcher.

use tracing::{debug, warn};

use super::cost::CostAnomaly;
use crate::fleet::Plant;

/// Receives progress events from a dispatch run.
///
/// All methods default to no-ops so implementors only override what they
/// care about. The dispatcher never logs on its own.
pub trait DispatchObserver {
    /// A plant could not be priced and was ranked last.
    fn cost_anomaly(&mut self, _plant: &Plant, _anomaly: &CostAnomaly) {}

    /// The greedy pass assigned `power_mw` to `plant`, leaving `remaining_mw`.
    fn assigned(&mut self, _plant: &Plant, _power_mw: f64, _remaining_mw: f64) {}

    /// The greedy pass exhausted the merit order with demand uncovered.
    fn shortfall(&mut self, _remaining_mw: f64) {}

    /// Redistribution raised `plant` by `delta_mw`, leaving `remaining_mw`.
    fn redistributed(&mut self, _plant: &Plant, _delta_mw: f64, _remaining_mw: f64) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DispatchObserver for NullObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn cost_anomaly(&mut self, plant: &Plant, anomaly: &CostAnomaly) {
        warn!(
            plant = %plant.name,
            plant_type = %plant.plant_type,
            %anomaly,
            "Plant excluded from merit order"
        );
    }

    fn assigned(&mut self, plant: &Plant, power_mw: f64, remaining_mw: f64) {
        debug!(plant = %plant.name, power_mw, remaining_mw, "Assigned production");
    }

    fn shortfall(&mut self, remaining_mw: f64) {
        warn!(
            missing_mw = remaining_mw,
            "Could not fully cover the load, redistributing"
        );
    }

    fn redistributed(&mut self, plant: &Plant, delta_mw: f64, remaining_mw: f64) {
        debug!(plant = %plant.name, delta_mw, remaining_mw, "Redistributed shortfall");
    }
}
