//! Greedy merit-order allocation.

use super::merit_order::RankedPlant;
use super::observer::DispatchObserver;
use super::types::{Commitment, EPSILON_MW, round_tenth_within};
use crate::fleet::{FuelPrices, Plant};

/// Result of the greedy pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOutcome<'a> {
    /// Plants visited before demand was covered, in merit order.
    pub commitments: Vec<Commitment<'a>>,
    /// Load left uncovered (MW). Negative when wind over-produces.
    pub remaining_mw: f64,
}

/// Output the greedy rules assign to `plant` given the load still uncovered.
///
/// Wind turbines always deliver their available output. Dispatchable plants
/// stay off when the remaining load is below their minimum, otherwise run at
/// `min(pmax, remaining)` raised to `pmin` if needed.
pub fn greedy_output_mw(plant: &Plant, remaining_mw: f64, fuels: &FuelPrices) -> f64 {
    let output_mw = if plant.plant_type.is_wind() {
        plant.available_mw(fuels)
    } else if remaining_mw < plant.pmin_mw {
        0.0
    } else {
        let tentative_mw = plant.pmax_mw.min(remaining_mw);
        if tentative_mw > 0.0 && tentative_mw < plant.pmin_mw {
            plant.pmin_mw
        } else {
            tentative_mw
        }
    };
    round_tenth_within(output_mw, plant.pmax_mw)
}

/// Walks the merit order assigning output until the load is covered.
///
/// Plants after the one that covers the load are left out of the result.
pub fn allocate<'a, O: DispatchObserver + ?Sized>(
    ranked: &[RankedPlant<'a>],
    load_mw: f64,
    fuels: &FuelPrices,
    observer: &mut O,
) -> GreedyOutcome<'a> {
    let mut remaining_mw = load_mw;
    let mut commitments = Vec::with_capacity(ranked.len());

    for &RankedPlant { plant, cost } in ranked {
        let power_mw = greedy_output_mw(plant, remaining_mw, fuels);
        remaining_mw -= power_mw;
        observer.assigned(plant, power_mw, remaining_mw);
        commitments.push(Commitment {
            plant,
            cost,
            power_mw,
        });

        if remaining_mw <= EPSILON_MW {
            break;
        }
    }

    GreedyOutcome {
        commitments,
        remaining_mw,
    }
}
