//! Plan assembly and the end-to-end dispatch entry point.

use super::cost::CostModel;
use super::greedy::{GreedyOutcome, allocate};
use super::merit_order::rank;
use super::observer::DispatchObserver;
use super::redistribute::{ceiling_mw, redistribute};
use super::types::{
    AllocationEntry, Commitment, DispatchSettings, EPSILON_MW, ProductionPlan, round_tenth,
    round_tenth_within,
};
use crate::error::DispatchError;
use crate::fleet::{DispatchRequest, FuelPrices};

/// Granularity of reported outputs (MW).
const STEP_MW: f64 = 0.1;

/// Highest value an output may be rounded to.
///
/// Same ceiling as redistribution, except that a greedy output already
/// rounded above it is kept as is.
fn rounding_ceiling_mw(
    commitment: &Commitment<'_>,
    fuels: &FuelPrices,
    settings: &DispatchSettings,
) -> f64 {
    ceiling_mw(commitment, fuels, settings).max(commitment.power_mw)
}

/// Lowest value a running output may be stepped down to.
fn rounding_floor_mw(commitment: &Commitment<'_>) -> f64 {
    if commitment.plant.plant_type.is_wind() {
        0.0
    } else {
        commitment.plant.pmin_mw.max(0.0)
    }
}

/// Index of the largest displacement, first one on ties.
fn most_displaced(displacements: impl Iterator<Item = Option<f64>>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, displacement) in displacements.enumerate() {
        let Some(d) = displacement else {
            continue;
        };
        if best.is_none_or(|(_, b)| d > b) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Rounds committed outputs to 0.1 MW while keeping their total near the load.
///
/// Every output is first rounded to nearest within its ceiling. While the
/// rounded total is more than half a step away from `load_mw`, the output
/// that rounding moved furthest in the offending direction is stepped back
/// by 0.1 MW. Steps never alternate direction, so each output moves at most
/// once and stays within 0.1 MW of its unrounded value.
fn round_outputs(
    load_mw: f64,
    commitments: &[Commitment<'_>],
    fuels: &FuelPrices,
    settings: &DispatchSettings,
) -> Vec<f64> {
    let ceilings: Vec<f64> = commitments
        .iter()
        .map(|c| rounding_ceiling_mw(c, fuels, settings))
        .collect();
    let mut outputs: Vec<f64> = commitments
        .iter()
        .zip(&ceilings)
        .map(|(c, &ceiling)| round_tenth_within(c.power_mw, ceiling))
        .collect();

    loop {
        let gap_mw = load_mw - outputs.iter().sum::<f64>();

        let step = if gap_mw > STEP_MW / 2.0 + EPSILON_MW {
            most_displaced(commitments.iter().enumerate().map(|(i, c)| {
                let below_mw = c.power_mw - outputs[i];
                (below_mw > EPSILON_MW && outputs[i] + STEP_MW <= ceilings[i] + EPSILON_MW)
                    .then_some(below_mw)
            }))
            .map(|i| (i, STEP_MW))
        } else if gap_mw < -(STEP_MW / 2.0 + EPSILON_MW) {
            most_displaced(commitments.iter().enumerate().map(|(i, c)| {
                let above_mw = outputs[i] - c.power_mw;
                (above_mw > EPSILON_MW && outputs[i] - STEP_MW >= rounding_floor_mw(c) - EPSILON_MW)
                    .then_some(above_mw)
            }))
            .map(|i| (i, -STEP_MW))
        } else {
            None
        };

        let Some((i, step_mw)) = step else {
            break;
        };
        outputs[i] = round_tenth(outputs[i] + step_mw).max(0.0);
    }

    outputs
}

/// Turns the final commitments into a plan, or fails if load is uncovered.
///
/// Outputs are rounded to 0.1 MW without letting the rounding push the
/// total away from the load; the tolerance is checked both before and
/// after rounding.
///
/// # Errors
///
/// Returns [`DispatchError::InfeasibleDemand`] when `remaining_mw`, or the
/// gap left by the rounded outputs, exceeds `settings.tolerance_mw`. No
/// partial plan is produced.
pub fn assemble(
    load_mw: f64,
    commitments: Vec<Commitment<'_>>,
    remaining_mw: f64,
    fuels: &FuelPrices,
    settings: &DispatchSettings,
) -> Result<ProductionPlan, DispatchError> {
    if remaining_mw > settings.tolerance_mw {
        return Err(DispatchError::InfeasibleDemand {
            unmet_mw: remaining_mw,
        });
    }

    let outputs = round_outputs(load_mw, &commitments, fuels, settings);
    let unmet_mw = load_mw - outputs.iter().sum::<f64>();
    if unmet_mw > settings.tolerance_mw + EPSILON_MW {
        return Err(DispatchError::InfeasibleDemand { unmet_mw });
    }

    let entries = commitments
        .into_iter()
        .zip(outputs)
        .map(|(c, power_mw)| AllocationEntry {
            name: c.plant.name.clone(),
            power_mw,
            marginal_cost: c.cost,
        })
        .collect();

    Ok(ProductionPlan { load_mw, entries })
}

/// Computes production plans under fixed [`DispatchSettings`].
///
/// Holds no per-request state; one instance can serve any number of
/// requests, including concurrently.
///
/// # Examples
///
/// ```
/// use powerplant_dispatch::dispatch::{Dispatcher, NullObserver};
/// use powerplant_dispatch::fleet::{DispatchRequest, FuelPrices, Plant, PlantType};
///
/// let fuels = FuelPrices {
///     gas_eur_per_mwh: 10.0,
///     kerosine_eur_per_mwh: 50.0,
///     co2_eur_per_ton: 0.0,
///     wind_percent: 0.0,
/// };
/// let plants = vec![Plant::new("gas", PlantType::GasFired, 0.5, 0.0, 600.0)];
/// let request = DispatchRequest::new(500.0, fuels, plants);
///
/// let plan = Dispatcher::default().plan(&request, &mut NullObserver).unwrap();
/// assert_eq!(plan.entries[0].power_mw, 500.0);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Dispatcher {
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Runs cost model, merit order, greedy allocation, redistribution, and
    /// assembly for one request.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidInput`] for malformed requests and
    /// [`DispatchError::InfeasibleDemand`] when the fleet cannot cover the
    /// load.
    pub fn plan<O: DispatchObserver + ?Sized>(
        &self,
        request: &DispatchRequest,
        observer: &mut O,
    ) -> Result<ProductionPlan, DispatchError> {
        request.validate()?;

        let model = CostModel::new(self.settings.co2_emission_factor);
        let ranked = rank(&request.plants, &request.fuels, &model, observer);

        let GreedyOutcome {
            mut commitments,
            mut remaining_mw,
        } = allocate(&ranked, request.load_mw, &request.fuels, observer);

        if remaining_mw > EPSILON_MW {
            observer.shortfall(remaining_mw);
            remaining_mw = redistribute(
                &mut commitments,
                remaining_mw,
                &request.fuels,
                &self.settings,
                observer,
            );
        }

        assemble(
            request.load_mw,
            commitments,
            remaining_mw,
            &request.fuels,
            &self.settings,
        )
    }
}

/// Plans `request` with default settings.
///
/// # Errors
///
/// See [`Dispatcher::plan`].
pub fn production_plan<O: DispatchObserver + ?Sized>(
    request: &DispatchRequest,
    observer: &mut O,
) -> Result<ProductionPlan, DispatchError> {
    Dispatcher::default().plan(request, observer)
}
