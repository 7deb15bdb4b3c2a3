//! Merit order ranking.

use super::cost::{CostModel, UNDISPATCHABLE};
use super::observer::DispatchObserver;
use crate::fleet::{FuelPrices, Plant};

/// A plant paired with the marginal cost it was ranked by.
///
/// Kept separate from [`Plant`] so ranking never mutates the request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedPlant<'a> {
    pub plant: &'a Plant,
    /// Marginal cost (€/MWh), [`UNDISPATCHABLE`] for unpriceable plants.
    pub cost: f64,
}

/// Prices every plant and orders them by ascending marginal cost.
///
/// The sort is stable: plants with equal cost keep their input order.
/// Plants the cost model cannot price are reported to `observer` and
/// ranked at [`UNDISPATCHABLE`].
pub fn rank<'a, O: DispatchObserver + ?Sized>(
    plants: &'a [Plant],
    fuels: &FuelPrices,
    model: &CostModel,
    observer: &mut O,
) -> Vec<RankedPlant<'a>> {
    let mut ranked: Vec<RankedPlant<'a>> = plants
        .iter()
        .map(|plant| {
            let cost = model.marginal_cost(plant, fuels).unwrap_or_else(|anomaly| {
                observer.cost_anomaly(plant, &anomaly);
                UNDISPATCHABLE
            });
            RankedPlant { plant, cost }
        })
        .collect();

    ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    ranked
}
