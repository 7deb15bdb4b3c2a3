//! Shortfall redistribution across already-committed plants.

use super::observer::DispatchObserver;
use super::types::{Commitment, DispatchSettings};
use crate::fleet::FuelPrices;

/// Highest output redistribution may push a commitment to (MW).
pub(crate) fn ceiling_mw(commitment: &Commitment<'_>, fuels: &FuelPrices, settings: &DispatchSettings) -> f64 {
    if settings.cap_wind_at_availability {
        commitment.plant.available_mw(fuels)
    } else {
        commitment.plant.pmax_mw
    }
}

/// Spreads `remaining_mw` over running plants that still have headroom.
///
/// Each round splits the remainder equally between the adjustable plants,
/// capped by each plant's headroom. Plants that reach their ceiling drop out
/// of the next round. Stops once the remainder is within
/// `settings.tolerance_mw` or no plant can take more.
///
/// Returns the load still uncovered.
pub fn redistribute<O: DispatchObserver + ?Sized>(
    commitments: &mut [Commitment<'_>],
    remaining_mw: f64,
    fuels: &FuelPrices,
    settings: &DispatchSettings,
    observer: &mut O,
) -> f64 {
    let has_headroom = |c: &Commitment<'_>| c.power_mw > 0.0 && c.power_mw < ceiling_mw(c, fuels, settings);

    let mut remaining_mw = remaining_mw;
    let mut adjustable: Vec<usize> = (0..commitments.len())
        .filter(|&i| has_headroom(&commitments[i]))
        .collect();

    while remaining_mw > settings.tolerance_mw && !adjustable.is_empty() {
        let share_mw = remaining_mw / adjustable.len() as f64;

        for &i in &adjustable {
            let ceiling = ceiling_mw(&commitments[i], fuels, settings);
            let commitment = &mut commitments[i];
            let headroom_mw = ceiling - commitment.power_mw;
            let delta_mw = share_mw.min(headroom_mw);

            // Land exactly on the ceiling so the plant drops out next round.
            commitment.power_mw = if delta_mw >= headroom_mw {
                ceiling
            } else {
                commitment.power_mw + delta_mw
            };
            remaining_mw -= delta_mw;
            observer.redistributed(commitment.plant, delta_mw, remaining_mw);

            if remaining_mw <= settings.tolerance_mw {
                break;
            }
        }

        adjustable.retain(|&i| has_headroom(&commitments[i]));
    }

    remaining_mw
}
