//! Dispatch settings, working allocations, and plan output types.

use crate::fleet::Plant;

/// Remaining load at or below this magnitude counts as covered.
///
/// Absorbs floating-point residue from subtracting rounded outputs.
pub const EPSILON_MW: f64 = 1e-9;

/// Tunables of the dispatcher.
///
/// The defaults reproduce the reference dispatch rules.
///
/// # Examples
///
/// ```
/// use powerplant_dispatch::dispatch::DispatchSettings;
///
/// let settings = DispatchSettings::default();
/// assert_eq!(settings.co2_emission_factor, 0.3);
/// assert_eq!(settings.tolerance_mw, 0.1);
/// assert!(!settings.cap_wind_at_availability);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchSettings {
    /// Base CO2 emission factor of gas-fired plants (ton/MWh).
    pub co2_emission_factor: f64,
    /// Unmet load below this amount is treated as covered (MW).
    pub tolerance_mw: f64,
    /// Limit wind turbines to their available output during redistribution
    /// instead of their nameplate `pmax`.
    pub cap_wind_at_availability: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            co2_emission_factor: 0.3,
            tolerance_mw: 0.1,
            cap_wind_at_availability: false,
        }
    }
}

/// Working allocation of one plant while a plan is being built.
#[derive(Debug, Clone, PartialEq)]
pub struct Commitment<'a> {
    pub plant: &'a Plant,
    /// Marginal cost the plant was ranked with (€/MWh).
    pub cost: f64,
    /// Assigned output (MW).
    pub power_mw: f64,
}

/// One line of a production plan.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationEntry {
    /// Plant name.
    pub name: String,
    /// Assigned output, rounded to 0.1 MW.
    pub power_mw: f64,
    /// Marginal cost used for ranking (€/MWh, infinite when undispatchable).
    pub marginal_cost: f64,
}

/// Successful dispatch result: entries in commitment order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionPlan {
    /// Load the plan was computed for (MW).
    pub load_mw: f64,
    pub entries: Vec<AllocationEntry>,
}

impl ProductionPlan {
    /// Sum of all assigned outputs (MW).
    pub fn total_mw(&self) -> f64 {
        self.entries.iter().map(|e| e.power_mw).sum()
    }

    /// Looks up the entry of a plant by name.
    pub fn entry(&self, name: &str) -> Option<&AllocationEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Rounds a power value to one decimal place of a MW.
pub fn round_tenth(value_mw: f64) -> f64 {
    (value_mw * 10.0).round() / 10.0
}

/// Rounds to 0.1 MW without exceeding `ceiling_mw` or dropping below zero.
///
/// Falls back to rounding down when rounding to nearest would cross the
/// ceiling, e.g. a 10.06 MW plant running flat out reports 10.0 MW.
pub fn round_tenth_within(value_mw: f64, ceiling_mw: f64) -> f64 {
    let rounded = round_tenth(value_mw);
    let bounded = if rounded > ceiling_mw {
        (ceiling_mw * 10.0).floor() / 10.0
    } else {
        rounded
    };
    bounded.max(0.0)
}
