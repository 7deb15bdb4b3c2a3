//! Post-hoc summary of a production plan.

use std::fmt;

use super::types::ProductionPlan;

/// Aggregate indicators derived from a finished plan.
///
/// Computed from the plan entries alone so the summary always agrees with
/// what was returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    /// Requested load (MW).
    pub load_mw: f64,
    /// Sum of assigned outputs (MW).
    pub total_mw: f64,
    /// Output above the requested load (MW, >= 0).
    pub overproduction_mw: f64,
    /// Plants with nonzero output.
    pub running_plants: usize,
    /// Plants listed in the plan at zero output.
    pub idle_plants: usize,
    /// Fuel and emission cost of the plan (€/h).
    pub cost_eur_per_hour: f64,
    /// Output from plants without a finite marginal cost (MW).
    pub unpriced_mw: f64,
}

impl PlanSummary {
    pub fn from_plan(plan: &ProductionPlan) -> Self {
        let mut total_mw = 0.0_f64;
        let mut running_plants = 0_usize;
        let mut cost_eur_per_hour = 0.0_f64;
        let mut unpriced_mw = 0.0_f64;

        for entry in &plan.entries {
            total_mw += entry.power_mw;
            if entry.power_mw <= 0.0 {
                continue;
            }
            running_plants += 1;
            if entry.marginal_cost.is_finite() {
                cost_eur_per_hour += entry.power_mw * entry.marginal_cost;
            } else {
                unpriced_mw += entry.power_mw;
            }
        }

        Self {
            load_mw: plan.load_mw,
            total_mw,
            overproduction_mw: (total_mw - plan.load_mw).max(0.0),
            running_plants,
            idle_plants: plan.entries.len() - running_plants,
            cost_eur_per_hour,
            unpriced_mw,
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Plan Summary ---")?;
        writeln!(f, "Requested load:        {:.1} MW", self.load_mw)?;
        writeln!(f, "Scheduled output:      {:.1} MW", self.total_mw)?;
        writeln!(f, "Overproduction:        {:.1} MW", self.overproduction_mw)?;
        writeln!(
            f,
            "Plants:                {} running, {} idle",
            self.running_plants, self.idle_plants
        )?;
        if self.unpriced_mw > 0.0 {
            writeln!(f, "Unpriced output:       {:.1} MW", self.unpriced_mw)?;
        }
        write!(f, "Estimated cost:        {:.2} €/h", self.cost_eur_per_hour)
    }
}
