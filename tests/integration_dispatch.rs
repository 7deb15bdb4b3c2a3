//! Integration tests for end-to-end dispatch on the reference fleet.

mod common;

use approx::assert_abs_diff_eq;

use powerplant_dispatch::dispatch::{
    DispatchObserver, DispatchSettings, Dispatcher, NullObserver, PlanSummary, ProductionPlan,
    production_plan,
};
use powerplant_dispatch::dispatch::cost::CostAnomaly;
use powerplant_dispatch::error::DispatchError;
use powerplant_dispatch::fleet::{DispatchRequest, FuelPrices, Plant, PlantType};

fn powers(plan: &ProductionPlan) -> Vec<(&str, f64)> {
    plan.entries
        .iter()
        .map(|e| (e.name.as_str(), e.power_mw))
        .collect()
}

#[derive(Default)]
struct Recorder {
    anomalies: Vec<(String, CostAnomaly)>,
    assignments: usize,
    shortfalls: Vec<f64>,
}

impl DispatchObserver for Recorder {
    fn cost_anomaly(&mut self, plant: &Plant, anomaly: &CostAnomaly) {
        self.anomalies.push((plant.name.clone(), anomaly.clone()));
    }

    fn assigned(&mut self, _plant: &Plant, _power_mw: f64, _remaining_mw: f64) {
        self.assignments += 1;
    }

    fn shortfall(&mut self, remaining_mw: f64) {
        self.shortfalls.push(remaining_mw);
    }
}

#[test]
fn reference_fleet_with_wind_stops_after_first_gas_unit() {
    let request = DispatchRequest::new(480.0, common::reference_fuels(60.0), common::reference_fleet());
    let plan = production_plan(&request, &mut NullObserver).unwrap();

    assert_eq!(
        powers(&plan),
        vec![("windpark1", 90.0), ("windpark2", 21.6), ("gasfiredbig1", 368.4)]
    );
    assert_abs_diff_eq!(plan.total_mw(), 480.0, epsilon = 1e-9);
}

#[test]
fn high_load_spills_into_second_gas_unit() {
    let request = DispatchRequest::new(910.0, common::reference_fuels(60.0), common::reference_fleet());
    let plan = production_plan(&request, &mut NullObserver).unwrap();

    assert_eq!(
        powers(&plan),
        vec![
            ("windpark1", 90.0),
            ("windpark2", 21.6),
            ("gasfiredbig1", 460.0),
            ("gasfiredbig2", 338.4),
        ]
    );
    assert_abs_diff_eq!(plan.total_mw(), 910.0, epsilon = 1e-9);
}

#[test]
fn calm_day_leaves_shortfall_blocked_by_minimum_outputs() {
    let request = DispatchRequest::new(480.0, common::reference_fuels(0.0), common::reference_fleet());
    let mut recorder = Recorder::default();

    let result = production_plan(&request, &mut recorder);

    assert_eq!(result, Err(DispatchError::InfeasibleDemand { unmet_mw: 4.0 }));
    assert_eq!(recorder.shortfalls, vec![4.0]);
    // Every plant is visited: the load is never covered.
    assert_eq!(recorder.assignments, 6);
}

#[test]
fn plan_lists_entries_in_merit_order() {
    let request = DispatchRequest::new(910.0, common::reference_fuels(60.0), common::reference_fleet());
    let plan = production_plan(&request, &mut NullObserver).unwrap();

    let costs: Vec<f64> = plan.entries.iter().map(|e| e.marginal_cost).collect();
    assert!(costs.windows(2).all(|w| w[0] <= w[1]), "{costs:?}");
    assert_eq!(costs[0], 0.0);
}

#[test]
fn repeated_runs_are_identical() {
    let request = DispatchRequest::new(910.0, common::reference_fuels(60.0), common::reference_fleet());
    let first = production_plan(&request, &mut NullObserver);
    let second = production_plan(&request, &mut NullObserver);
    assert_eq!(first, second);
}

#[test]
fn identical_plants_keep_input_order() {
    let plants = vec![
        Plant::new("twin_b", PlantType::GasFired, 0.5, 0.0, 50.0),
        Plant::new("twin_a", PlantType::GasFired, 0.5, 0.0, 50.0),
    ];
    let request = DispatchRequest::new(80.0, common::reference_fuels(0.0), plants);
    let plan = production_plan(&request, &mut NullObserver).unwrap();
    assert_eq!(powers(&plan), vec![("twin_b", 50.0), ("twin_a", 30.0)]);
}

#[test]
fn wind_produces_its_available_output_even_above_demand() {
    let mut plants = common::reference_fleet();
    plants.retain(|p| p.name != "windpark2");
    let request = DispatchRequest::new(40.0, common::reference_fuels(60.0), plants);
    let plan = production_plan(&request, &mut NullObserver).unwrap();

    assert_eq!(powers(&plan), vec![("windpark1", 90.0)]);
    let summary = PlanSummary::from_plan(&plan);
    assert_abs_diff_eq!(summary.overproduction_mw, 50.0, epsilon = 1e-9);
}

#[test]
fn unpriceable_plants_are_reported_and_dispatched_last() {
    let mut plants = common::reference_fleet();
    plants.insert(0, Plant::new("reactor", PlantType::Other("nuclear".into()), 0.4, 0.0, 1000.0));
    plants.insert(1, Plant::new("retired", PlantType::GasFired, 0.0, 0.0, 1000.0));
    let request = DispatchRequest::new(1300.0, common::reference_fuels(60.0), plants);
    let mut recorder = Recorder::default();

    let plan = production_plan(&request, &mut recorder).unwrap();

    assert_eq!(
        recorder.anomalies,
        vec![
            ("reactor".to_string(), CostAnomaly::UnknownPlantType("nuclear".into())),
            ("retired".to_string(), CostAnomaly::ZeroEfficiency),
        ]
    );
    // Priced capacity is 1257.6 MW; the reactor covers the rest and the
    // retired unit is never reached.
    let names: Vec<&str> = plan.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names.len(), 7);
    assert_eq!(names[6], "reactor");
    assert_abs_diff_eq!(plan.entries[6].power_mw, 42.4, epsilon = 1e-9);
    assert!(plan.entry("retired").is_none());
}

#[test]
fn unpriceable_plant_covers_what_priced_plants_cannot() {
    let plants = vec![
        Plant::new("tj1", PlantType::Turbojet, 0.3, 0.0, 16.0),
        Plant::new("reactor", PlantType::Other("nuclear".into()), 0.4, 0.0, 100.0),
    ];
    let request = DispatchRequest::new(50.0, common::reference_fuels(0.0), plants);
    let plan = production_plan(&request, &mut NullObserver).unwrap();

    assert_eq!(powers(&plan), vec![("tj1", 16.0), ("reactor", 34.0)]);
    assert!(plan.entries[1].marginal_cost.is_infinite());
    assert_eq!(PlanSummary::from_plan(&plan).unpriced_mw, 34.0);
}

#[test]
fn redistribution_tops_up_wind_by_default_but_not_when_capped() {
    let plants = vec![
        Plant::new("windpark1", PlantType::WindTurbine, 1.0, 0.0, 150.0),
        Plant::new("tj1", PlantType::Turbojet, 0.3, 0.0, 16.0),
    ];
    let request = DispatchRequest::new(110.0, common::reference_fuels(60.0), plants);

    let plan = production_plan(&request, &mut NullObserver).unwrap();
    assert_eq!(powers(&plan), vec![("windpark1", 94.0), ("tj1", 16.0)]);

    let capped = Dispatcher::new(DispatchSettings {
        cap_wind_at_availability: true,
        ..DispatchSettings::default()
    });
    let result = capped.plan(&request, &mut NullObserver);
    assert!(matches!(
        result,
        Err(DispatchError::InfeasibleDemand { unmet_mw }) if (unmet_mw - 4.0).abs() < 1e-9
    ));
}

#[test]
fn wider_tolerance_accepts_small_shortfall() {
    let request = DispatchRequest::new(480.0, common::reference_fuels(0.0), common::reference_fleet());
    let lenient = Dispatcher::new(DispatchSettings {
        tolerance_mw: 5.0,
        ..DispatchSettings::default()
    });
    let plan = lenient.plan(&request, &mut NullObserver).unwrap();
    assert_abs_diff_eq!(plan.total_mw(), 476.0, epsilon = 1e-9);
}

#[test]
fn emission_factor_changes_the_merit_order() {
    // A cheap-fuel but dirty gas unit against a turbojet.
    let plants = vec![
        Plant::new("tj", PlantType::Turbojet, 0.5, 0.0, 100.0),
        Plant::new("gas", PlantType::GasFired, 0.5, 0.0, 100.0),
    ];
    let fuels = FuelPrices {
        gas_eur_per_mwh: 20.0,
        kerosine_eur_per_mwh: 30.0,
        co2_eur_per_ton: 100.0,
        wind_percent: 0.0,
    };
    let request = DispatchRequest::new(50.0, fuels, plants);

    // Default factor: gas = 40 + 100 * 0.2925 = 69.25 > turbojet 60.
    let plan = production_plan(&request, &mut NullObserver).unwrap();
    assert_eq!(powers(&plan), vec![("tj", 50.0)]);

    let clean = Dispatcher::new(DispatchSettings {
        co2_emission_factor: 0.0,
        ..DispatchSettings::default()
    });
    let plan = clean.plan(&request, &mut NullObserver).unwrap();
    assert_eq!(powers(&plan), vec![("gas", 50.0)]);
}

#[test]
fn shared_shortfall_rounds_to_the_load() {
    let plants: Vec<Plant> = (1..=4)
        .map(|i| Plant::new(format!("windpark{i}"), PlantType::WindTurbine, 1.0, 0.0, 100.0))
        .collect();
    let request = DispatchRequest::new(41.0, common::reference_fuels(10.0), plants);

    let plan = production_plan(&request, &mut NullObserver).unwrap();

    assert_abs_diff_eq!(plan.total_mw(), 41.0, epsilon = 1e-9);
    for entry in &plan.entries {
        assert!(entry.power_mw == 10.2 || entry.power_mw == 10.3, "{entry:?}");
    }
}
