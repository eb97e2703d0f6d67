mod common;

use car_cost_core::core::errors::CostError;
use car_cost_core::cost::{
    cost_over_time, depreciated_value, simulate_fleet, RoundingPolicy, ScenarioParameters,
};
use car_cost_core::domain::AcquisitionType;
use common::{bought_vehicle, personal_lease};

fn monthly_running_cost(month: u32) -> f64 {
    let dep = depreciated_value(18_000.0, month, 0.08, 0.2).unwrap();
    15_000.0 * 0.08 / 12.0 + 280.0 + 1_000.0 / 12.0 + dep.monthly
}

#[test]
fn bought_vehicle_pays_in_first_month_and_sells_in_last() {
    let params = ScenarioParameters {
        rounding: RoundingPolicy::FinalOnly,
        ..ScenarioParameters::default()
    };
    let vehicle = bought_vehicle("tesla_model_3", 18_000.0);
    let totals = cost_over_time(&vehicle, 3, 15_000.0, &params).unwrap();
    assert_eq!(totals.len(), 36);

    let first = totals.month(1).unwrap();
    let expected_first = 18_000.0 + monthly_running_cost(1);
    assert!((first - expected_first).abs() <= 0.005 + 1e-9);

    let before_last = totals.month(35).unwrap();
    let last = totals.month(36).unwrap();
    let final_value = depreciated_value(18_000.0, 36, 0.08, 0.2).unwrap().value;
    let expected_step = monthly_running_cost(36) - final_value;
    assert!(((last - before_last) - expected_step).abs() <= 0.01 + 1e-9);
    assert!(last < before_last);
}

#[test]
fn rounding_policies_agree_within_a_cent_per_month() {
    let vehicle = bought_vehicle("opel_corsa_e", 17_000.0);
    let per_step = cost_over_time(&vehicle, 5, 15_000.0, &ScenarioParameters::default()).unwrap();
    let final_only = cost_over_time(
        &vehicle,
        5,
        15_000.0,
        &ScenarioParameters {
            rounding: RoundingPolicy::FinalOnly,
            ..ScenarioParameters::default()
        },
    )
    .unwrap();
    let drift = (per_step.last().unwrap() - final_only.last().unwrap()).abs();
    assert!(drift <= 0.01 * 60.0, "drift {drift}");
    for total in per_step.values() {
        assert!(((total * 100.0).round() - total * 100.0).abs() < 1e-6);
    }
}

#[test]
fn fleet_keeps_input_order_and_names() {
    let fleet = vec![
        bought_vehicle("tesla_model_3", 18_000.0),
        personal_lease("zoe_lease", 450.0, 0.08),
    ];
    let costs = simulate_fleet(&fleet, 1, 15_000.0, &ScenarioParameters::default()).unwrap();
    assert_eq!(costs.len(), 2);
    assert_eq!(costs[0].name, "tesla_model_3");
    assert_eq!(costs[0].vehicle_id, fleet[0].id);
    assert_eq!(costs[1].name, "zoe_lease");
    assert_eq!(costs[1].final_total(), 6_600.0);
    assert!(costs[1].monthly().values().iter().all(|step| *step == 550.0));
}

#[test]
fn business_lease_vehicle_uses_benefit_tax() {
    let mut vehicle = personal_lease("company_car", 650.0, 0.0);
    vehicle.acquisition = AcquisitionType::BusinessLease;
    vehicle.catalog_value = 40_000.0;
    vehicle.is_ev = true;
    let totals = cost_over_time(&vehicle, 1, 15_000.0, &ScenarioParameters::default()).unwrap();
    let expected = 2_701.0 / 12.0 + 409.5;
    assert!((totals.month(1).unwrap() - expected).abs() <= 0.005 + 1e-9);
}

#[test]
fn invalid_vehicle_is_rejected() {
    let vehicle = bought_vehicle("broken", -1.0);
    let err = cost_over_time(&vehicle, 1, 15_000.0, &ScenarioParameters::default()).unwrap_err();
    assert!(matches!(err, CostError::InvalidParameter(_)));

    let err = simulate_fleet(
        &[bought_vehicle("ok", 1.0)],
        0,
        15_000.0,
        &ScenarioParameters::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CostError::DivisionDegenerate(_)));
}

#[test]
fn oversized_horizon_is_rejected() {
    let params = ScenarioParameters::default();
    let err = cost_over_time(&bought_vehicle("tesla", 18_000.0), 357_913_942, 15_000.0, &params)
        .unwrap_err();
    assert!(matches!(err, CostError::InvalidParameter(_)));

    let err = simulate_fleet(
        &[personal_lease("polo_lease", 390.0, 0.12)],
        u32::MAX,
        15_000.0,
        &params,
    )
    .unwrap_err();
    assert!(matches!(err, CostError::InvalidParameter(_)));
}
