use car_cost_core::core::errors::CostError;
use car_cost_core::cost::{
    benefit_tax, business_lease_monthly_cost, cash_purchase_monthly_cost, depreciated_value,
    generate_cost_series, personal_lease_monthly_cost, summarize, yearly_values, Scenario,
    ScenarioInputs, ScenarioParameters,
};

const TOLERANCE: f64 = 1e-6;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn benefit_tax_matches_reference_figures() {
    let at_threshold = benefit_tax(30_000.0, true, 0.17, 0.22, 0.37).unwrap();
    assert_close(at_threshold.gross_annual, 5_100.0);
    assert_close(at_threshold.net_annual, 1_887.0);

    let ev_above = benefit_tax(40_000.0, true, 0.17, 0.22, 0.37).unwrap();
    assert_close(ev_above.gross_annual, 7_300.0);
    assert_close(ev_above.net_annual, 2_701.0);

    let petrol = benefit_tax(40_000.0, false, 0.17, 0.22, 0.37).unwrap();
    assert_close(petrol.gross_annual, 8_800.0);
    assert_close(petrol.net_annual, 3_256.0);
}

#[test]
fn negative_catalog_value_is_rejected() {
    let err = benefit_tax(-1.0, true, 0.17, 0.22, 0.37).unwrap_err();
    assert!(matches!(err, CostError::InvalidParameter(_)));
}

#[test]
fn depreciation_is_monotone_and_floored() {
    for &(price, residual, decay) in &[
        (18_000.0, 0.2, 0.08),
        (47_000.0, 0.5, 0.35),
        (1_000.0, 0.9, 1.5),
    ] {
        let mut previous = f64::INFINITY;
        for month in 1..=240 {
            let value = depreciated_value(price, month, decay, residual).unwrap().value;
            assert!(value <= previous, "value rose at month {month}");
            assert!(value >= price * residual);
            previous = value;
        }
    }
}

#[test]
fn depreciation_end_to_end_reference() {
    let result = depreciated_value(18_000.0, 12, 0.08, 0.2).unwrap();
    let expected = (18_000.0 * (-0.08_f64 * (11.5 / 12.0)).exp()).max(3_600.0);
    assert_close(result.value, expected);
    assert_close(result.monthly, 0.08 / 12.0 * expected);
}

#[test]
fn invalid_inputs_fail_fast() {
    assert!(matches!(
        depreciated_value(-5.0, 1, 0.08, 0.2),
        Err(CostError::InvalidParameter(_))
    ));
    assert!(matches!(
        depreciated_value(18_000.0, 0, 0.08, 0.2),
        Err(CostError::InvalidParameter(_))
    ));
    assert!(matches!(
        depreciated_value(18_000.0, 1, 0.0, 0.2),
        Err(CostError::InvalidParameter(_))
    ));

    let params = ScenarioParameters {
        years: 0,
        ..ScenarioParameters::default()
    };
    assert!(matches!(
        generate_cost_series(&ScenarioInputs::default(), &params),
        Err(CostError::DivisionDegenerate(_))
    ));

    let inputs = ScenarioInputs {
        purchase_price: -17_000.0,
        ..ScenarioInputs::default()
    };
    assert!(matches!(
        generate_cost_series(&inputs, &ScenarioParameters::default()),
        Err(CostError::InvalidParameter(_))
    ));
}

#[test]
fn cost_series_is_idempotent() {
    let inputs = ScenarioInputs::default();
    let params = ScenarioParameters::default();
    let first = generate_cost_series(&inputs, &params).unwrap();
    let second = generate_cost_series(&inputs, &params).unwrap();
    for scenario in Scenario::ALL {
        let a = first.series(scenario).values();
        let b = second.series(scenario).values();
        assert_eq!(a.len(), b.len());
        assert!(a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits()));
    }
}

#[test]
fn lease_series_are_flat_and_cash_varies() {
    let params = ScenarioParameters::default();
    let comparison = generate_cost_series(&ScenarioInputs::default(), &params).unwrap();
    assert_eq!(comparison.horizon_months(), 60);
    assert_eq!(comparison.months.first(), Some(&1));
    assert_eq!(comparison.months.last(), Some(&60));

    for series in [&comparison.business_lease, &comparison.personal_lease] {
        assert_eq!(series.len(), 60);
        let first = series.values()[0];
        assert!(series.values().iter().all(|value| *value == first));
    }

    let cash = comparison.cash.values();
    assert_eq!(cash.len(), 60);
    assert!(cash.windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn series_values_match_the_monthly_functions() {
    let params = ScenarioParameters::default();
    let inputs = ScenarioInputs::default();
    let comparison = generate_cost_series(&inputs, &params).unwrap();

    let business = business_lease_monthly_cost(
        inputs.business_lease_monthly,
        inputs.catalog_value,
        inputs.is_ev,
        &params,
    )
    .unwrap();
    let personal =
        personal_lease_monthly_cost(inputs.personal_lease_monthly, true, 15_000.0, 0.12, 0.08)
            .unwrap();
    let cash_month_7 =
        cash_purchase_monthly_cost(inputs.purchase_price, true, 7, true, &params).unwrap();

    assert_eq!(comparison.business_lease.month(1), Some(business));
    assert_eq!(comparison.personal_lease.month(60), Some(personal));
    assert_eq!(comparison.cash.month(7), Some(cash_month_7));
    // 2701 / 12 + 409.5 + (500 - 650) * 0.63
    assert_close(business, 2_701.0 / 12.0 + 409.5 - 94.5);
    assert_close(personal, 550.0);
}

#[test]
fn summary_and_yearly_values_agree_with_depreciation() {
    let params = ScenarioParameters::default();
    let inputs = ScenarioInputs::default();
    let comparison = generate_cost_series(&inputs, &params).unwrap();
    let summary = summarize(&comparison, &inputs, &params).unwrap();

    let final_value = depreciated_value(17_000.0, 60, 0.08, 0.2).unwrap().value;
    assert_close(summary.cash_depreciation, 17_000.0 - final_value);

    let years = yearly_values(17_000.0, true, &params).unwrap();
    assert_eq!(years.len(), 5);
    assert_close(years[4].end_value, final_value);
    let first_month = depreciated_value(17_000.0, 1, 0.08, 0.2).unwrap().value;
    let end_of_year_one = depreciated_value(17_000.0, 12, 0.08, 0.2).unwrap().value;
    assert_close(years[0].depreciation, first_month - end_of_year_one);
}

#[test]
fn oversized_horizon_is_rejected_before_projection() {
    let params = ScenarioParameters {
        years: 357_913_942,
        ..ScenarioParameters::default()
    };
    assert!(matches!(
        generate_cost_series(&ScenarioInputs::default(), &params),
        Err(CostError::InvalidParameter(_))
    ));
    assert!(matches!(
        yearly_values(17_000.0, true, &params),
        Err(CostError::InvalidParameter(_))
    ));

    let longest = ScenarioParameters {
        years: car_cost_core::cost::params::MAX_HORIZON_YEARS,
        ..ScenarioParameters::default()
    };
    let comparison = generate_cost_series(&ScenarioInputs::default(), &longest).unwrap();
    assert_eq!(comparison.horizon_months(), 1_200);
    assert!(summarize(&comparison, &ScenarioInputs::default(), &longest).is_ok());
}
