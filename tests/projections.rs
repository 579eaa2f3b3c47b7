use rent_vs_buy::{
    compare, compute_amortization, compute_investment, compute_rent, BuyVsRentScenario,
    DomainError, Verdict,
};
use rstest::rstest;

#[test]
fn test_five_year_hold_of_a_thirty_year_loan() {
    let loan = compute_amortization(7.0, 1_100_000.0, 60, 200.0, 1_200.0, 360).unwrap();

    assert!(loan.monthly_payment > 7_300.0 && loan.monthly_payment < 7_330.0);
    assert!(loan.cumulative_interest_paid > 0.6 * loan.monthly_payment * 60.0);
    let total_paid = loan.cumulative_interest_paid + loan.cumulative_principal_paid;
    assert!((total_paid - loan.monthly_payment * 60.0).abs() < 1e-6);
    assert!(
        (loan.outstanding_principal + loan.cumulative_principal_paid - 1_100_000.0).abs() < 1e-6
    );
}

#[test]
fn test_rent_escalates_once_per_year() {
    let result = compute_rent(3_100.0, 5.0, 60).unwrap();

    // Five blocks of twelve months, each followed by a 5% increase.
    let expected = 3_100.0 * 1.05_f64.powi(5);
    assert!((result.final_monthly_rent - expected).abs() < 1e-9);
    assert!(result.final_monthly_rent > 3_100.0 * 1.05_f64.powi(4));

    let through_month_12 = compute_rent(3_100.0, 5.0, 12).unwrap().total_rent_paid;
    let through_month_13 = compute_rent(3_100.0, 5.0, 13).unwrap().total_rent_paid;
    assert!((through_month_13 - through_month_12 - 3_100.0 * 1.05).abs() < 1e-9);
}

#[test]
fn test_negative_contributions_still_compound() {
    let result = compute_investment(40_000.0, -3_100.0, 5.0, 60, -5.0).unwrap();

    assert!(result.final_balance < 40_000.0);
    assert_eq!(result.total_gains, result.final_balance - result.total_contributed);
}

#[rstest]
#[case(compute_amortization(7.0, 100_000.0, 12, 0.0, 0.0, 0).map(|_| ()), "tenor_months")]
#[case(compute_amortization(7.0, -100_000.0, 12, 0.0, 0.0, 360).map(|_| ()), "principal")]
#[case(compute_rent(3_100.0, 5.0, 0).map(|_| ()), "horizon_months")]
#[case(compute_investment(-1.0, 0.0, 5.0, 12, 0.0).map(|_| ()), "initial_deposit")]
#[case(compute_investment(1_000.0, 0.0, 5.0, 0, 0.0).map(|_| ()), "horizon_months")]
fn test_domain_errors_name_the_parameter(
    #[case] result: Result<(), DomainError>,
    #[case] field: &str,
) {
    assert_eq!(result.unwrap_err().field(), field);
}

#[test]
fn test_identical_calls_are_bit_identical() {
    let first = compare(&BuyVsRentScenario::default()).unwrap();
    let second = compare(&BuyVsRentScenario::default()).unwrap();

    assert_eq!(first.renting_position.to_bits(), second.renting_position.to_bits());
    assert_eq!(first.buying_position.to_bits(), second.buying_position.to_bits());
    assert_eq!(first, second);
}

#[test]
fn test_projections_are_bit_identical_across_calls() {
    let first_rent = compute_rent(3_100.0, 5.0, 65).unwrap();
    let second_rent = compute_rent(3_100.0, 5.0, 65).unwrap();
    assert_eq!(first_rent.total_rent_paid.to_bits(), second_rent.total_rent_paid.to_bits());
    assert_eq!(
        first_rent.final_monthly_rent.to_bits(),
        second_rent.final_monthly_rent.to_bits()
    );

    let first_savings = compute_investment(40_000.0, -1_200.0, 5.0, 65, -5.0).unwrap();
    let second_savings = compute_investment(40_000.0, -1_200.0, 5.0, 65, -5.0).unwrap();
    assert_eq!(
        first_savings.final_balance.to_bits(),
        second_savings.final_balance.to_bits()
    );
    assert_eq!(first_savings.total_gains.to_bits(), second_savings.total_gains.to_bits());
}

#[test]
fn test_demo_scenario_file_matches_reference() {
    let raw = include_str!("../demos/scenario.json");
    let scenario: BuyVsRentScenario = serde_json::from_str(raw).unwrap();

    assert_eq!(scenario, BuyVsRentScenario::default());
    assert_eq!(compare(&scenario).unwrap().verdict, Verdict::Rent);
}
