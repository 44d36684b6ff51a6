//! Reference Scenario Tests
//!
//! Hand-computed estimates for the default rate table:
//! - Scenario 1: neutral multipliers
//! - Scenario 2: premium finish (structural unchanged)
//! - Scenario 3: commercial, basic finish, remote, two floors

use esquared_estimator_core::{
    estimate, BuildingType, CostBreakdown, FinishLevel, LocationClass, ProjectInput,
};

/// Relative tolerance for float comparisons
fn assert_close(actual: f64, expected: f64, what: &str) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}

fn assert_breakdown(
    breakdown: &CostBreakdown,
    total_area: f64,
    structural: f64,
    architectural: f64,
    mep: f64,
    labor: f64,
    contingency: f64,
    total: f64,
) {
    assert_close(breakdown.total_area(), total_area, "total_area");
    assert_close(breakdown.structural_cost(), structural, "structural");
    assert_close(breakdown.architectural_cost(), architectural, "architectural");
    assert_close(breakdown.mep_cost(), mep, "mep");
    assert_close(breakdown.labor_cost(), labor, "labor");
    assert_close(breakdown.contingency_cost(), contingency, "contingency");
    assert_close(breakdown.total_estimate(), total, "total");
}

#[test]
fn test_scenario_1_standard_residential_metro() {
    let input = ProjectInput::new(100.0, 1)
        .with_building_type(BuildingType::Residential)
        .with_finish(FinishLevel::Standard)
        .with_location(LocationClass::Metro);

    let breakdown = estimate(&input).unwrap();

    assert_breakdown(
        &breakdown,
        100.0,
        1_200_000.0,
        800_000.0,
        400_000.0,
        840_000.0,
        240_000.0,
        3_480_000.0,
    );
    assert_close(breakdown.subtotal(), 2_400_000.0, "subtotal");
}

#[test]
fn test_scenario_2_premium_finish() {
    let input = ProjectInput::new(100.0, 1)
        .with_building_type(BuildingType::Residential)
        .with_finish(FinishLevel::Premium)
        .with_location(LocationClass::Metro);

    let breakdown = estimate(&input).unwrap();

    // Structural is identical to scenario 1
    assert_breakdown(
        &breakdown,
        100.0,
        1_200_000.0,
        1_200_000.0,
        600_000.0,
        1_050_000.0,
        300_000.0,
        4_350_000.0,
    );
    assert_close(breakdown.subtotal(), 3_000_000.0, "subtotal");
}

#[test]
fn test_scenario_3_commercial_basic_remote() {
    let input = ProjectInput::new(50.0, 2)
        .with_building_type(BuildingType::Commercial)
        .with_finish(FinishLevel::Basic)
        .with_location(LocationClass::Remote);

    let breakdown = estimate(&input).unwrap();

    // composite = 0.8 * 1.3 * 1.25 = 1.3, structural mult = 1.3 * 1.25 = 1.625
    assert_breakdown(
        &breakdown,
        100.0,
        1_950_000.0,
        1_040_000.0,
        520_000.0,
        1_228_500.0,
        351_000.0,
        5_089_500.0,
    );
    assert_close(breakdown.subtotal(), 3_510_000.0, "subtotal");
}

#[test]
fn test_scenario_1_with_absent_categories() {
    // All three categories default to neutral, same as scenario 1
    let breakdown = estimate(&ProjectInput::new(100.0, 1)).unwrap();
    assert_close(breakdown.total_estimate(), 3_480_000.0, "total");
}
