//! Behavioural tests for the ratio engine's public operations.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use pegboard_ratios::{
    DerivedMetrics, EpsObservation, FundamentalsSnapshot, RatioEngine, compute_forward_eps,
    compute_pe, compute_trailing_eps, compute_trailing_eps_growth, compute_trailing_peg,
};
use rstest::rstest;

fn history(values: &[f64]) -> Vec<EpsObservation> {
    let start = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &eps)| EpsObservation::new(start - chrono::Months::new(3 * i as u32), eps))
        .collect()
}

#[rstest]
#[case(&[0.5, 0.5, 0.5, 0.5], 2.0)]
#[case(&[1.25, 1.0, 0.75, 0.5, 99.0], 3.5)]
#[case(&[-1.0, 2.0, -3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 2.0)]
fn trailing_eps_is_sum_of_four_most_recent(#[case] values: &[f64], #[case] expected: f64) {
    let snapshot = FundamentalsSnapshot::new("T")
        .with_quarterly_eps(history(values))
        .with_trailing_eps_api(-123.0);
    assert_eq!(compute_trailing_eps(&snapshot), Some(expected));
}

#[rstest]
#[case(&[])]
#[case(&[1.0])]
#[case(&[1.0, 2.0, 3.0])]
fn short_history_falls_back_to_api(#[case] values: &[f64]) {
    let with_api = FundamentalsSnapshot::new("T")
        .with_quarterly_eps(history(values))
        .with_trailing_eps_api(7.25);
    assert_eq!(compute_trailing_eps(&with_api), Some(7.25));

    let without_api = FundamentalsSnapshot::new("T").with_quarterly_eps(history(values));
    assert_eq!(compute_trailing_eps(&without_api), None);
}

#[test]
fn forward_eps_applies_damped_growth() {
    assert_relative_eq!(
        compute_forward_eps(Some(10.0), Some(20.0)).unwrap(),
        11.6,
        epsilon = 1e-12
    );
}

#[test]
fn pe_with_zero_eps_is_absent() {
    assert_eq!(compute_pe(Some(100.0), Some(0.0)), None);
}

#[test]
fn ttm_growth_over_five_points() {
    let snapshot =
        FundamentalsSnapshot::new("T").with_ttm_eps(history(&[12.0, 11.5, 11.0, 10.8, 10.0]));
    assert_relative_eq!(compute_trailing_eps_growth(&snapshot).unwrap(), 20.0);
}

#[test]
fn trailing_peg_with_zero_growth_is_absent() {
    assert_eq!(compute_trailing_peg(Some(25.0), Some(0.0)), None);
}

#[test]
fn engine_is_idempotent() {
    let mut snapshot = FundamentalsSnapshot::new("NVDA")
        .with_price(131.4)
        .with_quarterly_eps(history(&[0.89, 0.81, 0.68, 0.60, 0.52]))
        .with_ttm_eps(history(&[2.98, 2.61, 2.13, 1.71, 1.19]));
    snapshot.revenue_growth = Some(0.78);
    snapshot.earnings_growth = Some(0.82);
    snapshot.profit_margin = Some(0.55);

    let engine = RatioEngine::new();
    let first = engine.compute(&snapshot);
    let second = engine.compute(&snapshot);

    let bits = |m: &DerivedMetrics| {
        [
            m.trailing_eps,
            m.forward_eps,
            m.trailing_eps_growth_pct,
            m.forward_eps_growth_pct,
            m.pe,
            m.forward_pe,
            m.trailing_peg,
            m.forward_peg,
        ]
        .map(|v| v.map(f64::to_bits))
    };
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(first, second);
}

#[test]
fn snapshot_round_trips_through_json() {
    let snapshot = FundamentalsSnapshot::new("ADBE")
        .with_price(510.0)
        .with_quarterly_eps(history(&[4.48, 4.48, 4.02, 3.91]));
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: FundamentalsSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(
        RatioEngine::new().compute(&snapshot),
        RatioEngine::new().compute(&restored)
    );
}
