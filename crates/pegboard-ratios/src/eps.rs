//! Earnings-per-share aggregation and projection.
//!
//! Trailing EPS is the sum of the most recent four quarterly actuals, with
//! the provider's trailing figure as a fallback. Forward EPS projects the
//! trailing figure using a damped version of the current TTM growth rate.

use crate::config::{FORWARD_GROWTH_DAMPING, GROWTH_LOOKBACK_QUARTERS, TTM_QUARTERS};
use crate::snapshot::{EpsObservation, FundamentalsSnapshot};
use crate::valuation::checked_div;

/// Sum the `quarters` most recent EPS values.
///
/// Returns `None` when fewer than `quarters` observations exist.
pub fn sum_recent_eps(history: &[EpsObservation], quarters: usize) -> Option<f64> {
    if quarters == 0 || history.len() < quarters {
        return None;
    }
    let total: f64 = history[..quarters].iter().map(|o| o.eps).sum();
    total.is_finite().then_some(total)
}

/// Trailing-twelve-month EPS for a snapshot.
///
/// Sums the four most recent quarterly actuals when at least four exist,
/// otherwise falls back to the provider's trailing EPS.
pub fn compute_trailing_eps(snapshot: &FundamentalsSnapshot) -> Option<f64> {
    sum_recent_eps(&snapshot.quarterly_eps_history, TTM_QUARTERS).or(snapshot.trailing_eps_api)
}

/// Growth between the latest TTM EPS and the one `lookback` quarters earlier, in percent.
///
/// Needs `lookback + 1` points and a non-zero base.
pub fn ttm_growth_pct(ttm_history: &[EpsObservation], lookback: usize) -> Option<f64> {
    if lookback == 0 || ttm_history.len() <= lookback {
        return None;
    }
    let latest = ttm_history[0].eps;
    let base = ttm_history[lookback].eps;
    checked_div(Some(latest - base), Some(base)).map(|g| g * 100.0)
}

/// Year-over-year growth of TTM EPS for a snapshot, in percent.
pub fn compute_trailing_eps_growth(snapshot: &FundamentalsSnapshot) -> Option<f64> {
    ttm_growth_pct(&snapshot.ttm_eps_history, GROWTH_LOOKBACK_QUARTERS)
}

/// Project forward EPS with an explicit damping factor.
pub fn project_forward_eps(
    trailing_eps: Option<f64>,
    trailing_eps_growth_pct: Option<f64>,
    damping: f64,
) -> Option<f64> {
    let eps = trailing_eps?;
    let growth = trailing_eps_growth_pct?;
    let projected = eps * (growth / 100.0 * damping + 1.0);
    projected.is_finite().then_some(projected)
}

/// Project forward EPS using [`FORWARD_GROWTH_DAMPING`].
pub fn compute_forward_eps(
    trailing_eps: Option<f64>,
    trailing_eps_growth_pct: Option<f64>,
) -> Option<f64> {
    project_forward_eps(trailing_eps, trailing_eps_growth_pct, FORWARD_GROWTH_DAMPING)
}

/// Growth from trailing to forward EPS, in percent.
pub fn compute_forward_eps_growth_pct(
    trailing_eps: Option<f64>,
    forward_eps: Option<f64>,
) -> Option<f64> {
    let trailing = trailing_eps?;
    checked_div(Some(forward_eps? - trailing), Some(trailing)).map(|g| g * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn series(values: &[f64]) -> Vec<EpsObservation> {
        let mut date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        values
            .iter()
            .map(|&eps| {
                let obs = EpsObservation::new(date, eps);
                date = date - chrono::Days::new(91);
                obs
            })
            .collect()
    }

    #[test]
    fn test_trailing_eps_sums_four_most_recent() {
        let snapshot = FundamentalsSnapshot::new("MSFT")
            .with_quarterly_eps(series(&[3.46, 3.30, 3.23, 2.94, 2.93, 2.99]))
            .with_trailing_eps_api(99.0);
        assert_relative_eq!(compute_trailing_eps(&snapshot).unwrap(), 12.93, epsilon = 1e-12);
    }

    #[test]
    fn test_trailing_eps_ignores_entries_beyond_fourth() {
        let short = FundamentalsSnapshot::new("A").with_quarterly_eps(series(&[1.0, 2.0, 3.0, 4.0]));
        let long = FundamentalsSnapshot::new("A")
            .with_quarterly_eps(series(&[1.0, 2.0, 3.0, 4.0, 1000.0, -50.0]));
        assert_eq!(compute_trailing_eps(&short), Some(10.0));
        assert_eq!(compute_trailing_eps(&long), Some(10.0));
    }

    #[rstest]
    #[case(&[], Some(6.5), Some(6.5))]
    #[case(&[1.0, 1.0, 1.0], Some(6.5), Some(6.5))]
    #[case(&[1.0, 1.0, 1.0], None, None)]
    #[case(&[], None, None)]
    fn test_trailing_eps_fallback(
        #[case] history: &[f64],
        #[case] api: Option<f64>,
        #[case] expected: Option<f64>,
    ) {
        let mut snapshot = FundamentalsSnapshot::new("X").with_quarterly_eps(series(history));
        snapshot.trailing_eps_api = api;
        assert_eq!(compute_trailing_eps(&snapshot), expected);
    }

    #[test]
    fn test_trailing_eps_growth_five_points() {
        let snapshot =
            FundamentalsSnapshot::new("X").with_ttm_eps(series(&[12.0, 11.5, 11.0, 10.8, 10.0]));
        assert_relative_eq!(compute_trailing_eps_growth(&snapshot).unwrap(), 20.0);
    }

    #[test]
    fn test_trailing_eps_growth_uses_fifth_point_only() {
        let snapshot = FundamentalsSnapshot::new("X")
            .with_ttm_eps(series(&[12.0, 0.0, 0.0, 0.0, 10.0, 1.0, 2.0]));
        assert_relative_eq!(compute_trailing_eps_growth(&snapshot).unwrap(), 20.0);
    }

    #[rstest]
    #[case(&[12.0, 11.5, 11.0, 10.8])]
    #[case(&[12.0, 11.5, 11.0, 10.8, 0.0])]
    #[case(&[])]
    fn test_trailing_eps_growth_absent(#[case] values: &[f64]) {
        let snapshot = FundamentalsSnapshot::new("X").with_ttm_eps(series(values));
        assert_eq!(compute_trailing_eps_growth(&snapshot), None);
    }

    #[test]
    fn test_negative_base_growth_keeps_sign_convention() {
        // (1 - (-2)) / -2 = -150%
        let history = series(&[1.0, 0.5, 0.0, -1.0, -2.0]);
        assert_relative_eq!(ttm_growth_pct(&history, 4).unwrap(), -150.0);
    }

    #[test]
    fn test_forward_eps_projection() {
        assert_relative_eq!(
            compute_forward_eps(Some(10.0), Some(20.0)).unwrap(),
            11.6,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            project_forward_eps(Some(10.0), Some(20.0), 1.0).unwrap(),
            12.0,
            epsilon = 1e-9
        );
        assert_eq!(compute_forward_eps(None, Some(20.0)), None);
        assert_eq!(compute_forward_eps(Some(10.0), None), None);
    }

    #[test]
    fn test_forward_eps_growth() {
        assert_relative_eq!(
            compute_forward_eps_growth_pct(Some(10.0), Some(11.6)).unwrap(),
            16.0,
            epsilon = 1e-9
        );
        assert_eq!(compute_forward_eps_growth_pct(Some(0.0), Some(11.6)), None);
        assert_eq!(compute_forward_eps_growth_pct(None, Some(11.6)), None);
        assert_eq!(compute_forward_eps_growth_pct(Some(10.0), None), None);
    }
}
