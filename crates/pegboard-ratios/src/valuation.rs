//! Price multiples: P/E and PEG variants.
//!
//! Every ratio checks its divisor first. A zero or missing divisor yields
//! `None` rather than an infinite or NaN value.

use crate::config::PegDenominator;

/// Divide two optional values, returning `None` for a missing operand,
/// a zero divisor or a non-finite result.
pub fn checked_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let denominator = denominator.filter(|d| *d != 0.0)?;
    let value = numerator? / denominator;
    value.is_finite().then_some(value)
}

/// Price over trailing EPS.
pub fn compute_pe(current_price: Option<f64>, trailing_eps: Option<f64>) -> Option<f64> {
    checked_div(current_price, trailing_eps)
}

/// Price over forward EPS.
pub fn compute_forward_pe(current_price: Option<f64>, forward_eps: Option<f64>) -> Option<f64> {
    checked_div(current_price, forward_eps)
}

/// P/E over a growth percentage expressed in `unit`.
pub fn peg_ratio(pe: Option<f64>, growth_pct: Option<f64>, unit: PegDenominator) -> Option<f64> {
    checked_div(pe, growth_pct.map(|g| unit.scale(g)))
}

/// Trailing P/E over trailing EPS growth (percentage convention).
pub fn compute_trailing_peg(pe: Option<f64>, trailing_eps_growth_pct: Option<f64>) -> Option<f64> {
    peg_ratio(pe, trailing_eps_growth_pct, PegDenominator::Percentage)
}

/// Forward P/E over forward EPS growth (percentage convention).
pub fn compute_forward_peg(
    forward_pe: Option<f64>,
    forward_eps_growth_pct: Option<f64>,
) -> Option<f64> {
    peg_ratio(forward_pe, forward_eps_growth_pct, PegDenominator::Percentage)
}

/// Trailing P/E over the expected earnings growth percentage.
///
/// Mixes a backward-looking multiple with a forward-looking growth figure.
pub fn compute_hybrid_peg(
    pe: Option<f64>,
    earnings_growth_pct: Option<f64>,
    unit: PegDenominator,
) -> Option<f64> {
    peg_ratio(pe, earnings_growth_pct, unit)
}
