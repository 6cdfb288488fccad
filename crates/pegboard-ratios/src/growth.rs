//! Unit conversions for growth, margin and cash-flow figures.

/// Scale applied when converting raw currency units to billions.
pub const BILLION: f64 = 1_000_000_000.0;

/// Convert a fraction to a percentage.
pub fn to_percent(fraction: Option<f64>) -> Option<f64> {
    fraction.map(|f| f * 100.0).filter(|v| v.is_finite())
}

/// Revenue growth fraction as a percentage.
pub fn compute_revenue_growth_pct(revenue_growth: Option<f64>) -> Option<f64> {
    to_percent(revenue_growth)
}

/// Profit margin fraction as a percentage.
pub fn compute_margin_pct(profit_margin: Option<f64>) -> Option<f64> {
    to_percent(profit_margin)
}

/// Raw currency amount in billions.
pub fn to_billions(amount: Option<f64>) -> Option<f64> {
    amount.map(|a| a / BILLION).filter(|v| v.is_finite())
}
