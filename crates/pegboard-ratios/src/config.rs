//! Convention choices for the ratio engine.

use serde::{Deserialize, Serialize};

/// Damping applied to trailing EPS growth when projecting forward EPS.
///
/// Assumes growth continues at 80% of the current trailing rate. Older
/// notes describe this as based on the previous year's growth; the formula
/// dampens the current trailing figure.
pub const FORWARD_GROWTH_DAMPING: f64 = 0.8;

/// Number of quarters summed into a trailing-twelve-month figure.
pub const TTM_QUARTERS: usize = 4;

/// Quarters between the two TTM points compared for year-over-year growth.
pub const GROWTH_LOOKBACK_QUARTERS: usize = 4;

/// Unit of the growth figure used as the PEG denominator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PegDenominator {
    /// Divide by the growth percentage (20% growth -> 20.0).
    #[default]
    Percentage,
    /// Divide by the growth fraction (20% growth -> 0.2).
    Fraction,
}

impl PegDenominator {
    /// Convert a growth percentage into this unit.
    pub const fn scale(self, growth_pct: f64) -> f64 {
        match self {
            Self::Percentage => growth_pct,
            Self::Fraction => growth_pct / 100.0,
        }
    }

    /// Parse from a user-supplied name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "percentage" | "percent" | "pct" => Some(Self::Percentage),
            "fraction" | "ratio" => Some(Self::Fraction),
            _ => None,
        }
    }
}

impl std::fmt::Display for PegDenominator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percentage => write!(f, "percentage"),
            Self::Fraction => write!(f, "fraction"),
        }
    }
}

/// Configuration for the [`RatioEngine`](crate::RatioEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioConfig {
    /// Damping applied to trailing growth for the forward projection (default: 0.8)
    pub forward_growth_damping: f64,
    /// Unit of the PEG denominator (default: percentage)
    pub peg_denominator: PegDenominator,
    /// Fall back to provider-reported values when an input is missing (default: true)
    pub api_fallback: bool,
    /// Quarters summed into TTM EPS (default: 4)
    pub ttm_quarters: usize,
    /// Lookback in quarters for TTM EPS growth (default: 4)
    pub growth_lookback_quarters: usize,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            forward_growth_damping: FORWARD_GROWTH_DAMPING,
            peg_denominator: PegDenominator::default(),
            api_fallback: true,
            ttm_quarters: TTM_QUARTERS,
            growth_lookback_quarters: GROWTH_LOOKBACK_QUARTERS,
        }
    }
}
