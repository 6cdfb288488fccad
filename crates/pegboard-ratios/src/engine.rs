//! Ratio Engine
//!
//! Turns a [`FundamentalsSnapshot`] into [`DerivedMetrics`]. Each metric is
//! computed independently on a best-effort basis: a missing input or a zero
//! divisor leaves that metric absent without affecting the others.

use crate::config::RatioConfig;
use crate::eps::{compute_forward_eps_growth_pct, project_forward_eps, sum_recent_eps, ttm_growth_pct};
use crate::growth::{compute_margin_pct, compute_revenue_growth_pct, to_billions, to_percent};
use crate::metrics::DerivedMetrics;
use crate::snapshot::FundamentalsSnapshot;
use crate::valuation::{checked_div, peg_ratio};

/// Stateless ratio calculator.
#[derive(Debug, Clone, Default)]
pub struct RatioEngine {
    config: RatioConfig,
}

impl RatioEngine {
    /// Create an engine with the default conventions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom conventions.
    pub const fn with_config(config: RatioConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub const fn config(&self) -> &RatioConfig {
        &self.config
    }

    /// Compute every derived metric for one snapshot.
    pub fn compute(&self, snapshot: &FundamentalsSnapshot) -> DerivedMetrics {
        let config = &self.config;
        let unit = config.peg_denominator;
        let price = snapshot.current_price;

        let trailing_eps = sum_recent_eps(&snapshot.quarterly_eps_history, config.ttm_quarters)
            .or_else(|| self.fallback(snapshot.trailing_eps_api));
        let trailing_eps_growth_pct =
            ttm_growth_pct(&snapshot.ttm_eps_history, config.growth_lookback_quarters);

        let forward_eps = project_forward_eps(
            trailing_eps,
            trailing_eps_growth_pct,
            config.forward_growth_damping,
        )
        .or_else(|| self.fallback(snapshot.forward_eps_api));
        let forward_eps_growth_pct = compute_forward_eps_growth_pct(trailing_eps, forward_eps);

        // Provider multiples are only used when EPS is missing entirely.
        let pe = match trailing_eps {
            Some(_) => checked_div(price, trailing_eps),
            None => self.fallback(snapshot.trailing_pe_api),
        };
        let forward_pe = match forward_eps {
            Some(_) => checked_div(price, forward_eps),
            None => self.fallback(snapshot.forward_pe_api),
        };

        // A zero EPS or zero growth leaves the PEG absent; only missing operands fall back.
        let zero_eps = trailing_eps == Some(0.0);
        let trailing_peg = if (pe.is_some() || zero_eps) && trailing_eps_growth_pct.is_some() {
            peg_ratio(pe, trailing_eps_growth_pct, unit)
        } else {
            self.fallback(snapshot.trailing_peg_api)
        };
        let forward_peg = peg_ratio(forward_pe, forward_eps_growth_pct, unit);

        let earnings_growth_pct = to_percent(snapshot.earnings_growth);
        let hybrid_peg = peg_ratio(pe, earnings_growth_pct, unit);

        DerivedMetrics {
            trailing_eps,
            forward_eps,
            trailing_eps_growth_pct,
            forward_eps_growth_pct,
            pe,
            forward_pe,
            trailing_peg,
            forward_peg,
            revenue_growth_pct: compute_revenue_growth_pct(snapshot.revenue_growth),
            margin_pct: compute_margin_pct(snapshot.profit_margin),
            earnings_growth_pct,
            hybrid_peg,
            price_to_book: snapshot.price_to_book.filter(|v| v.is_finite()),
            operating_cashflow_billions: to_billions(snapshot.operating_cashflow),
        }
    }

    /// Compute metrics for a batch of snapshots, preserving order.
    pub fn compute_batch(&self, snapshots: &[FundamentalsSnapshot]) -> Vec<DerivedMetrics> {
        snapshots.iter().map(|s| self.compute(s)).collect()
    }

    fn fallback(&self, value: Option<f64>) -> Option<f64> {
        if self.config.api_fallback {
            value.filter(|v| v.is_finite())
        } else {
            None
        }
    }
}
